// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::*;

/// Which flavour of row-writing statement was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertKind {
    Insert,
    InsertIgnore,
    Replace,
}

impl fmt::Display for InsertKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            InsertKind::Insert => "insert into",
            InsertKind::InsertIgnore => "insert ignore into",
            InsertKind::Replace => "replace into",
        })
    }
}

/// `INSERT INTO name [(columns)] VALUES (row), ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub kind: InsertKind,
    pub table_name: ObjectName,
    /// Explicit column list, empty when the statement relies on table order
    pub columns: Vec<Ident>,
    pub values: Values,
}

/// Serialized on a single line with lowercase keywords, without the
/// terminating semicolon.
impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.table_name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        write!(f, " {}", self.values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Values(pub Vec<Vec<Value>>);

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "values ")?;
        let mut delim = "";
        for row in &self.0 {
            write!(f, "{}", delim)?;
            delim = ", ";
            write!(f, "({})", display_comma_separated(row))?;
        }
        Ok(())
    }
}
