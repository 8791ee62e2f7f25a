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

//! SQL Abstract Syntax Tree (AST) types for the statements a dump rewrite needs

mod insert;
mod value;

pub use self::insert::{Insert, InsertKind, Values};
pub use self::value::{escape_string, unescape_string, Value};

use crate::dialect::keywords;
use std::fmt;

struct DisplaySeparated<'a, T>
where
    T: fmt::Display,
{
    slice: &'a [T],
    sep: &'static str,
}

impl<'a, T> fmt::Display for DisplaySeparated<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut delim = "";
        for t in self.slice {
            write!(f, "{}", delim)?;
            delim = self.sep;
            write!(f, "{}", t)?;
        }
        Ok(())
    }
}

fn display_separated<'a, T>(slice: &'a [T], sep: &'static str) -> DisplaySeparated<'a, T>
where
    T: fmt::Display,
{
    DisplaySeparated { slice, sep }
}

fn display_comma_separated<T>(slice: &[T]) -> DisplaySeparated<'_, T>
where
    T: fmt::Display,
{
    DisplaySeparated { slice, sep: ", " }
}

/// An identifier, decomposed into its value or character data and the quote style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The value of the identifier without quotes.
    pub value: String,
    /// The starting quote if any. Valid quote characters are the double quote
    /// and the backtick.
    pub quote_style: Option<char>,
}

impl Ident {
    /// Create a new identifier with the given value and no quotes.
    pub fn new<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Ident {
            value: value.into(),
            quote_style: None,
        }
    }

    /// Whether the identifier can be written without quotes.
    fn is_plain(&self) -> bool {
        let mut chars = self.value.chars();
        let starts_well = match chars.next() {
            Some(ch) => ch.is_ascii_alphabetic() || ch == '_',
            None => false,
        };
        starts_well
            && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
            && !keywords::is_keyword(&self.value.to_uppercase())
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

/// Canonical form: bare when the name allows it, backticks otherwise.
impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_plain() {
            f.write_str(&self.value)
        } else {
            write!(f, "`{}`", self.value.replace('`', "``"))
        }
    }
}

/// A name of a table, possibly schema qualified: `db`.`table`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// The unqualified table name, as policies refer to it.
    pub fn table(&self) -> &str {
        self.0.last().map(|ident| ident.value.as_str()).unwrap_or("")
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", display_separated(&self.0, "."))
    }
}

/// The statements a dump rewrite distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// INSERT or REPLACE with literal rows
    Insert(Insert),
    /// CREATE TABLE, reduced to its column names in declaration order
    CreateTable {
        name: ObjectName,
        columns: Vec<Ident>,
    },
    /// Anything else. Never rewritten.
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_quoting() {
        assert_eq!(Ident::new("wp_users").to_string(), "wp_users");
        assert_eq!(Ident::new("user-data").to_string(), "`user-data`");
        assert_eq!(Ident::new("key").to_string(), "`key`");
        assert_eq!(Ident::new("1st").to_string(), "`1st`");
    }

    #[test]
    fn qualified_names() {
        let name = ObjectName(vec![Ident::new("wordpress"), Ident::new("wp_users")]);
        assert_eq!(name.to_string(), "wordpress.wp_users");
        assert_eq!(name.table(), "wp_users");
    }
}
