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

//! Keywords the dump parser cares about.
//!
//! Unquoted words matching one of these are tokenized with their uppercase
//! form in `Word::keyword`; everything else is a plain identifier.

pub const ALL_KEYWORDS: &[&str] = &[
    "CHECK",
    "CONSTRAINT",
    "CREATE",
    "DELAYED",
    "EXISTS",
    "FALSE",
    "FOREIGN",
    "FULLTEXT",
    "HIGH_PRIORITY",
    "IF",
    "IGNORE",
    "INDEX",
    "INSERT",
    "INTO",
    "KEY",
    "LOW_PRIORITY",
    "NOT",
    "NULL",
    "PRIMARY",
    "REPLACE",
    "SPATIAL",
    "TABLE",
    "TEMPORARY",
    "TRUE",
    "UNIQUE",
    "VALUE",
    "VALUES",
];

/// Words that open a table constraint or index inside `CREATE TABLE (...)`
/// instead of a column definition.
pub const TABLE_CONSTRAINT_KEYWORDS: &[&str] = &[
    "CHECK",
    "CONSTRAINT",
    "FOREIGN",
    "FULLTEXT",
    "INDEX",
    "KEY",
    "PRIMARY",
    "SPATIAL",
    "UNIQUE",
];

pub fn is_keyword(word: &str) -> bool {
    ALL_KEYWORDS.contains(&word)
}
