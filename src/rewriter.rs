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

//! Statement rewriter: turns one dump statement into its anonymized form.
//!
//! Statements that are not an INSERT into a table of the policy, or that
//! cannot be parsed, are written back exactly as read. Rewritten statements
//! are serialized canonically, one per line.

use crate::ast::{Insert, Statement, Value};
use crate::dialect::MySqlDialect;
use crate::parser::Parser;
use crate::policy::{FieldPolicy, Policy, TablePolicy};
use crate::transform::UsedEmails;
use log::{debug, warn};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Column names of tables whose CREATE TABLE has been read so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnownColumns {
    tables: HashMap<String, Vec<String>>,
}

impl KnownColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<S: Into<String>>(&mut self, table: S, columns: Vec<String>) {
        self.tables.insert(table.into(), columns);
    }

    pub fn get(&self, table: &str) -> Option<&[String]> {
        self.tables.get(table).map(Vec::as_slice)
    }

}

/// Table name and column names of a CREATE TABLE statement.
pub fn create_table_columns(statement: &[u8]) -> Option<(String, Vec<String>)> {
    if !starts_with_create(statement) {
        return None;
    }
    let sql = std::str::from_utf8(statement).ok()?;
    match Parser::parse_sql(&MySqlDialect {}, sql) {
        Ok(Statement::CreateTable { name, columns }) => {
            debug!("learned {} columns of {}", columns.len(), name);
            let columns = columns.into_iter().map(|ident| ident.value).collect();
            Some((name.table().to_string(), columns))
        }
        Ok(_) => None,
        Err(e) => {
            debug!("unreadable CREATE statement: {}", e);
            None
        }
    }
}

fn starts_with_create(statement: &[u8]) -> bool {
    let start = statement
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(statement.len());
    statement[start..]
        .get(..6)
        .map_or(false, |word| word.eq_ignore_ascii_case(b"create"))
}

/// One statement of the dump, as read.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpLine {
    /// The statement's original bytes, without the final newline
    pub bytes: Vec<u8>,
    /// Schema known at the statement's position in the dump
    pub columns: Arc<KnownColumns>,
}

impl DumpLine {
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Self {
        DumpLine::with_columns(bytes, Arc::new(KnownColumns::default()))
    }

    pub fn with_columns<B: Into<Vec<u8>>>(bytes: B, columns: Arc<KnownColumns>) -> Self {
        DumpLine {
            bytes: bytes.into(),
            columns,
        }
    }

    /// The statement unchanged, newline terminated.
    pub fn pass_through(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + 1);
        out.extend_from_slice(&self.bytes);
        out.push(b'\n');
        out
    }
}

/// Produces the output for one dump statement. Implementations run
/// concurrently on many statements at once.
pub trait LineRewriter: Send + Sync + 'static {
    fn rewrite(&self, line: &DumpLine) -> Vec<u8>;
}

/// Rewrites INSERT statements according to a [`Policy`].
#[derive(Debug)]
pub struct Rewriter {
    policy: Policy,
    emails: Arc<UsedEmails>,
    dialect: MySqlDialect,
}

impl Rewriter {
    pub fn new(policy: Policy) -> Self {
        Rewriter::with_emails(policy, Arc::new(UsedEmails::new()))
    }

    /// A rewriter sharing an existing set of handed out emails.
    pub fn with_emails(policy: Policy, emails: Arc<UsedEmails>) -> Self {
        Rewriter {
            policy,
            emails,
            dialect: MySqlDialect {},
        }
    }

    /// The anonymized INSERT for `sql`, or `None` when it must pass through.
    fn rewrite_statement(&self, sql: &str, known: &KnownColumns) -> Option<Insert> {
        let mut source = sql.as_bytes();
        let mut parser = Parser::new(&self.dialect, &mut source);

        let (kind, table_name) = match parser.parse_insert_target() {
            Ok(Some(target)) => target,
            Ok(None) => return None,
            Err(e) => {
                debug!("not an insert: {}", e);
                return None;
            }
        };
        let table = table_name.table().to_string();
        let policy = match self.policy.table(&table) {
            Some(policy) => policy,
            None => {
                debug!("{}: no policy, passing through", table);
                return None;
            }
        };

        let mut insert = match parser.parse_insert_body(kind, table_name) {
            Ok(insert) => insert,
            Err(e) => {
                warn!("{}: cannot parse insert, passing through: {}", table, e);
                return None;
            }
        };

        let columns: Cow<[String]> = if !insert.columns.is_empty() {
            Cow::Owned(insert.columns.iter().map(|c| c.value.clone()).collect())
        } else if let Some(columns) = &policy.columns {
            Cow::Borrowed(columns.as_slice())
        } else if let Some(columns) = known.get(&table) {
            Cow::Borrowed(columns)
        } else {
            warn!("{}: column order unknown, passing through", table);
            return None;
        };

        self.anonymize_rows(&mut insert, &columns, policy);
        debug!("{}: rewrote {} rows", table, insert.values.0.len());
        Some(insert)
    }

    fn anonymize_rows(&self, insert: &mut Insert, columns: &[String], policy: &TablePolicy) {
        let positions: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let targets: Vec<(usize, &FieldPolicy)> = policy
            .fields
            .iter()
            .filter_map(|(column, field)| match positions.get(column.as_str()) {
                Some(&position) => Some((position, field)),
                None => {
                    debug!("column {} not in row shape, ignored", column);
                    None
                }
            })
            .collect();

        for row in insert.values.0.iter_mut() {
            // Conditions look at the row as read, before any replacement.
            let replacements: Vec<(usize, Value)> = targets
                .iter()
                .filter(|(position, _)| *position < row.len())
                .filter_map(|&(position, field)| {
                    let transformer = field.select(|column| {
                        positions
                            .get(column)
                            .and_then(|&i| row.get(i))
                            .and_then(Value::text)
                    })?;
                    Some((position, transformer.apply(&row[position], &self.emails)))
                })
                .collect();

            for (position, value) in replacements {
                row[position] = value;
            }
        }
    }
}

impl LineRewriter for Rewriter {
    fn rewrite(&self, line: &DumpLine) -> Vec<u8> {
        let sql = match std::str::from_utf8(&line.bytes) {
            Ok(sql) => sql,
            Err(_) => return line.pass_through(),
        };
        match self.rewrite_statement(sql, &line.columns) {
            Some(insert) => format!("{};\n", insert).into_bytes(),
            None => line.pass_through(),
        }
    }
}
