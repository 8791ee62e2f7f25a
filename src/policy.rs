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

//! Anonymization policy: which columns of which tables get rewritten, and
//! with which transformer.
//!
//! Policies are JSON documents:
//!
//! ```json
//! {
//!   "tables": {
//!     "wp_users": {
//!       "columns": ["ID", "user_login", "user_email"],
//!       "fields": { "user_login": "username", "user_email": "email" }
//!     },
//!     "wp_usermeta": {
//!       "fields": {
//!         "meta_value": [
//!           { "type": "firstName", "when": { "meta_key": "first_name" } }
//!         ]
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Transformer names are resolved while loading, so a [`Policy`] that exists
//! only refers to registered transformers.

use crate::error::ConfigError;
use crate::transform::Transformer;
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

const WORDPRESS: &str = include_str!("../config/wordpress.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    tables: BTreeMap<String, TableDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDocument {
    #[serde(default)]
    columns: Option<Vec<String>>,
    #[serde(default)]
    fields: BTreeMap<String, FieldDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldDocument {
    Transformer(String),
    Rules(Vec<RuleDocument>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDocument {
    #[serde(rename = "type")]
    transformer: String,
    #[serde(default)]
    when: BTreeMap<String, String>,
}

/// A loaded, validated policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Policy {
    tables: HashMap<String, TablePolicy>,
}

/// How to rewrite the rows of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablePolicy {
    /// Declared column order, used when an INSERT has no column list
    pub columns: Option<Vec<String>>,
    /// Rewritten columns by name
    pub fields: BTreeMap<String, FieldPolicy>,
}

/// Ordered rules for one column. The first matching rule wins.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPolicy {
    pub rules: Vec<FieldRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub transformer: Transformer,
    /// `(column, value)` pairs that must all hold in the same row
    pub when: Vec<(String, String)>,
}

impl FieldRule {
    /// A rule that always applies.
    pub fn always(transformer: Transformer) -> Self {
        FieldRule {
            transformer,
            when: Vec::new(),
        }
    }

    fn matches<F>(&self, value_of: &F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.when
            .iter()
            .all(|(column, expected)| value_of(column).as_deref() == Some(expected.as_str()))
    }
}

impl FieldPolicy {
    /// The transformer of the first rule whose conditions hold. `value_of`
    /// returns the unescaped text of a column in the row being rewritten.
    pub fn select<F>(&self, value_of: F) -> Option<Transformer>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.rules
            .iter()
            .find(|rule| rule.matches(&value_of))
            .map(|rule| rule.transformer)
    }
}

impl Policy {
    /// Load and validate a policy file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loading policy from {}", path.display());
        Policy::from_json_str(&json)
    }

    /// Parse and validate a policy document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let document: PolicyDocument = serde_json::from_str(json)?;
        let mut tables = HashMap::with_capacity(document.tables.len());
        for (table, table_document) in document.tables {
            let compiled = compile_table(&table, table_document)?;
            debug!("policy for {}: {} fields", table, compiled.fields.len());
            tables.insert(table, compiled);
        }
        Ok(Policy { tables })
    }

    /// The built-in policy for a WordPress database.
    pub fn wordpress() -> Result<Self, ConfigError> {
        Policy::from_json_str(WORDPRESS)
    }

    /// Add or replace the policy of `table`.
    pub fn insert_table<S: Into<String>>(&mut self, table: S, policy: TablePolicy) {
        self.tables.insert(table.into(), policy);
    }

    pub fn table(&self, name: &str) -> Option<&TablePolicy> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn compile_table(table: &str, document: TableDocument) -> Result<TablePolicy, ConfigError> {
    let mut fields = BTreeMap::new();
    for (column, field) in document.fields {
        let resolve = |name: &str| {
            name.parse::<Transformer>()
                .map_err(|_| ConfigError::UnknownTransformer {
                    table: table.to_string(),
                    column: column.clone(),
                    name: name.to_string(),
                })
        };

        let rules = match field {
            FieldDocument::Transformer(name) => vec![FieldRule::always(resolve(&name)?)],
            FieldDocument::Rules(rules) => {
                if rules.is_empty() {
                    return Err(ConfigError::EmptyRules {
                        table: table.to_string(),
                        column: column.clone(),
                    });
                }
                rules
                    .into_iter()
                    .map(|rule| {
                        Ok(FieldRule {
                            transformer: resolve(&rule.transformer)?,
                            when: rule.when.into_iter().collect(),
                        })
                    })
                    .collect::<Result<Vec<_>, ConfigError>>()?
            }
        };
        fields.insert(column, FieldPolicy { rules });
    }

    Ok(TablePolicy {
        columns: document.columns,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    #[test]
    fn plain_and_conditional_fields() {
        let policy = Policy::from_json_str(
            r#"{
                "tables": {
                    "people": {
                        "columns": ["id", "kind", "value"],
                        "fields": {
                            "value": [
                                { "type": "email", "when": { "kind": "mail" } },
                                { "type": "purge" }
                            ],
                            "id": "companyNumber"
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let table = policy.table("people").unwrap();
        assert_eq!(
            table.columns.as_deref(),
            Some(&["id".to_string(), "kind".to_string(), "value".to_string()][..])
        );
        assert_eq!(table.fields["id"].rules, vec![FieldRule::always(Transformer::CompanyNumber)]);

        let value = &table.fields["value"];
        let mail = value.select(|column| match column {
            "kind" => Some("mail".to_string()),
            _ => None,
        });
        assert_eq!(mail, Some(Transformer::Email));
        let other = value.select(|_| Some("phone".to_string()));
        assert_eq!(other, Some(Transformer::Purge));
        assert!(policy.table("missing").is_none());
    }

    #[test]
    fn unmatched_conditions_select_nothing() {
        let policy = Policy::from_json_str(
            r#"{"tables": {"t": {"fields": {"v": [{"type": "name", "when": {"k": "x"}}]}}}}"#,
        )
        .unwrap();
        let field = &policy.table("t").unwrap().fields["v"];
        assert_eq!(field.select(|_| None), None);
        assert_eq!(field.select(|_| Some("y".to_string())), None);
        assert_eq!(field.select(|_| Some("x".to_string())), Some(Transformer::Name));
    }

    #[test]
    fn unknown_transformer_is_rejected() {
        let err = Policy::from_json_str(
            r#"{"tables": {"wp_users": {"fields": {"user_email": "fakeEmail"}}}}"#,
        )
        .unwrap_err();
        assert_matches!(
            err,
            ConfigError::UnknownTransformer { ref table, ref column, ref name }
                if table == "wp_users" && column == "user_email" && name == "fakeEmail"
        );
    }

    #[test]
    fn unknown_transformer_inside_rules_is_rejected() {
        let err = Policy::from_json_str(
            r#"{"tables": {"t": {"fields": {"v": [{"type": "name"}, {"type": "nope"}]}}}}"#,
        )
        .unwrap_err();
        assert_matches!(err, ConfigError::UnknownTransformer { .. });
    }

    #[test]
    fn malformed_documents() {
        assert_matches!(Policy::from_json_str("{"), Err(ConfigError::Json(_)));
        assert_matches!(
            Policy::from_json_str(r#"{"tables": {}, "extra": 1}"#),
            Err(ConfigError::Json(_))
        );
        assert_matches!(
            Policy::from_json_str(r#"{"tables": {"t": {"fields": {"v": []}}}}"#),
            Err(ConfigError::EmptyRules { .. })
        );
    }

    #[test]
    fn missing_file() {
        assert_matches!(
            Policy::from_path("/nonexistent/policy.json"),
            Err(ConfigError::Io { .. })
        );
    }

    #[test]
    fn wordpress_default() {
        let policy = Policy::wordpress().unwrap();
        assert_eq!(policy.len(), 3);

        let users = policy.table("wp_users").unwrap();
        assert_eq!(users.columns.as_ref().map(Vec::len), Some(10));
        assert_eq!(users.fields["user_email"].rules[0].transformer, Transformer::Email);
        assert_eq!(users.fields["user_pass"].rules[0].transformer, Transformer::Password);

        let meta = &policy.table("wp_usermeta").unwrap().fields["meta_value"];
        let nickname = meta.select(|c| if c == "meta_key" { Some("nickname".to_string()) } else { None });
        assert_eq!(nickname, Some(Transformer::Username));
        let session = meta.select(|_| Some("session_tokens".to_string()));
        assert_eq!(session, None);

        assert!(policy.table("wp_comments").unwrap().fields.contains_key("comment_author_email"));
    }
}
