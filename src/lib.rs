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

//! MySQL mysqldump anonymizer in Rust
//!
//! This crate reads a mysqldump stream and rewrites the values of
//! configured columns with synthetic data, leaving everything else as it
//! was. Its intended usage is to make a production backup safe to share
//! between developers.
//!
//! Statements are rewritten concurrently and written back in input order.
//!
//! ```rust,no_run
//! use anonymize_mysqldump::{Pipeline, Policy};
//! # async fn anonymize() -> Result<(), anonymize_mysqldump::AnonymizeError> {
//!
//! // Which columns to rewrite, and how. See the `policy` module for the format.
//! let policy = Policy::from_json_str(r#"{
//!     "tables": {
//!         "users": {
//!             "columns": ["id", "login", "email"],
//!             "fields": { "login": "username", "email": "email" }
//!         }
//!     }
//! }"#)?;
//!
//! let input = tokio::io::BufReader::new(tokio::fs::File::open("dump.sql").await?);
//! let output = tokio::fs::File::create("anonymized.sql").await?;
//!
//! let summary = Pipeline::new(policy).run(input, output).await?;
//! println!("{} statements", summary.statements);
//! # Ok(())
//! # }
//! ```
//!

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod ast;
pub mod dialect;
mod error;
pub mod faker;
mod parser;
pub mod pipeline;
pub mod policy;
mod rewriter;
mod tokenizer;
pub mod transform;

pub use error::{AnonymizeError, ConfigError};
pub use parser::{Parser, ParserError};
pub use pipeline::{OrderedOutput, Pipeline, RunSummary, Stage};
pub use policy::Policy;
pub use rewriter::{create_table_columns, DumpLine, KnownColumns, LineRewriter, Rewriter};
pub use tokenizer::{Token, Tokenizer, TokenizerError, Whitespace, Word};
pub use transform::{Transformer, UsedEmails};
