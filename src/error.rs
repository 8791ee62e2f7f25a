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

//! Error types for policy loading and pipeline runs.
//!
//! Problems with a single dump statement are not errors: the statement is
//! written out unchanged. Only configuration and I/O failures end a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A policy document that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read policy {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid policy document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table '{table}', column '{column}': unknown transformer '{name}'")]
    UnknownTransformer {
        table: String,
        column: String,
        name: String,
    },

    #[error("table '{table}', column '{column}': empty rule list")]
    EmptyRules { table: String, column: String },
}

/// Failure of a whole anonymization run.
#[derive(Debug, Error)]
pub enum AnonymizeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("rewrite task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
