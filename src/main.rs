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

use anonymize_mysqldump::{Pipeline, Policy};
use anyhow::Context;
use clap::Parser;
use env_logger::{Env, Target};
use log::info;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncWrite, BufReader, BufWriter};

/// Rewrite personal data in a mysqldump with synthetic values.
#[derive(Debug, Parser)]
#[command(name = "anonymize-mysqldump", version)]
struct Args {
    /// Policy file. The built-in WordPress policy is used when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log every statement decision
    #[arg(short, long)]
    verbose: bool,

    /// Dump to read, stdin when omitted
    input: Option<PathBuf>,

    /// Where to write, stdout when omitted
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Stderr)
        .init();

    let policy = match &args.config {
        Some(path) => Policy::from_path(path)
            .with_context(|| format!("loading policy {}", path.display()))?,
        None => Policy::wordpress().context("loading the built-in policy")?,
    };
    info!("policy covers {} tables", policy.len());

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let output: Box<dyn AsyncWrite + Unpin + Send> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .await
                .with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    Pipeline::new(policy)
        .run(input, output)
        .await
        .context("anonymizing dump")?;
    Ok(())
}
