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

//! Ordered concurrent pipeline.
//!
//! A reader task splits the input into statements and hands each one to its
//! own rewrite task on the blocking pool. The task's `JoinHandle` is the
//! statement's result slot; slots travel through a channel in read order, and
//! [`OrderedOutput`] awaits them in that order, whatever order the rewrites
//! finish in.

mod splitter;

pub use self::splitter::StatementSplitter;

use crate::error::AnonymizeError;
use crate::policy::Policy;
use crate::rewriter::{create_table_columns, DumpLine, KnownColumns, LineRewriter, Rewriter};
use log::{debug, info};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};

type Slot = JoinHandle<Vec<u8>>;

/// Counters of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Statements written, rewritten or not
    pub statements: u64,
    pub bytes: u64,
}

/// Where an [`OrderedOutput`] is in its run. There is no idle stage:
/// [`Pipeline::dispatch`] starts reading before it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The input is still being read and dispatched
    Reading,
    /// Everything is dispatched, slots remain to be drained
    Draining,
    /// Every slot has been yielded
    Done,
}

/// Anonymizes dumps. Each pipeline hands out emails from its own set, so a
/// pipeline is meant for one run.
pub struct Pipeline {
    rewriter: Arc<dyn LineRewriter>,
}

impl Pipeline {
    pub fn new(policy: Policy) -> Self {
        Pipeline::with_rewriter(Rewriter::new(policy))
    }

    pub fn with_rewriter<R: LineRewriter>(rewriter: R) -> Self {
        Pipeline {
            rewriter: Arc::new(rewriter),
        }
    }

    /// Start reading `reader`. Must be called within a tokio runtime.
    pub fn dispatch<R>(&self, reader: R) -> OrderedOutput
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (slots, receiver) = mpsc::unbounded_channel();
        let rewriter = Arc::clone(&self.rewriter);
        let reader = tokio::spawn(read_statements(reader, rewriter, slots));
        OrderedOutput {
            slots: receiver,
            reader: Some(reader),
            done: false,
        }
    }

    /// Anonymize everything `reader` yields into `writer`.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<RunSummary, AnonymizeError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        let mut output = self.dispatch(reader);
        let mut summary = RunSummary::default();
        while let Some(statement) = output.next().await {
            let statement = statement?;
            writer.write_all(&statement).await?;
            summary.statements += 1;
            summary.bytes += statement.len() as u64;
        }
        writer.flush().await?;

        info!(
            "wrote {} statements ({} bytes)",
            summary.statements, summary.bytes
        );
        Ok(summary)
    }
}

/// Rewritten statements, in input order.
pub struct OrderedOutput {
    slots: mpsc::UnboundedReceiver<Slot>,
    reader: Option<JoinHandle<io::Result<u64>>>,
    done: bool,
}

impl OrderedOutput {
    /// The next statement in input order, waiting for its rewrite to
    /// finish. Errors of the reader are reported once every statement read
    /// before them has been yielded.
    pub async fn next(&mut self) -> Option<Result<Vec<u8>, AnonymizeError>> {
        if self.done {
            return None;
        }
        if let Some(slot) = self.slots.recv().await {
            return Some(slot.await.map_err(AnonymizeError::from));
        }

        self.done = true;
        let reader = self.reader.take()?;
        match reader.await {
            Ok(Ok(dispatched)) => {
                debug!("input exhausted after {} statements", dispatched);
                None
            }
            Ok(Err(e)) => Some(Err(e.into())),
            Err(e) => Some(Err(e.into())),
        }
    }

    pub fn stage(&self) -> Stage {
        match &self.reader {
            _ if self.done => Stage::Done,
            Some(reader) if !reader.is_finished() => Stage::Reading,
            _ => Stage::Draining,
        }
    }
}

async fn read_statements<R>(
    mut reader: R,
    rewriter: Arc<dyn LineRewriter>,
    slots: mpsc::UnboundedSender<Slot>,
) -> io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut splitter = StatementSplitter::new();
    let mut known = Arc::new(KnownColumns::new());
    let mut line = Vec::new();
    let mut dispatched = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if let Some(statement) = splitter.push_line(&line) {
            if !send(&slots, &rewriter, &mut known, statement) {
                return Ok(dispatched);
            }
            dispatched += 1;
        }
    }

    if let Some(statement) = splitter.finish() {
        if send(&slots, &rewriter, &mut known, statement) {
            dispatched += 1;
        }
    }
    Ok(dispatched)
}

/// Spawn the rewrite of `statement` and queue its slot. False when nobody
/// is consuming the output any more.
fn send(
    slots: &mpsc::UnboundedSender<Slot>,
    rewriter: &Arc<dyn LineRewriter>,
    known: &mut Arc<KnownColumns>,
    statement: Vec<u8>,
) -> bool {
    // Later statements must see this table's columns, earlier ones keep
    // their snapshot.
    if let Some((table, columns)) = create_table_columns(&statement) {
        Arc::make_mut(known).record(table, columns);
    }

    let line = DumpLine::with_columns(statement, Arc::clone(known));
    let rewriter = Arc::clone(rewriter);
    let slot = task::spawn_blocking(move || rewriter.rewrite(&line));
    if slots.send(slot).is_err() {
        debug!("output dropped, stopping");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes statements back, slowest first.
    struct Countdown {
        remaining: AtomicUsize,
    }

    impl LineRewriter for Countdown {
        fn rewrite(&self, line: &DumpLine) -> Vec<u8> {
            let left = self.remaining.fetch_sub(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(left as u64 * 5));
            line.pass_through()
        }
    }

    struct Panics;

    impl LineRewriter for Panics {
        fn rewrite(&self, line: &DumpLine) -> Vec<u8> {
            if line.bytes.starts_with(b"boom") {
                panic!("rewrite failed");
            }
            line.pass_through()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn output_follows_input_order() {
        let input: String = (0..20).map(|i| format!("SELECT {};\n", i)).collect();
        let pipeline = Pipeline::with_rewriter(Countdown {
            remaining: AtomicUsize::new(20),
        });
        let mut out = Vec::new();
        let summary = pipeline.run(Cursor::new(input.clone()), &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
        assert_eq!(summary.statements, 20);
        assert_eq!(summary.bytes, input.len() as u64);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_final_newline_is_added() {
        let pipeline = Pipeline::new(Policy::default());
        let mut out = Vec::new();
        pipeline
            .run(Cursor::new("DROP TABLE t;\nCREATE TABLE t (\n  a int\n);"), &mut out)
            .await
            .unwrap();
        assert_eq!(out, b"DROP TABLE t;\nCREATE TABLE t (\n  a int\n);\n".to_vec());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_input() {
        let pipeline = Pipeline::new(Policy::default());
        let mut output = pipeline.dispatch(Cursor::new(Vec::new()));
        assert!(output.next().await.is_none());
        assert_eq!(output.stage(), Stage::Done);
        assert!(output.next().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn panicking_rewrite_is_a_task_error() {
        let pipeline = Pipeline::with_rewriter(Panics);
        let mut output = pipeline.dispatch(Cursor::new("fine;\nboom;\nfine;\n"));
        assert_eq!(output.next().await.unwrap().unwrap(), b"fine;\n".to_vec());
        assert!(matches::matches!(
            output.next().await,
            Some(Err(AnonymizeError::Task(_)))
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn schema_is_learned_in_stream_order() {
        struct Columns;
        impl LineRewriter for Columns {
            fn rewrite(&self, line: &DumpLine) -> Vec<u8> {
                format!("{:?}\n", line.columns.get("t")).into_bytes()
            }
        }

        let pipeline = Pipeline::with_rewriter(Columns);
        let mut out = Vec::new();
        pipeline
            .run(
                Cursor::new("SELECT 1;\nCREATE TABLE t (a int, b int);\nSELECT 2;\n"),
                &mut out,
            )
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "None");
        assert_eq!(lines[1], r#"Some(["a", "b"])"#);
        assert_eq!(lines[2], r#"Some(["a", "b"])"#);
    }
}
