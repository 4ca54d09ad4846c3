//! Async subprocess runner
//!
//! Spawns an external executable and exposes its stdout/stderr as a lazy,
//! finite sequence of line events, interleaved in emission order. The
//! sequence ends when the process exits; launch failures and non-zero exits
//! surface as distinguishable errors, never as silent truncation. Dropping
//! the stream kills the child, so abandoning consumption cancels the
//! operation and discards partial output.

use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use crate::error::{Result, SpigotError};

/// Bounded event buffer: a fast-writing child blocks here instead of
/// growing memory while the consumer is busy.
const CHANNEL_CAPACITY: usize = 256;

/// One line of subprocess output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Stdout(String),
    Stderr(String),
}

impl OutputEvent {
    pub fn line(&self) -> &str {
        match self {
            OutputEvent::Stdout(line) | OutputEvent::Stderr(line) => line,
        }
    }

    pub fn is_stderr(&self) -> bool {
        matches!(self, OutputEvent::Stderr(_))
    }
}

/// Full captured output of a completed invocation
#[derive(Debug, Default)]
pub struct CollectedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A running subprocess and its stream of output events.
///
/// Consume with `futures::StreamExt::next`, then call [`OutputStream::finish`]
/// to observe the exit status. Stderr lines are captured as they pass through
/// so a later failure can carry them.
#[derive(Debug)]
pub struct OutputStream {
    program: PathBuf,
    child: Child,
    events: mpsc::Receiver<OutputEvent>,
    stderr_seen: Vec<String>,
}

/// Launch an executable and stream its output line by line.
pub fn shell<I, S>(program: impl AsRef<Path>, args: I) -> Result<OutputStream>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let program = program.as_ref().to_path_buf();
    tracing::debug!(program = %program.display(), "spawning subprocess");

    let mut child = Command::new(&program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| SpigotError::LaunchFailed {
            program: program.clone(),
            source,
        })?;

    let (tx, events) = mpsc::channel(CHANNEL_CAPACITY);

    let stdout = child.stdout.take().expect("stdout was piped");
    let stderr = child.stderr.take().expect("stderr was piped");
    tokio::spawn(pump_lines(stdout, tx.clone(), OutputEvent::Stdout));
    tokio::spawn(pump_lines(stderr, tx, OutputEvent::Stderr));

    Ok(OutputStream {
        program,
        child,
        events,
        stderr_seen: Vec::new(),
    })
}

/// Launch the brew executable with the given arguments.
pub fn brew<I, S>(args: I) -> Result<OutputStream>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    shell(crate::brew::brew_executable(), args)
}

async fn pump_lines<R>(
    reader: R,
    tx: mpsc::Sender<OutputEvent>,
    wrap: impl Fn(String) -> OutputEvent,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        // A closed receiver means the consumer went away; stop reading.
        if tx.send(wrap(line)).await.is_err() {
            break;
        }
    }
}

impl OutputStream {
    /// Wait for the process to exit, draining any unread output first.
    ///
    /// A non-zero exit yields [`SpigotError::NonZeroExit`] carrying every
    /// stderr line seen during the run.
    pub async fn finish(mut self) -> Result<()> {
        while let Some(event) = self.events.recv().await {
            if let OutputEvent::Stderr(line) = event {
                self.stderr_seen.push(line);
            }
        }

        let status = self.child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(SpigotError::NonZeroExit {
                program: self.program,
                code: status.code(),
                stderr: self.stderr_seen.join("\n"),
            })
        }
    }

    /// Collect the full output of the invocation.
    ///
    /// Returns the captured stdout/stderr on success; a non-zero exit is an
    /// error carrying the captured stderr (partial output is never presented
    /// as success).
    pub async fn collect_output(mut self) -> Result<CollectedOutput> {
        let mut collected = CollectedOutput::default();

        while let Some(event) = self.events.recv().await {
            match event {
                OutputEvent::Stdout(line) => {
                    collected.stdout.push_str(&line);
                    collected.stdout.push('\n');
                }
                OutputEvent::Stderr(line) => {
                    collected.stderr.push_str(&line);
                    collected.stderr.push('\n');
                }
            }
        }

        let status = self.child.wait().await?;
        if status.success() {
            Ok(collected)
        } else {
            Err(SpigotError::NonZeroExit {
                program: self.program,
                code: status.code(),
                stderr: collected.stderr,
            })
        }
    }
}

impl Stream for OutputStream {
    type Item = OutputEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<OutputEvent>> {
        let this = self.get_mut();
        match this.events.poll_recv(cx) {
            Poll::Ready(Some(event)) => {
                if let OutputEvent::Stderr(line) = &event {
                    this.stderr_seen.push(line.clone());
                }
                Poll::Ready(Some(event))
            }
            other => other,
        }
    }
}
