// src/console.rs
//! Diagnostic output shared by concurrent tasks.
//!
//! A single owner thread holds the writer. Tasks hold a cloneable
//! [`ConsoleHandle`] and send whole [`Message`]s over a channel, so the lines
//! of one message always come out together and in order.

use crate::LintError;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io::{self, Write};
use std::thread::{self, JoinHandle};

/// Colour of one diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Plain,
    Success,
    Error,
    Warning,
}

impl Color {
    fn code(self) -> Option<char> {
        match self {
            Color::Plain => None,
            Color::Success => Some('2'),
            Color::Error => Some('1'),
            Color::Warning => Some('3'),
        }
    }
}

/// A block of lines that is written without interruption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    lines: Vec<(Color, String)>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new().line(Color::Warning, text)
    }

    pub fn line(mut self, color: Color, text: impl Into<String>) -> Self {
        self.lines.push((color, text.into()));
        self
    }

    pub fn lines(&self) -> &[(Color, String)] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sending side of a [`Console`].
#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    sender: Sender<Message>,
}

impl ConsoleHandle {
    /// Queues `message` for the owner thread.
    ///
    /// # Errors
    ///
    /// Returns `LintError::ConsoleClosed` if the owner has stopped.
    pub fn print(&self, message: Message) -> Result<(), LintError> {
        self.sender
            .send(message)
            .map_err(|_| LintError::ConsoleClosed)
    }

    pub fn println(&self, color: Color, text: impl Into<String>) -> Result<(), LintError> {
        self.print(Message::new().line(color, text))
    }
}

/// Owner of a diagnostic writer.
///
/// ```
/// use sovran_optional::{Color, Console};
///
/// let console = Console::spawn(Vec::new(), false);
/// let handle = console.handle();
/// handle.println(Color::Warning, "include/ is missing")?;
/// drop(handle);
///
/// let written = console.finish()?;
/// assert_eq!(String::from_utf8_lossy(&written), "include/ is missing\n");
/// # Ok::<(), sovran_optional::LintError>(())
/// ```
pub struct Console<W> {
    handle: ConsoleHandle,
    worker: JoinHandle<io::Result<W>>,
}

impl<W> Console<W>
where
    W: Write + Send + 'static,
{
    /// Starts the owner thread. Colour escapes are written only when `color` is set.
    pub fn spawn(writer: W, color: bool) -> Self {
        let (sender, receiver) = unbounded();
        let worker = thread::spawn(move || drain(writer, receiver, color));
        tracing::debug!(color, "console owner started");
        Self {
            handle: ConsoleHandle { sender },
            worker,
        }
    }

    pub fn handle(&self) -> ConsoleHandle {
        self.handle.clone()
    }

    /// Closes this console's own handle and waits for the owner to drain.
    ///
    /// Blocks until every other [`ConsoleHandle`] has been dropped too.
    ///
    /// # Errors
    ///
    /// - Returns `LintError::Io` if writing failed
    /// - Returns `LintError::ConsoleWorkerPanicked` if the owner thread panicked
    pub fn finish(self) -> Result<W, LintError> {
        let Console { handle, worker } = self;
        drop(handle);
        match worker.join() {
            Ok(result) => {
                tracing::debug!("console owner finished");
                Ok(result?)
            }
            Err(_) => Err(LintError::ConsoleWorkerPanicked),
        }
    }
}

fn drain<W: Write>(mut writer: W, receiver: Receiver<Message>, color: bool) -> io::Result<W> {
    for message in receiver.iter() {
        if let Err(err) = write_message(&mut writer, &message, color) {
            tracing::warn!(error = %err, "console write failed");
            return Err(err);
        }
    }
    writer.flush()?;
    Ok(writer)
}

fn write_message<W: Write>(writer: &mut W, message: &Message, color: bool) -> io::Result<()> {
    for (line_color, text) in message.lines() {
        match line_color.code().filter(|_| color) {
            Some(code) => writeln!(writer, "\x1b[9{}m{}\x1b[0m", code, text)?,
            None => writeln!(writer, "{}", text)?,
        }
    }
    writer.flush()
}
