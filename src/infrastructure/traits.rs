//! I/O boundary traits for testability
//!
//! These traits abstract the data file and the interactive terminal, allowing
//! services to be tested with in-memory implementations.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file's contents (create or truncate, then write).
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Line-oriented interactive terminal.
pub trait Console {
    /// Print `prompt` without a newline and read one line of input.
    ///
    /// The line terminator is removed. Returns `None` at end of input.
    /// Input that is not valid UTF-8 is decoded lossily.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print a message followed by a newline.
    fn say(&mut self, msg: &str) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Console over any buffered reader and writer.
///
/// `LineConsole::stdio()` is the terminal; tests drive it with a
/// `Cursor` and a `Vec<u8>`.
#[derive(Debug)]
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        // Undecodable bytes become U+FFFD instead of failing the session
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn say(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.output, "{msg}")?;
        self.output.flush()
    }
}
