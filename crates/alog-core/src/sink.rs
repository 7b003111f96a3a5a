//! Output sinks.
//!
//! A sink is a shared handle to a stream the caller opened. The registry keeps
//! a clone of the handle; the caller keeps its own and decides when the stream
//! goes away. Each sink has its own lock, held for one line at a time.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, lockable writer.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// A fan-out target for formatted lines.
#[derive(Clone)]
pub struct Sink {
    name: String,
    writer: SharedWriter,
}

impl Sink {
    /// Wrap an already-shared writer.
    pub fn new<W>(name: impl Into<String>, writer: Arc<Mutex<W>>) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            name: name.into(),
            writer,
        }
    }

    /// Take ownership of a writer and share it.
    pub fn from_writer<W>(name: impl Into<String>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::new(name, Arc::new(Mutex::new(writer)))
    }

    pub fn stdout() -> Self {
        Self::from_writer("stdout", io::stdout())
    }

    pub fn stderr() -> Self {
        Self::from_writer("stderr", io::stderr())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write one complete line and flush, holding this sink's lock throughout.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("name", &self.name).finish()
    }
}
