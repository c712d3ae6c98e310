//! I/O handling

use std::fmt;
use std::io::{self, Write};

/// Collects PRN output and optionally echoes it to a writer
pub struct IOHandler {
    outputs: Vec<u8>,
    sink: Option<Box<dyn Write>>,
}

impl IOHandler {
    /// Record outputs only
    pub fn new() -> Self {
        IOHandler {
            outputs: Vec::new(),
            sink: None,
        }
    }

    /// Record outputs and write each one as a decimal line to `sink`
    pub fn with_writer<W: Write + 'static>(sink: W) -> Self {
        IOHandler {
            outputs: Vec::new(),
            sink: Some(Box::new(sink)),
        }
    }

    pub fn write(&mut self, value: u8) -> io::Result<()> {
        self.outputs.push(value);
        if let Some(sink) = self.sink.as_mut() {
            writeln!(sink, "{}", value)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }

    pub fn outputs(&self) -> &[u8] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outputs)
    }
}

impl Default for IOHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IOHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IOHandler")
            .field("outputs", &self.outputs)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
