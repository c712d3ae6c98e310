//! Main loader logic

use crate::error::{LoaderError, Result};
use crate::parser::parse_line;
use ls8_spec::Program;
use std::fs;
use std::path::Path;

/// How malformed lines are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Log and skip malformed lines
    #[default]
    Lenient,
    /// Fail on the first malformed line
    Strict,
}

/// Parse program text into a program image
pub fn parse_source(source: &str, mode: LoadMode) -> Result<Program> {
    let mut code = Vec::new();

    for (index, text) in source.lines().enumerate() {
        match parse_line(text, index + 1) {
            Ok(Some(byte)) => code.push(byte),
            Ok(None) => {}
            Err(err @ LoaderError::MalformedLine { .. }) if mode == LoadMode::Lenient => {
                tracing::warn!("skipping line: {}", err);
            }
            Err(err) => return Err(err),
        }
    }

    tracing::debug!(bytes = code.len(), "parsed program");
    Ok(Program::new(code))
}

/// Read and parse a program file
pub fn load_file(path: impl AsRef<Path>, mode: LoadMode) -> Result<Program> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "read program source");
    parse_source(&source, mode)
}
