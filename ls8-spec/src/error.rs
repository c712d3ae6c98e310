//! # Error Types for LS-8

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Ls8Error {
    // Program format errors
    #[error("Program too large: {size} bytes, memory holds {capacity}")]
    ProgramTooLarge { size: usize, capacity: usize },

    // Instruction errors
    #[error("Invalid opcode: {0:#010b}")]
    InvalidOpcode(u8),
}

pub type Result<T> = std::result::Result<T, Ls8Error>;
