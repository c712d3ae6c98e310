//! Runtime error types for LS-8

use ls8_spec::Ls8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Spec error: {0}")]
    SpecError(#[from] Ls8Error),

    #[error("Illegal instruction {opcode:#010b} at PC {pc:#04x}")]
    IllegalInstruction { pc: usize, opcode: u8 },

    #[error("Memory out of bounds: address {address:#x}")]
    OutOfBounds { address: usize },

    #[error("Invalid register index {index} at PC {pc:#04x}")]
    InvalidRegister { pc: usize, index: u8 },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
