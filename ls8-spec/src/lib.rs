//! # LS-8 Specification
//!
//! 8-bit register machine with a packed opcode encoding.
//!
//! ## Key Features
//! - 256 bytes of flat memory shared by code, data and stack
//! - 8 general-purpose registers, r7 doubles as the stack pointer
//! - Opcode bytes carry their own operand count and branch bit
//! - 13 instructions: arithmetic, stack, subroutines, compare and jumps

pub mod encoding;
pub mod error;
pub mod opcode;
pub mod program;
pub mod register;

pub use encoding::Decoded;
pub use error::Ls8Error;
pub use opcode::Opcode;
pub use program::{ListingEntry, Program};
pub use register::{Register, NUM_REGISTERS};

/// Memory size in bytes
pub const MEMORY_SIZE: usize = 256;

/// Address of the first loaded byte
pub const LOAD_BASE: usize = 0;
