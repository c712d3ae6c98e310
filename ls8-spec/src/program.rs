//! # Program Image for LS-8
//!
//! A program is the flat byte image written into memory starting at
//! address 0. Code and data share the same image.

use crate::encoding::Decoded;
use crate::error::{Ls8Error, Result};
use crate::{Opcode, MEMORY_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Program image
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Raw bytes, loaded at address 0
    pub code: Vec<u8>,
}

impl Program {
    /// Create a program from raw bytes
    pub fn new(code: Vec<u8>) -> Self {
        Self { code }
    }

    /// Image size in bytes
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Check that the image fits in memory
    pub fn validate(&self) -> Result<()> {
        if self.code.len() > MEMORY_SIZE {
            return Err(Ls8Error::ProgramTooLarge {
                size: self.code.len(),
                capacity: MEMORY_SIZE,
            });
        }
        Ok(())
    }

    /// Walk the image as a sequence of instructions.
    ///
    /// Bytes without an opcode are reported as `None` and treated as a
    /// single-byte instruction so that data regions do not stop the walk.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            code: &self.code,
            addr: 0,
        }
    }
}

/// One decoded entry of a program listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry<'a> {
    pub addr: usize,
    pub opcode: Option<Opcode>,
    pub bytes: &'a [u8],
}

/// Iterator returned by [`Program::instructions`]
pub struct Instructions<'a> {
    code: &'a [u8],
    addr: usize,
}

impl<'a> Iterator for Instructions<'a> {
    type Item = ListingEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let ir = *self.code.get(self.addr)?;
        let opcode = Opcode::from_u8(ir);
        let len = match opcode {
            Some(_) => Decoded::new(ir).size(),
            None => 1,
        };
        let end = (self.addr + len).min(self.code.len());
        let entry = ListingEntry {
            addr: self.addr,
            opcode,
            bytes: &self.code[self.addr..end],
        };
        self.addr = end;
        Some(entry)
    }
}

impl fmt::Display for ListingEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}:", self.addr)?;
        match self.opcode {
            Some(op) => {
                write!(f, " {:<4}", op.mnemonic())?;
                for byte in &self.bytes[1..] {
                    write!(f, " {:02X}", byte)?;
                }
                Ok(())
            }
            None => write!(f, " .byte {:#010b}", self.bytes[0]),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.instructions() {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl From<Vec<u8>> for Program {
    fn from(code: Vec<u8>) -> Self {
        Program::new(code)
    }
}
