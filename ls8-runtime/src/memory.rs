//! Memory subsystem
//!
//! 256 flat byte cells holding code, data and the stack. Every access is
//! bounds checked; an address past the end is an [`RuntimeError::OutOfBounds`]
//! fault rather than a clamp or a wrap.

use crate::error::{Result, RuntimeError};
use ls8_spec::{Program, LOAD_BASE, MEMORY_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            data: [0; MEMORY_SIZE],
        }
    }

    #[inline]
    pub fn read(&self, addr: usize) -> Result<u8> {
        self.data
            .get(addr)
            .copied()
            .ok_or(RuntimeError::OutOfBounds { address: addr })
    }

    #[inline]
    pub fn write(&mut self, addr: usize, value: u8) -> Result<()> {
        let cell = self
            .data
            .get_mut(addr)
            .ok_or(RuntimeError::OutOfBounds { address: addr })?;
        *cell = value;
        Ok(())
    }

    /// Copy a program image into memory starting at address 0.
    ///
    /// Opcodes are not validated here; bad bytes surface at dispatch.
    pub fn load_program(&mut self, program: &Program) -> Result<()> {
        program.validate()?;
        self.data[LOAD_BASE..LOAD_BASE + program.len()].copy_from_slice(&program.code);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> usize {
        MEMORY_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
