//! VM state for LS-8

use crate::error::{Result, RuntimeError};
use crate::memory::Memory;
use ls8_spec::{Register, NUM_REGISTERS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison flags, laid out as `00000LGE`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags(u8);

impl Flags {
    pub const LESS: u8 = 0b0000_0100;
    pub const GREATER: u8 = 0b0000_0010;
    pub const EQUAL: u8 = 0b0000_0001;

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Set a flag bit. Other bits are left as they are.
    #[inline]
    pub fn set(&mut self, bit: u8) {
        self.0 |= bit;
    }

    #[inline]
    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    #[inline]
    pub fn less(self) -> bool {
        self.contains(Self::LESS)
    }

    #[inline]
    pub fn greater(self) -> bool {
        self.contains(Self::GREATER)
    }

    #[inline]
    pub fn equal(self) -> bool {
        self.contains(Self::EQUAL)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.less() { 'L' } else { '-' },
            if self.greater() { 'G' } else { '-' },
            if self.equal() { 'E' } else { '-' },
        )
    }
}

/// VM state
#[derive(Debug, Clone)]
pub struct VMState {
    /// Registers (r0-r7), r7 is the stack pointer
    pub registers: [u8; NUM_REGISTERS],

    /// Comparison flags
    pub flags: Flags,

    /// Program counter
    pub pc: usize,

    /// Memory
    pub memory: Memory,

    /// Instructions executed
    pub cycles: u64,

    /// Cleared by HLT or a fault
    pub running: bool,

    /// Halt reason
    pub halt_reason: Option<HaltReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// Normal HLT instruction
    Halt,
    /// Configured cycle limit reached
    CycleLimit,
    /// Opcode with no handler
    InvalidInstruction { pc: usize, opcode: u8 },
    /// Address outside memory
    MemoryError { address: usize },
    /// Register operand outside r0-r7
    InvalidRegister { pc: usize, index: u8 },
    /// Output could not be written
    OutputError,
}

impl HaltReason {
    /// True only for a halt requested by the program
    pub fn is_graceful(&self) -> bool {
        matches!(self, HaltReason::Halt)
    }

    /// Halt reason for an error raised while executing.
    ///
    /// `None` for errors that can only happen before the first instruction,
    /// such as a rejected program image.
    pub fn from_fault(err: &RuntimeError) -> Option<Self> {
        match err {
            RuntimeError::IllegalInstruction { pc, opcode } => Some(HaltReason::InvalidInstruction {
                pc: *pc,
                opcode: *opcode,
            }),
            RuntimeError::OutOfBounds { address } => {
                Some(HaltReason::MemoryError { address: *address })
            }
            RuntimeError::InvalidRegister { pc, index } => Some(HaltReason::InvalidRegister {
                pc: *pc,
                index: *index,
            }),
            RuntimeError::IoError(_) => Some(HaltReason::OutputError),
            RuntimeError::SpecError(_) => None,
        }
    }
}

impl VMState {
    pub fn new() -> Self {
        VMState {
            registers: [0; NUM_REGISTERS],
            flags: Flags::default(),
            pc: 0,
            memory: Memory::new(),
            cycles: 0,
            running: true,
            halt_reason: None,
        }
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> u8 {
        self.registers[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: u8) {
        self.registers[reg.index()] = value;
    }

    /// Resolve a raw operand byte to a register
    #[inline]
    pub fn reg(&self, index: u8) -> Result<Register> {
        Register::from_index(index).ok_or(RuntimeError::InvalidRegister { pc: self.pc, index })
    }

    /// Stack pointer. r7 is the only copy.
    #[inline]
    pub fn sp(&self) -> u8 {
        self.read_reg(Register::SP)
    }

    #[inline]
    pub fn set_sp(&mut self, value: u8) {
        self.write_reg(Register::SP, value);
    }

    /// Decrement sp, then store at the new top of stack
    pub fn push(&mut self, value: u8) -> Result<()> {
        let sp = self.sp().wrapping_sub(1);
        self.set_sp(sp);
        self.memory.write(sp as usize, value)
    }

    /// Load the top of stack, then increment sp
    pub fn pop(&mut self) -> Result<u8> {
        let sp = self.sp();
        let value = self.memory.read(sp as usize)?;
        self.set_sp(sp.wrapping_add(1));
        Ok(value)
    }

    pub fn inc_cycles(&mut self) {
        self.cycles += 1;
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        !self.running
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.running = false;
        self.halt_reason = Some(reason);
    }

    /// Stop after an execution error
    pub fn fault(&mut self, err: &RuntimeError) {
        self.running = false;
        self.halt_reason = HaltReason::from_fault(err);
    }
}

impl Default for VMState {
    fn default() -> Self {
        Self::new()
    }
}
