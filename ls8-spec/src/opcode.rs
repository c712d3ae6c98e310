//! # LS-8 Opcode Definitions
//!
//! Every opcode is a full byte whose bits double as decoding metadata:
//!
//! ```text
//! bit:  7 6 | 5 | 4 | 3 2 1 0
//!       AA  | B | C | DDDD
//! ```
//!
//! - `AA`: number of operand bytes that follow (0-2)
//! - `B`: ALU operation
//! - `C`: sets the program counter (branching)
//! - `DDDD`: instruction identifier
//!
//! The packed fields are read by [`crate::encoding`]; this module only names
//! the byte values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding;

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== System ==========
    /// HLT: stop the machine
    Hlt = 0b0000_0001,
    /// LDI: reg[a] = imm
    Ldi = 0b1000_0010,
    /// PRN: print reg[a]
    Prn = 0b0100_0111,

    // ========== ALU ==========
    /// ADD: reg[a] = reg[a] + reg[b]
    Add = 0b1010_0000,
    /// MUL: reg[a] = reg[a] * reg[b]
    Mul = 0b1010_0010,
    /// CMP: compare reg[a] with reg[b], set flags
    Cmp = 0b1010_0111,

    // ========== Stack ==========
    /// PUSH: sp -= 1; mem[sp] = reg[a]
    Push = 0b0100_0101,
    /// POP: reg[a] = mem[sp]; sp += 1
    Pop = 0b0100_0110,

    // ========== Subroutines ==========
    /// CALL: push return address; pc = reg[a]
    Call = 0b0101_0000,
    /// RET: pc = pop()
    Ret = 0b0001_0001,

    // ========== Jumps ==========
    /// JMP: pc = reg[a]
    Jmp = 0b0101_0100,
    /// JEQ: if E flag, pc = reg[a]
    Jeq = 0b0101_0101,
    /// JNE: if !E flag, pc = reg[a]
    Jne = 0b0101_0110,
}

impl Opcode {
    /// All defined opcodes, in table order
    pub const ALL: [Opcode; 13] = [
        Opcode::Hlt,
        Opcode::Ldi,
        Opcode::Prn,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Cmp,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0b0000_0001 => Some(Opcode::Hlt),
            0b1000_0010 => Some(Opcode::Ldi),
            0b0100_0111 => Some(Opcode::Prn),

            0b1010_0000 => Some(Opcode::Add),
            0b1010_0010 => Some(Opcode::Mul),
            0b1010_0111 => Some(Opcode::Cmp),

            0b0100_0101 => Some(Opcode::Push),
            0b0100_0110 => Some(Opcode::Pop),

            0b0101_0000 => Some(Opcode::Call),
            0b0001_0001 => Some(Opcode::Ret),

            0b0101_0100 => Some(Opcode::Jmp),
            0b0101_0101 => Some(Opcode::Jeq),
            0b0101_0110 => Some(Opcode::Jne),

            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Number of operand bytes following the opcode
    #[inline]
    pub fn operand_count(self) -> u8 {
        encoding::operand_count(self.to_u8())
    }

    /// Whether the handler sets the program counter itself
    #[inline]
    pub fn is_branching(self) -> bool {
        encoding::is_branching(self.to_u8())
    }

    /// Whether this is an ALU instruction
    #[inline]
    pub fn is_alu(self) -> bool {
        encoding::is_alu(self.to_u8())
    }

    /// Get the instruction mnemonic (upper case)
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
        }
    }

    /// Look up an opcode by mnemonic (case-insensitive)
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl TryFrom<u8> for Opcode {
    type Error = crate::Ls8Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Opcode::from_u8(value).ok_or(crate::Ls8Error::InvalidOpcode(value))
    }
}
