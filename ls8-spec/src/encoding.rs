//! # Instruction Encoding Constants and Helpers
//!
//! Decoding metadata packed into the opcode byte.
//!
//! ## Instruction Format
//!
//! ```text
//! [opcode:8] [operand a:8]? [operand b:8]?
//!
//! opcode = [operands:2][alu:1][sets_pc:1][id:4]
//! ```

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Operand count field: bits 6-7 (2 bits)
pub const OPERANDS_SHIFT: u8 = 6;

/// ALU flag: bit 5
pub const ALU_SHIFT: u8 = 5;

/// Sets-PC flag: bit 4
pub const SETS_PC_SHIFT: u8 = 4;

// ============================================================================
// Field Masks
// ============================================================================

/// Instruction identifier mask (4 bits)
pub const ID_MASK: u8 = 0x0F;

/// Largest operand count the 2-bit field can encode
pub const MAX_OPERANDS: usize = 3;

// ============================================================================
// Field Extraction Functions
// ============================================================================

/// Number of operand bytes that follow the opcode (bits 6-7)
#[inline]
pub const fn operand_count(ir: u8) -> u8 {
    ir >> OPERANDS_SHIFT
}

/// Whether the instruction sets the program counter itself (bit 4)
#[inline]
pub const fn is_branching(ir: u8) -> bool {
    (ir >> SETS_PC_SHIFT) & 1 == 1
}

/// Whether the instruction is handled by the ALU (bit 5)
#[inline]
pub const fn is_alu(ir: u8) -> bool {
    (ir >> ALU_SHIFT) & 1 == 1
}

/// Instruction identifier (bits 0-3)
#[inline]
pub const fn instruction_id(ir: u8) -> u8 {
    ir & ID_MASK
}

/// Total instruction length in bytes, opcode included
#[inline]
pub const fn instruction_len(ir: u8) -> usize {
    operand_count(ir) as usize + 1
}

/// Decoded view of an opcode byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub ir: u8,
    pub operand_count: u8,
    pub is_branching: bool,
}

impl Decoded {
    #[inline]
    pub const fn new(ir: u8) -> Self {
        Self {
            ir,
            operand_count: operand_count(ir),
            is_branching: is_branching(ir),
        }
    }

    /// Distance to the next instruction when the PC is not set by the handler
    #[inline]
    pub const fn size(&self) -> usize {
        self.operand_count as usize + 1
    }
}
