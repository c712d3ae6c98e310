//! Instruction execution for LS-8
//!
//! Each opcode maps to one handler through [`handler`]. Handlers receive the
//! two raw operand bytes; bytes past the instruction's operand count are 0.
//! Branching handlers own the program counter, every other handler leaves it
//! to the fetch loop.

use crate::error::Result;
use crate::io::IOHandler;
use crate::state::{Flags, HaltReason, VMState};
use ls8_spec::Opcode;
use std::cmp::Ordering;

/// Instruction handler
pub type Handler = fn(&mut VMState, &mut IOHandler, u8, u8) -> Result<()>;

/// Dispatch table
pub fn handler(opcode: Opcode) -> Handler {
    match opcode {
        Opcode::Hlt => hlt,
        Opcode::Ldi => ldi,
        Opcode::Prn => prn,
        Opcode::Add => add,
        Opcode::Mul => mul,
        Opcode::Cmp => cmp,
        Opcode::Push => push,
        Opcode::Pop => pop,
        Opcode::Call => call,
        Opcode::Ret => ret,
        Opcode::Jmp => jmp,
        Opcode::Jeq => jeq,
        Opcode::Jne => jne,
    }
}

/// Execute single instruction
pub fn execute(
    opcode: Opcode,
    operands: [u8; 2],
    state: &mut VMState,
    io: &mut IOHandler,
) -> Result<()> {
    let [a, b] = operands;
    handler(opcode)(state, io, a, b)
}

// ========== System ==========

fn hlt(state: &mut VMState, _io: &mut IOHandler, _a: u8, _b: u8) -> Result<()> {
    state.halt(HaltReason::Halt);
    Ok(())
}

fn ldi(state: &mut VMState, _io: &mut IOHandler, a: u8, b: u8) -> Result<()> {
    let rd = state.reg(a)?;
    state.write_reg(rd, b);
    Ok(())
}

fn prn(state: &mut VMState, io: &mut IOHandler, a: u8, _b: u8) -> Result<()> {
    let rs = state.reg(a)?;
    io.write(state.read_reg(rs))?;
    Ok(())
}

// ========== ALU ==========

fn alu(state: &mut VMState, a: u8, b: u8, op: fn(u8, u8) -> u8) -> Result<()> {
    let rd = state.reg(a)?;
    let rs = state.reg(b)?;
    let result = op(state.read_reg(rd), state.read_reg(rs));
    state.write_reg(rd, result);
    Ok(())
}

fn add(state: &mut VMState, _io: &mut IOHandler, a: u8, b: u8) -> Result<()> {
    alu(state, a, b, u8::wrapping_add)
}

fn mul(state: &mut VMState, _io: &mut IOHandler, a: u8, b: u8) -> Result<()> {
    alu(state, a, b, u8::wrapping_mul)
}

// Sets one flag; the other two keep whatever an earlier CMP left there.
fn cmp(state: &mut VMState, _io: &mut IOHandler, a: u8, b: u8) -> Result<()> {
    let lhs = state.read_reg(state.reg(a)?);
    let rhs = state.read_reg(state.reg(b)?);
    let bit = match lhs.cmp(&rhs) {
        Ordering::Less => Flags::LESS,
        Ordering::Greater => Flags::GREATER,
        Ordering::Equal => Flags::EQUAL,
    };
    state.flags.set(bit);
    Ok(())
}

// ========== Stack ==========

fn push(state: &mut VMState, _io: &mut IOHandler, a: u8, _b: u8) -> Result<()> {
    let rs = state.reg(a)?;
    state.push(state.read_reg(rs))
}

fn pop(state: &mut VMState, _io: &mut IOHandler, a: u8, _b: u8) -> Result<()> {
    let rd = state.reg(a)?;
    let value = state.pop()?;
    state.write_reg(rd, value);
    Ok(())
}

// ========== Subroutines ==========

fn call(state: &mut VMState, _io: &mut IOHandler, a: u8, _b: u8) -> Result<()> {
    let target = state.read_reg(state.reg(a)?);
    let return_addr = state.pc + 2;
    let return_byte = u8::try_from(return_addr)
        .map_err(|_| crate::RuntimeError::OutOfBounds { address: return_addr })?;
    state.push(return_byte)?;
    state.pc = target as usize;
    Ok(())
}

fn ret(state: &mut VMState, _io: &mut IOHandler, _a: u8, _b: u8) -> Result<()> {
    state.pc = state.pop()? as usize;
    Ok(())
}

// ========== Jumps ==========

fn jmp(state: &mut VMState, _io: &mut IOHandler, a: u8, _b: u8) -> Result<()> {
    state.pc = state.read_reg(state.reg(a)?) as usize;
    Ok(())
}

fn jump_if(state: &mut VMState, a: u8, taken: bool) -> Result<()> {
    if taken {
        state.pc = state.read_reg(state.reg(a)?) as usize;
    } else {
        state.pc += 2;
    }
    Ok(())
}

fn jeq(state: &mut VMState, _io: &mut IOHandler, a: u8, _b: u8) -> Result<()> {
    let taken = state.flags.equal();
    jump_if(state, a, taken)
}

fn jne(state: &mut VMState, _io: &mut IOHandler, a: u8, _b: u8) -> Result<()> {
    let taken = !state.flags.equal();
    jump_if(state, a, taken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeError;
    use ls8_spec::Register;

    fn setup() -> (VMState, IOHandler) {
        (VMState::new(), IOHandler::new())
    }

    fn run(op: Opcode, a: u8, b: u8, state: &mut VMState, io: &mut IOHandler) {
        execute(op, [a, b], state, io).unwrap();
    }

    #[test]
    fn test_hlt() {
        let (mut state, mut io) = setup();
        run(Opcode::Hlt, 0, 0, &mut state, &mut io);
        assert!(!state.running);
        assert_eq!(state.halt_reason, Some(HaltReason::Halt));
    }

    #[test]
    fn test_ldi() {
        let (mut state, mut io) = setup();
        run(Opcode::Ldi, 3, 42, &mut state, &mut io);
        assert_eq!(state.read_reg(Register::R3), 42);
        assert_eq!(state.pc, 0);
    }

    #[test]
    fn test_prn() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R1, 77);
        run(Opcode::Prn, 1, 0, &mut state, &mut io);
        assert_eq!(io.outputs(), &[77]);
    }

    #[test]
    fn test_add_wraps() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R0, 200);
        state.write_reg(Register::R1, 100);
        run(Opcode::Add, 0, 1, &mut state, &mut io);
        assert_eq!(state.read_reg(Register::R0), 44);
        assert_eq!(state.read_reg(Register::R1), 100);
    }

    #[test]
    fn test_mul_wraps() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R0, 16);
        state.write_reg(Register::R1, 17);
        run(Opcode::Mul, 0, 1, &mut state, &mut io);
        assert_eq!(state.read_reg(Register::R0), (16u16 * 17 % 256) as u8);
    }

    #[test]
    fn test_add_same_register() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R2, 21);
        run(Opcode::Add, 2, 2, &mut state, &mut io);
        assert_eq!(state.read_reg(Register::R2), 42);
    }

    #[test]
    fn test_cmp_sets_one_flag() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R0, 1);
        state.write_reg(Register::R1, 2);
        run(Opcode::Cmp, 0, 1, &mut state, &mut io);
        assert_eq!(state.flags.bits(), Flags::LESS);

        let (mut state, mut io) = setup();
        state.write_reg(Register::R0, 3);
        state.write_reg(Register::R1, 2);
        run(Opcode::Cmp, 0, 1, &mut state, &mut io);
        assert_eq!(state.flags.bits(), Flags::GREATER);

        let (mut state, mut io) = setup();
        run(Opcode::Cmp, 0, 1, &mut state, &mut io);
        assert_eq!(state.flags.bits(), Flags::EQUAL);
    }

    #[test]
    fn test_cmp_does_not_clear_previous_flags() {
        let (mut state, mut io) = setup();
        run(Opcode::Cmp, 0, 1, &mut state, &mut io);
        state.write_reg(Register::R1, 9);
        run(Opcode::Cmp, 0, 1, &mut state, &mut io);
        assert!(state.flags.equal());
        assert!(state.flags.less());
    }

    #[test]
    fn test_push_pop() {
        let (mut state, mut io) = setup();
        state.set_sp(0xF4);
        state.write_reg(Register::R0, 99);
        run(Opcode::Push, 0, 0, &mut state, &mut io);
        assert_eq!(state.sp(), 0xF3);
        assert_eq!(state.memory.read(0xF3).unwrap(), 99);

        run(Opcode::Pop, 4, 0, &mut state, &mut io);
        assert_eq!(state.read_reg(Register::R4), 99);
        assert_eq!(state.sp(), 0xF4);
    }

    #[test]
    fn test_call_pushes_return_address() {
        let (mut state, mut io) = setup();
        state.set_sp(0xF4);
        state.pc = 0x10;
        state.write_reg(Register::R1, 0x40);
        run(Opcode::Call, 1, 0, &mut state, &mut io);
        assert_eq!(state.pc, 0x40);
        assert_eq!(state.sp(), 0xF3);
        assert_eq!(state.memory.read(0xF3).unwrap(), 0x12);

        run(Opcode::Ret, 0, 0, &mut state, &mut io);
        assert_eq!(state.pc, 0x12);
        assert_eq!(state.sp(), 0xF4);
    }

    #[test]
    fn test_call_return_address_past_memory() {
        let (mut state, mut io) = setup();
        state.pc = 0xFE;
        let err = execute(Opcode::Call, [0, 0], &mut state, &mut io).unwrap_err();
        assert!(matches!(err, RuntimeError::OutOfBounds { address: 0x100 }));
    }

    #[test]
    fn test_jmp() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R2, 0x20);
        run(Opcode::Jmp, 2, 0, &mut state, &mut io);
        assert_eq!(state.pc, 0x20);
    }

    #[test]
    fn test_jeq_taken_and_not_taken() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R2, 0x20);
        state.pc = 5;
        run(Opcode::Jeq, 2, 0, &mut state, &mut io);
        assert_eq!(state.pc, 7);

        state.flags.set(Flags::EQUAL);
        run(Opcode::Jeq, 2, 0, &mut state, &mut io);
        assert_eq!(state.pc, 0x20);
    }

    #[test]
    fn test_jne_taken_and_not_taken() {
        let (mut state, mut io) = setup();
        state.write_reg(Register::R2, 0x30);
        run(Opcode::Jne, 2, 0, &mut state, &mut io);
        assert_eq!(state.pc, 0x30);

        state.flags.set(Flags::EQUAL);
        run(Opcode::Jne, 2, 0, &mut state, &mut io);
        assert_eq!(state.pc, 0x32);
    }

    #[test]
    fn test_invalid_register_operand() {
        let (mut state, mut io) = setup();
        let err = execute(Opcode::Ldi, [8, 1], &mut state, &mut io).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidRegister { index: 8, .. }));

        let err = execute(Opcode::Add, [0, 200], &mut state, &mut io).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidRegister { index: 200, .. }));
        assert_eq!(state.registers, [0; 8]);
    }

    #[test]
    fn test_every_opcode_has_handler() {
        for op in Opcode::ALL {
            let _ = handler(op);
        }
    }
}
