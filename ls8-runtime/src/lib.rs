//! # LS-8 Runtime
//!
//! Execute LS-8 programs.
//!
//! The runtime owns a 256-byte memory and an eight-register file and drives
//! a fetch/decode/execute loop until the program halts or faults.
//!
//! ## Features
//!
//! - **13 instructions**: HLT, LDI, PRN, ADD, MUL, CMP, PUSH, POP, CALL, RET,
//!   JMP, JEQ, JNE
//! - **8 registers**: R0-R7, with R7 as the stack pointer
//! - **Checked memory**: out-of-range accesses fault instead of wrapping
//! - **Typed faults**: illegal opcodes end the run with an error the caller
//!   can tell apart from a HLT
//!
//! ## Example
//!
//! ```rust
//! use ls8_runtime::{VM, VMConfig};
//! use ls8_spec::Program;
//!
//! // LDI R0,8; PRN R0; HLT
//! let program = Program::new(vec![0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]);
//! let mut vm = VM::new(program, VMConfig::default()).unwrap();
//! let result = vm.run().unwrap();
//! assert_eq!(result.outputs, vec![8]);
//! ```

pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod state;
pub mod vm;

pub use error::RuntimeError;
pub use execute::{execute, handler, Handler};
pub use io::IOHandler;
pub use memory::Memory;
pub use state::{Flags, HaltReason, VMState};
pub use vm::{ExecutionResult, VMConfig, VM};

/// Simple execution helper
///
/// Runs a program with the default configuration and returns the outputs.
pub fn run(program: ls8_spec::Program) -> Result<Vec<u8>, RuntimeError> {
    let mut vm = VM::new(program, VMConfig::default())?;
    Ok(vm.run()?.outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls8_spec::Program;

    #[test]
    fn test_public_exports() {
        let _ = VMConfig::default();
        let _ = HaltReason::Halt;
        let _ = Memory::new();
        let _ = Flags::default();
        let _ = IOHandler::new();
    }

    #[test]
    fn test_run_helper() {
        let program = Program::new(vec![0b1000_0010, 1, 5, 0b0100_0111, 1, 0b0000_0001]);
        assert_eq!(run(program).unwrap(), vec![5]);
    }

    #[test]
    fn test_run_helper_propagates_faults() {
        let program = Program::new(vec![0b0000_0000]);
        assert!(matches!(
            run(program),
            Err(RuntimeError::IllegalInstruction { pc: 0, opcode: 0 })
        ));
    }
}
