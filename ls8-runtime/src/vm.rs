//! Virtual Machine for LS-8

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::io::IOHandler;
use crate::memory::Memory;
use crate::state::{HaltReason, VMState};
use ls8_spec::{Decoded, Opcode, Program};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// VM configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VMConfig {
    /// Stop after this many instructions. `None` runs until HLT or a fault.
    pub max_cycles: Option<u64>,

    /// Emit a `trace` event for every instruction
    pub trace: bool,
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of instructions executed
    pub cycles: u64,

    /// Values printed by PRN, in order
    pub outputs: Vec<u8>,

    /// Reason for halting
    pub halt_reason: HaltReason,
}

/// LS-8 Virtual Machine
#[derive(Debug)]
pub struct VM {
    /// VM state (registers, memory, PC, etc.)
    state: VMState,

    /// I/O handler
    io: IOHandler,

    /// Configuration
    config: VMConfig,
}

impl VM {
    /// Create a new VM that records output without echoing it
    pub fn new(program: Program, config: VMConfig) -> Result<Self> {
        Self::with_io(program, IOHandler::new(), config)
    }

    /// Create a new VM with a caller-supplied I/O handler
    pub fn with_io(program: Program, io: IOHandler, config: VMConfig) -> Result<Self> {
        let mut state = VMState::new();
        state.memory.load_program(&program)?;
        tracing::debug!(bytes = program.len(), "program loaded");

        Ok(Self { state, io, config })
    }

    /// Run the VM until halt.
    ///
    /// A fault stops the run and is returned as the error. The state keeps
    /// the non-graceful [`HaltReason`] recorded by [`VM::step`].
    pub fn run(&mut self) -> Result<ExecutionResult> {
        while self.state.running {
            if let Some(limit) = self.config.max_cycles {
                if self.state.cycles >= limit {
                    self.state.halt(HaltReason::CycleLimit);
                    break;
                }
            }

            self.step()?;
        }

        self.io.flush()?;

        let halt_reason = self.state.halt_reason.clone().unwrap_or(HaltReason::Halt);
        tracing::debug!(cycles = self.state.cycles, reason = ?halt_reason, "halted");

        Ok(ExecutionResult {
            cycles: self.state.cycles,
            outputs: self.io.outputs().to_vec(),
            halt_reason,
        })
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// Does nothing once the machine has halted. A fault halts the machine
    /// with the matching [`HaltReason`] before the error is returned.
    pub fn step(&mut self) -> Result<()> {
        if self.state.is_halted() {
            return Ok(());
        }

        if let Err(err) = self.try_step() {
            self.state.fault(&err);
            tracing::debug!(pc = self.state.pc, error = %err, "faulted");
            return Err(err);
        }
        Ok(())
    }

    fn try_step(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let (opcode, decoded, operands) = self.fetch_and_decode()?;

        if self.config.trace {
            tracing::trace!("{}", self.trace_line(decoded.ir, operands));
        }

        execute(opcode, operands, &mut self.state, &mut self.io)?;

        if !decoded.is_branching {
            self.state.pc = pc + decoded.size();
        }

        self.state.inc_cycles();
        Ok(())
    }

    /// Fetch and decode instruction at PC
    fn fetch_and_decode(&self) -> Result<(Opcode, Decoded, [u8; 2])> {
        let pc = self.state.pc;
        let ir = self.state.memory.read(pc)?;
        let opcode =
            Opcode::from_u8(ir).ok_or(RuntimeError::IllegalInstruction { pc, opcode: ir })?;
        let decoded = Decoded::new(ir);

        let mut operands = [0u8; 2];
        for (i, slot) in operands
            .iter_mut()
            .enumerate()
            .take(decoded.operand_count as usize)
        {
            *slot = self.state.memory.read(pc + 1 + i)?;
        }

        Ok((opcode, decoded, operands))
    }

    fn trace_line(&self, ir: u8, operands: [u8; 2]) -> String {
        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} | {} |",
            self.state.pc, ir, operands[0], operands[1], self.state.flags
        );
        for reg in self.state.registers {
            let _ = write!(line, " {:02X}", reg);
        }
        line
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }

    /// Get memory (for debugging)
    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    pub fn outputs(&self) -> &[u8] {
        self.io.outputs()
    }
}
