//! Instruction fetch and decode

use crate::error::VmError;
use crate::opcode::{instruction, OpCode};
use crate::vm::Machine;

/// A decoded instruction with its fixed-width operand lookahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Instruction {
    pub opcode: OpCode,
    /// Address the opcode was fetched from
    pub address: usize,
    /// The two bytes after the opcode; `None` past the end of memory
    pub operands: [Option<u8>; 2],
}

impl Instruction {
    /// Operand byte `idx`; fails only if the instruction actually needs a
    /// byte that lies outside memory
    #[inline]
    pub fn operand(&self, idx: usize) -> Result<u8, VmError> {
        self.operands[idx].ok_or(VmError::MemoryOutOfBounds {
            address: self.address + 1 + idx,
        })
    }

    #[inline]
    pub fn a(&self) -> Result<u8, VmError> {
        self.operand(0)
    }

    #[inline]
    pub fn b(&self) -> Result<u8, VmError> {
        self.operand(1)
    }
}

/// Map an opcode byte onto the instruction table
pub(crate) fn decode(byte: u8, pc: usize) -> Result<OpCode, VmError> {
    match OpCode::from_u8(byte) {
        Some(opcode) => Ok(opcode),
        None if instruction::is_alu(byte) => {
            Err(VmError::UnsupportedAluOperation { opcode: byte, pc })
        }
        None => Err(VmError::IllegalInstruction { opcode: byte, pc }),
    }
}

impl Machine {
    /// Read the opcode at PC plus two lookahead bytes and decode it
    pub(crate) fn fetch(&self) -> Result<Instruction, VmError> {
        let pc = self.pc;
        let byte = self.memory.read(pc)?;
        let operands = [self.memory.peek(pc + 1), self.memory.peek(pc + 2)];

        Ok(Instruction {
            opcode: decode(byte, pc)?,
            address: pc,
            operands,
        })
    }
}
