//! ALU instruction execution

use crate::error::VmError;
use crate::vm::alu::{AluOp, AluOutcome};
use crate::vm::decode::Instruction;
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;

impl Machine {
    /// Execute ADD, MUL and CMP
    pub(crate) fn execute_arithmetic(
        &mut self,
        instruction: &Instruction,
    ) -> Result<ExecutionResult, VmError> {
        let opcode = instruction.opcode.as_u8();
        let op = AluOp::from_opcode(opcode).ok_or(VmError::UnsupportedAluOperation {
            opcode,
            pc: instruction.address,
        })?;

        let a = instruction.a()?;
        let b = instruction.b()?;
        let left = self.registers.get(a)?;
        let right = self.registers.get(b)?;

        match op.apply(left, right, self.config.overflow)? {
            AluOutcome::Value(value) => self.write_register(a, value)?,
            AluOutcome::Flags(flags) => self.flags = flags,
        }
        Ok(ExecutionResult::Continue)
    }
}
