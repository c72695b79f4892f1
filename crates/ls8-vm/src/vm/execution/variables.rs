//! Register load execution

use crate::error::VmError;
use crate::opcode::OpCode;
use crate::vm::decode::Instruction;
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;

impl Machine {
    /// Execute register load instructions
    pub(crate) fn execute_variables(
        &mut self,
        instruction: &Instruction,
    ) -> Result<ExecutionResult, VmError> {
        match instruction.opcode {
            OpCode::Ldi => {
                let reg = instruction.a()?;
                let imm = instruction.b()?;
                self.write_register(reg, imm)?;
                Ok(ExecutionResult::Continue)
            }

            _ => unreachable!("Non-load opcode in variables handler"),
        }
    }
}
