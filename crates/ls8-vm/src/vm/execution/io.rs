//! Output instruction execution

use crate::error::VmError;
use crate::opcode::OpCode;
use crate::vm::decode::Instruction;
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;
use std::io::Write;

impl Machine {
    /// Execute output instructions
    pub(crate) fn execute_io(
        &mut self,
        instruction: &Instruction,
        out: &mut dyn Write,
    ) -> Result<ExecutionResult, VmError> {
        match instruction.opcode {
            OpCode::Prn => {
                let value = self.registers.get(instruction.a()?)?;
                writeln!(out, "{}", value)?;
                Ok(ExecutionResult::Continue)
            }

            _ => unreachable!("Non-output opcode in io handler"),
        }
    }
}
