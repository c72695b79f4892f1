//! Control flow instruction execution

use crate::config::JumpMode;
use crate::error::VmError;
use crate::opcode::OpCode;
use crate::vm::decode::Instruction;
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;

impl Machine {
    /// Execute control flow instructions
    pub(crate) fn execute_control(
        &mut self,
        instruction: &Instruction,
    ) -> Result<ExecutionResult, VmError> {
        match instruction.opcode {
            OpCode::Hlt => Ok(ExecutionResult::Halt),

            OpCode::Call => {
                let target = self.registers.get(instruction.a()?)?;
                self.push_return_address(instruction)?;
                Ok(ExecutionResult::Jump(target as usize))
            }

            OpCode::Ret => {
                let target = self.pop_value()?;
                Ok(ExecutionResult::Jump(target as usize))
            }

            OpCode::Jmp => self.jump_if(instruction, true),

            OpCode::Jeq => {
                let taken = self.flags.equal();
                self.jump_if(instruction, taken)
            }

            OpCode::Jne => {
                let taken = !self.flags.equal();
                self.jump_if(instruction, taken)
            }

            _ => unreachable!("Non-control opcode in control handler"),
        }
    }

    /// Jump to R[A] when `taken`, otherwise fall through to the next instruction
    fn jump_if(
        &mut self,
        instruction: &Instruction,
        taken: bool,
    ) -> Result<ExecutionResult, VmError> {
        let target = self.registers.get(instruction.a()?)?;
        if !taken {
            return Ok(ExecutionResult::Continue);
        }

        if self.config.jump_mode == JumpMode::PushReturn {
            self.push_return_address(instruction)?;
        }
        Ok(ExecutionResult::Jump(target as usize))
    }

    /// Push the address of the instruction following a one-operand branch
    fn push_return_address(&mut self, instruction: &Instruction) -> Result<(), VmError> {
        let next = instruction.address + instruction.opcode.encoded_len();
        let ret = u8::try_from(next).map_err(|_| VmError::MemoryOutOfBounds { address: next })?;
        self.push_value(ret)
    }
}
