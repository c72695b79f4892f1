//! Stack instruction execution

use crate::error::VmError;
use crate::opcode::OpCode;
use crate::registers::SP;
use crate::vm::decode::Instruction;
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;

impl Machine {
    /// Execute PUSH and POP
    pub(crate) fn execute_stack(
        &mut self,
        instruction: &Instruction,
    ) -> Result<ExecutionResult, VmError> {
        let reg = instruction.a()?;

        match instruction.opcode {
            OpCode::Push => {
                let value = self.registers.get(reg)?;
                self.push_value(value)?;
                Ok(ExecutionResult::Continue)
            }

            OpCode::Pop => {
                // Validate the destination before touching SP
                self.registers.get(reg)?;
                let value = self.pop_value()?;
                self.write_register(reg, value)?;
                Ok(ExecutionResult::Continue)
            }

            _ => unreachable!("Non-stack opcode in stack handler"),
        }
    }

    /// Register write from an instruction; writing R7 rebases the stack
    pub(crate) fn write_register(&mut self, idx: u8, value: u8) -> Result<(), VmError> {
        self.registers.set(idx, value)?;
        if idx == SP {
            self.stack_base = value;
        }
        Ok(())
    }

    /// SP -= 1; M[SP] = value
    pub(crate) fn push_value(&mut self, value: u8) -> Result<(), VmError> {
        let sp = self.registers.sp();
        if sp <= self.config.stack_limit {
            return Err(VmError::StackOverflow { sp });
        }

        let sp = sp - 1;
        self.memory.write(sp as usize, value)?;
        self.registers.set_sp(sp);
        Ok(())
    }

    /// value = M[SP]; SP += 1
    pub(crate) fn pop_value(&mut self) -> Result<u8, VmError> {
        let sp = self.registers.sp();
        if sp >= self.stack_base {
            return Err(VmError::StackUnderflow { sp });
        }

        let value = self.memory.read(sp as usize)?;
        self.registers.set_sp(sp + 1);
        Ok(value)
    }
}
