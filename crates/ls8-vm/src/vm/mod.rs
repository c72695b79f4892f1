//! Virtual Machine implementation

use crate::config::MachineConfig;
use crate::error::VmError;
use crate::memory::Memory;
use crate::opcode::OpCode;
use crate::registers::{Flags, RegisterFile, REGISTER_COUNT};
use ls8_parser::Program;
use std::io::Write;

// Module structure
mod alu;
mod decode;
mod execution;
mod result;
mod state;
mod trace;

// Re-export public types
pub use alu::{AluOp, AluOutcome};
pub use result::{Halt, HaltReason, Step};
pub use state::MachineState;
pub use trace::Trace;

// Internal imports
use decode::Instruction;
use result::ExecutionResult;

/// LS-8 machine: memory, registers, flags and the execution loop
pub struct Machine {
    pub(crate) memory: Memory,
    pub(crate) registers: RegisterFile,
    /// SP of an empty stack; moves when an instruction writes R7 directly
    pub(crate) stack_base: u8,
    pub(crate) pc: usize,
    pub(crate) flags: Flags,
    pub(crate) config: MachineConfig,

    /// Instructions executed so far
    cycles: u64,

    /// Destination for trace lines; stderr when unset
    trace_sink: Option<Box<dyn Write>>,
}

impl Machine {
    /// Create a machine with the default configuration
    pub fn new() -> Self {
        Self::build(MachineConfig::default())
    }

    /// Create a machine after validating `config`
    pub fn with_config(config: MachineConfig) -> Result<Self, VmError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MachineConfig) -> Self {
        Self {
            memory: Memory::new(),
            registers: RegisterFile::new(config.stack_top),
            stack_base: config.stack_top,
            pc: 0,
            flags: Flags::default(),
            config,
            cycles: 0,
            trace_sink: None,
        }
    }

    /// Write a raw program image at address 0
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), VmError> {
        self.memory.load(bytes)
    }

    /// Write a parsed program at address 0
    pub fn load_program(&mut self, program: &Program) -> Result<(), VmError> {
        self.load(program.bytes())
    }

    /// Send trace lines to `sink` instead of stderr
    pub fn set_trace_sink(&mut self, sink: Box<dyn Write>) {
        self.trace_sink = Some(sink);
    }

    /// Run until HLT or the cycle limit, writing PRN output to `out`
    pub fn run(&mut self, out: &mut dyn Write) -> Result<Halt, VmError> {
        let reason = loop {
            if let Some(limit) = self.config.max_cycles {
                if self.cycles >= limit {
                    break HaltReason::CycleLimit;
                }
            }

            if let Step::Halted = self.step(out)? {
                break HaltReason::Halted;
            }
        };

        out.flush()?;
        Ok(Halt {
            reason,
            pc: self.pc,
            cycles: self.cycles,
        })
    }

    /// Fetch, decode and execute a single instruction
    pub fn step(&mut self, out: &mut dyn Write) -> Result<Step, VmError> {
        if self.config.trace {
            self.emit_trace()?;
        }

        // Fetch
        let instruction = self.fetch()?;
        self.cycles += 1;

        // Execute, then advance PC unless the instruction already set it
        match self.execute_instruction(&instruction, out)? {
            ExecutionResult::Continue => {
                self.pc = instruction.address + instruction.opcode.encoded_len();
                Ok(Step::Continue)
            }
            ExecutionResult::Jump(target) => {
                self.pc = target;
                Ok(Step::Continue)
            }
            ExecutionResult::Halt => Ok(Step::Halted),
        }
    }

    /// Execute a single instruction
    fn execute_instruction(
        &mut self,
        instruction: &Instruction,
        out: &mut dyn Write,
    ) -> Result<ExecutionResult, VmError> {
        match instruction.opcode {
            // Register loads
            OpCode::Ldi => self.execute_variables(instruction),

            // ALU
            OpCode::Add | OpCode::Mul | OpCode::Cmp => self.execute_arithmetic(instruction),

            // Stack
            OpCode::Push | OpCode::Pop => self.execute_stack(instruction),

            // Control flow
            OpCode::Hlt
            | OpCode::Call
            | OpCode::Ret
            | OpCode::Jmp
            | OpCode::Jeq
            | OpCode::Jne => self.execute_control(instruction),

            // Output
            OpCode::Prn => self.execute_io(instruction, out),
        }
    }

    fn emit_trace(&mut self) -> Result<(), VmError> {
        let line = self.trace();
        match self.trace_sink.as_mut() {
            Some(sink) => writeln!(sink, "{}", line)?,
            None => eprintln!("{}", line),
        }
        Ok(())
    }

    // ===== Inspection =====

    /// Snapshot of PC, FL, the next three bytes and all registers
    pub fn trace(&self) -> Trace {
        Trace {
            pc: self.pc,
            flags: self.flags.bits(),
            bytes: [
                self.memory.peek(self.pc),
                self.memory.peek(self.pc + 1),
                self.memory.peek(self.pc + 2),
            ],
            registers: *self.registers.as_array(),
        }
    }

    /// Serializable view of the CPU state
    pub fn snapshot(&self) -> MachineState {
        MachineState {
            pc: self.pc,
            flags: self.flags,
            sp: self.registers.sp(),
            registers: *self.registers.as_array(),
            cycles: self.cycles,
        }
    }

    pub fn ram_read(&self, address: usize) -> Result<u8, VmError> {
        self.memory.read(address)
    }

    pub fn ram_write(&mut self, address: usize, value: u8) -> Result<(), VmError> {
        self.memory.write(address, value)
    }

    pub fn register(&self, idx: u8) -> Result<u8, VmError> {
        self.registers.get(idx)
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        self.registers.as_array()
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.registers.sp()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
