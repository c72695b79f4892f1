//! LS-8 Virtual Machine
//!
//! This crate implements the core of an LS-8 emulator: a 256-byte memory, an
//! 8-register file (R7 doubles as the stack pointer), a flags register and a
//! fetch-decode-execute loop over the 8-bit instruction encoding.
//!
//! # Architecture
//!
//! - Opcodes describe their own shape: bits 7-6 hold the operand count, bit 5
//!   marks an ALU operation, bit 4 marks an instruction that sets PC itself
//! - Every memory, register and stack access is bounds checked
//! - `run` returns a [`Halt`] outcome instead of terminating the process
//!
//! # Modules
//!
//! - `opcode`: Instruction set definitions and encoding helpers
//! - `memory`: Byte-addressable memory
//! - `registers`: Register file and flags
//! - `config`: Machine configuration
//! - `vm`: Execution engine
//! - `disasm`: Program disassembler
//! - `error`: Error types

pub mod config;
pub mod disasm;
pub mod error;
pub mod memory;
pub mod opcode;
pub mod registers;
pub mod vm;

// Re-export main types
pub use config::{JumpMode, MachineConfig, OverflowPolicy};
pub use disasm::{disassemble, DisassembledInstruction};
pub use error::VmError;
pub use memory::{Memory, MEMORY_SIZE};
pub use opcode::OpCode;
pub use registers::{Flags, RegisterFile, REGISTER_COUNT, SP};
pub use vm::{Halt, HaltReason, Machine, MachineState, Step, Trace};
