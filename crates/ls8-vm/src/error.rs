//! Error types for the VM

use std::io;
use thiserror::Error;

/// VM runtime errors
#[derive(Debug, Error)]
pub enum VmError {
    /// Opcode not in the instruction table
    #[error("Illegal instruction 0b{opcode:08b} at address {pc:#04x}")]
    IllegalInstruction { opcode: u8, pc: usize },

    /// ALU-flagged opcode naming an operation the ALU does not implement
    #[error("Unsupported ALU operation 0b{opcode:08b} at address {pc:#04x}")]
    UnsupportedAluOperation { opcode: u8, pc: usize },

    /// Memory access outside the address space
    #[error("Memory access out of bounds: address {address:#x}")]
    MemoryOutOfBounds { address: usize },

    /// Invalid register access
    #[error("Invalid register: R{0}")]
    InvalidRegister(u8),

    /// Push with the stack pointer already at the stack limit
    #[error("Stack overflow (SP={sp:#04x})")]
    StackOverflow { sp: u8 },

    /// Pop with the stack pointer at or above the top of stack
    #[error("Stack underflow (SP={sp:#04x})")]
    StackUnderflow { sp: u8 },

    /// ADD/MUL result does not fit a register under the trap policy
    #[error("Arithmetic overflow in {operation}: {left} and {right}")]
    ArithmeticOverflow {
        operation: &'static str,
        left: u8,
        right: u8,
    },

    /// Program image larger than memory
    #[error("Program too large: {size} bytes (memory holds {capacity})")]
    ProgramTooLarge { size: usize, capacity: usize },

    /// Rejected machine configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing to the output or trace sink failed
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}
