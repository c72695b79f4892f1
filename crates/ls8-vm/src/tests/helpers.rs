//! Helper functions and common imports for machine tests.

use crate::config::MachineConfig;
use crate::error::VmError;
use crate::vm::{Halt, Machine};

// Opcode bytes for hand-assembled programs
pub const HLT: u8 = 0b0000_0001;
pub const LDI: u8 = 0b1000_0010;
pub const PRN: u8 = 0b0100_0111;
pub const ADD: u8 = 0b1010_0000;
pub const MUL: u8 = 0b1010_0010;
pub const CMP: u8 = 0b1010_0111;
pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;
pub const CALL: u8 = 0b0101_0000;
pub const RET: u8 = 0b0001_0001;
pub const JMP: u8 = 0b0101_0100;
pub const JEQ: u8 = 0b0101_0101;
pub const JNE: u8 = 0b0101_0110;

/// Finished run: outcome, captured PRN output and the machine for inspection
pub struct Run {
    pub halt: Halt,
    pub output: String,
    pub machine: Machine,
}

/// Load bytes into a machine with `config` and run to completion
pub fn run_bytes_with(bytes: &[u8], config: MachineConfig) -> Result<Run, VmError> {
    let mut machine = Machine::with_config(config)?;
    machine.load(bytes)?;

    let mut out = Vec::new();
    let halt = machine.run(&mut out)?;
    Ok(Run {
        halt,
        output: String::from_utf8_lossy(&out).into_owned(),
        machine,
    })
}

pub fn run_bytes(bytes: &[u8]) -> Result<Run, VmError> {
    run_bytes_with(bytes, MachineConfig::default())
}

/// Parse program text and run it with the default configuration
pub fn run_source(source: &str) -> Result<Run, String> {
    let program = ls8_parser::parse(source).map_err(|e| format!("Parse error: {}", e))?;
    run_bytes(program.bytes()).map_err(|e| format!("Runtime error: {}", e))
}
