//! Machine configuration

use crate::error::VmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default initial stack pointer, above the program region
pub const DEFAULT_STACK_TOP: u8 = 0xF4;

/// What ADD and MUL do when a result does not fit in 8 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep the low 8 bits
    #[default]
    Wrap,
    /// Clamp to 255
    Saturate,
    /// Fail with `VmError::ArithmeticOverflow`
    Trap,
}

/// How JMP, JEQ and JNE treat the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpMode {
    /// Jumps only set PC
    #[default]
    Plain,
    /// Legacy behavior: a taken jump pushes PC + 2 first, exactly like CALL
    PushReturn,
}

/// Tunables for a single machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Initial SP; the stack grows down from here
    pub stack_top: u8,
    /// Lowest address SP may reach; a push at this address overflows
    pub stack_limit: u8,
    /// Stop after this many executed instructions
    pub max_cycles: Option<u64>,
    pub overflow: OverflowPolicy,
    pub jump_mode: JumpMode,
    /// Write a trace line before every instruction
    pub trace: bool,
}

impl MachineConfig {
    /// Check invariants the machine relies on
    pub fn validate(&self) -> Result<(), VmError> {
        if self.stack_limit >= self.stack_top {
            return Err(VmError::InvalidConfig(format!(
                "stack_limit ({:#04x}) must be below stack_top ({:#04x})",
                self.stack_limit, self.stack_top
            )));
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            stack_top: DEFAULT_STACK_TOP,
            stack_limit: 0,
            max_cycles: None,
            overflow: OverflowPolicy::Wrap,
            jump_mode: JumpMode::Plain,
            trace: false,
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wrap" => Ok(OverflowPolicy::Wrap),
            "saturate" => Ok(OverflowPolicy::Saturate),
            "trap" => Ok(OverflowPolicy::Trap),
            other => Err(format!(
                "unknown overflow policy '{}' (expected wrap, saturate or trap)",
                other
            )),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Wrap => write!(f, "wrap"),
            OverflowPolicy::Saturate => write!(f, "saturate"),
            OverflowPolicy::Trap => write!(f, "trap"),
        }
    }
}
