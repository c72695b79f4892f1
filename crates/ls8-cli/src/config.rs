//! Machine configuration from a JSON file plus command-line overrides

use anyhow::{Context, Result};
use clap::Args;
use ls8_vm::{JumpMode, MachineConfig, OverflowPolicy};
use std::fs;
use std::path::{Path, PathBuf};

/// Options shared by every command that runs a program
#[derive(Args, Debug, Default)]
pub struct MachineArgs {
    /// Print a trace line to stderr before every instruction
    #[arg(long, global = true)]
    pub trace: bool,

    /// Stop after N instructions
    #[arg(long, value_name = "N", global = true)]
    pub max_cycles: Option<u64>,

    /// Initial stack pointer (decimal, 0x.. or 0b..)
    #[arg(long, value_name = "ADDR", value_parser = parse_byte, global = true)]
    pub stack_top: Option<u8>,

    /// ADD/MUL overflow policy: wrap, saturate or trap
    #[arg(long, value_name = "POLICY", global = true)]
    pub overflow: Option<OverflowPolicy>,

    /// Taken JMP/JEQ/JNE push a return address like CALL
    #[arg(long, global = true)]
    pub legacy_jumps: bool,

    /// JSON machine configuration; flags override its values
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Exit with status 1 after HLT
    #[arg(long, global = true)]
    pub legacy_exit: bool,

    /// Print the final machine state as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Parse a byte written in decimal, hex (0x) or binary (0b)
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u8::from_str_radix(bin, 2)
    } else {
        s.parse::<u8>()
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn read_config_file(path: &Path) -> Result<MachineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Error reading config file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid config file '{}'", path.display()))
}

/// Resolve the effective configuration
pub fn build_config(args: &MachineArgs) -> Result<MachineConfig> {
    let mut config = match &args.config {
        Some(path) => read_config_file(path)?,
        None => MachineConfig::default(),
    };

    if args.trace {
        config.trace = true;
    }
    if let Some(limit) = args.max_cycles {
        config.max_cycles = Some(limit);
    }
    if let Some(top) = args.stack_top {
        config.stack_top = top;
    }
    if let Some(policy) = args.overflow {
        config.overflow = policy;
    }
    if args.legacy_jumps {
        config.jump_mode = JumpMode::PushReturn;
    }

    config.validate()?;
    Ok(config)
}
