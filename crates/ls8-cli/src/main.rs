use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use ls8_parser::{ParseError, Program};
use ls8_vm::{HaltReason, Machine};
use std::io::{self, Write};

mod config;
mod exit;
mod report;

use config::MachineArgs;

/// LS-8 - 8-bit computer emulator
#[derive(Debug, Parser)]
#[command(name = "ls8")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run, check and disassemble LS-8 programs", long_about = "LS-8 emulator\n\nLoads a program of binary literals (one byte per line, `#` comments) into\nmemory at address 0 and executes it until HLT.")]
struct Cli {
    /// Program file to run (.ls8)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    #[command(flatten)]
    machine: MachineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a program file
    Run {
        /// Path to the program file
        file: String,
    },
    /// Parse a program without running it
    Check {
        /// File to check
        file: String,
    },
    /// Disassemble a program
    Disassemble {
        /// File to disassemble
        file: String,
    },
}

fn main() {
    let code = match Cli::try_parse() {
        Ok(cli) => dispatch(cli),
        Err(err) => usage_failure(err),
    };

    std::process::exit(code);
}

fn dispatch(cli: Cli) -> i32 {
    match cli.command {
        Some(Commands::Run { file }) => run_command(&file, &cli.machine),
        Some(Commands::Check { file }) => check_command(&file),
        Some(Commands::Disassemble { file }) => disassemble_command(&file),
        None => match cli.input {
            Some(input) => run_command(&input, &cli.machine),
            None => need_file_name(),
        },
    }
}

fn need_file_name() -> i32 {
    println!("Need file name!");
    exit::USAGE
}

/// Exit code for a rejected command line; help and version exit through clap
fn usage_failure(err: clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
        // Too many or too few positional arguments
        ErrorKind::UnknownArgument | ErrorKind::MissingRequiredArgument => need_file_name(),
        _ => {
            let _ = err.print();
            exit::USAGE
        }
    }
}

/// Load a program file, reporting failures and mapping them to an exit code
fn load_program(filename: &str) -> Result<Program, i32> {
    match ls8_parser::load_file(filename) {
        Ok(program) => Ok(program),
        Err(ParseError::NotFound { .. }) => {
            println!("File not found!");
            Err(exit::NOT_FOUND)
        }
        Err(err) => {
            report::error(&err.to_string());
            Err(exit::USAGE)
        }
    }
}

// ============================================================================
// RUN COMMAND
// ============================================================================

fn run_command(filename: &str, args: &MachineArgs) -> i32 {
    let config = match config::build_config(args) {
        Ok(config) => config,
        Err(err) => {
            report::error(&format!("{:#}", err));
            return exit::USAGE;
        }
    };

    let program = match load_program(filename) {
        Ok(program) => program,
        Err(code) => return code,
    };

    let mut machine = match Machine::with_config(config) {
        Ok(machine) => machine,
        Err(err) => {
            report::error(&err.to_string());
            return exit::USAGE;
        }
    };
    if let Err(err) = machine.load_program(&program) {
        report::error(&format!("Cannot load '{}': {}", filename, err));
        return exit::USAGE;
    }

    let result = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        machine.run(&mut out)
    };
    let fault_pc = machine.pc();

    if args.json {
        match serde_json::to_string_pretty(&machine.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(err) => report::error(&format!("Error serializing JSON: {}", err)),
        }
    }

    match result {
        Ok(halt) => {
            if halt.reason == HaltReason::CycleLimit {
                report::warning(&format!(
                    "stopped after {} cycles without reaching HLT (PC={:#04x})",
                    halt.cycles, halt.pc
                ));
            }
            exit::for_halt(halt.reason, args.legacy_exit)
        }
        Err(err) => {
            report::runtime_error(&err, fault_pc, &program, filename);
            exit::FAULT
        }
    }
}

// ============================================================================
// CHECK COMMAND
// ============================================================================

fn check_command(filename: &str) -> i32 {
    let program = match load_program(filename) {
        Ok(program) => program,
        Err(code) => return code,
    };

    if program.len() > ls8_vm::MEMORY_SIZE {
        report::error(&format!(
            "'{}' is {} bytes; memory holds {}",
            filename,
            program.len(),
            ls8_vm::MEMORY_SIZE
        ));
        return exit::USAGE;
    }
    println!("✓ Syntax OK");

    let rows = ls8_vm::disassemble(program.bytes());
    let undecoded = rows.iter().filter(|row| row.text.starts_with(".byte")).count();
    println!(
        "✓ {} bytes, {} instructions",
        program.len(),
        rows.len() - undecoded
    );
    if undecoded > 0 {
        report::warning(&format!("{} bytes do not decode as instructions", undecoded));
    }
    exit::SUCCESS
}

// ============================================================================
// DISASSEMBLE COMMAND
// ============================================================================

fn disassemble_command(filename: &str) -> i32 {
    let program = match load_program(filename) {
        Ok(program) => program,
        Err(code) => return code,
    };

    let stdout = io::stdout();
    match write_listing(&mut stdout.lock(), filename, &program) {
        Ok(()) => exit::SUCCESS,
        Err(err) => {
            report::error(&format!("Error writing disassembly: {}", err));
            exit::USAGE
        }
    }
}

fn write_listing(out: &mut dyn Write, filename: &str, program: &Program) -> io::Result<()> {
    writeln!(out, "Disassembly of '{}':", filename)?;
    writeln!(out)?;
    for row in ls8_vm::disassemble(program.bytes()) {
        let line = program.line_of(row.address).unwrap_or_default();
        writeln!(out, "{:<32} ; line {}", row.to_string(), line)?;
    }
    out.flush()
}
