//! Process exit codes

use ls8_vm::HaltReason;

/// Clean halt
pub const SUCCESS: i32 = 0;
/// Missing argument, unparsable program or bad configuration
pub const USAGE: i32 = 1;
/// Program file does not exist
pub const NOT_FOUND: i32 = 2;
/// `--max-cycles` reached before HLT
pub const CYCLE_LIMIT: i32 = 3;
/// The machine faulted at runtime
pub const FAULT: i32 = 4;

/// Exit code for a run that stopped without faulting
pub fn for_halt(reason: HaltReason, legacy_exit: bool) -> i32 {
    match reason {
        // HLT used to terminate the process with status 1
        HaltReason::Halted if legacy_exit => 1,
        HaltReason::Halted => SUCCESS,
        HaltReason::CycleLimit => CYCLE_LIMIT,
    }
}
