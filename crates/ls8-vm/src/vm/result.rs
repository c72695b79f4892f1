//! Execution result types

/// Result of instruction execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutionResult {
    /// Continue at the next sequential instruction
    Continue,
    /// Continue at the given address
    Jump(usize),
    /// HLT executed
    Halt,
}

/// Result of a single `Machine::step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halted,
}

/// Why the run loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The program executed HLT
    Halted,
    /// `max_cycles` instructions ran without reaching HLT
    CycleLimit,
}

/// Outcome of `Machine::run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    pub reason: HaltReason,
    /// PC when the loop stopped (address of the HLT for a normal halt)
    pub pc: usize,
    pub cycles: u64,
}
