//! Serializable machine snapshot

use crate::registers::{Flags, REGISTER_COUNT};
use serde::{Deserialize, Serialize};

/// CPU state at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineState {
    pub pc: usize,
    pub flags: Flags,
    pub sp: u8,
    pub registers: [u8; REGISTER_COUNT],
    pub cycles: u64,
}
