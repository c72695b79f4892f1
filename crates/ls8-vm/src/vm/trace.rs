//! Per-cycle trace snapshots

use crate::registers::REGISTER_COUNT;
use std::fmt;

/// PC, FL, the next three memory bytes and all registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub pc: usize,
    pub flags: u8,
    /// Bytes at PC, PC+1, PC+2; `None` past the end of memory
    pub bytes: [Option<u8>; 3],
    pub registers: [u8; REGISTER_COUNT],
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRACE: {:02X} | {:02X} |", self.pc, self.flags)?;
        for byte in self.bytes {
            match byte {
                Some(b) => write!(f, " {:02X}", b)?,
                None => write!(f, " --")?,
            }
        }
        write!(f, " |")?;
        for reg in self.registers {
            write!(f, " {:02X}", reg)?;
        }
        Ok(())
    }
}
