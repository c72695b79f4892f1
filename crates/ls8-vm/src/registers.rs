//! Register file and flags register

use crate::error::VmError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of general-purpose registers
pub const REGISTER_COUNT: usize = 8;

/// Register reserved as the stack pointer
pub const SP: u8 = 7;

/// Eight 8-bit registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    registers: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    /// Create a zeroed register file with SP pointing at `stack_top`
    pub fn new(stack_top: u8) -> Self {
        let mut registers = [0; REGISTER_COUNT];
        registers[SP as usize] = stack_top;
        Self { registers }
    }

    /// Get register value
    #[inline]
    pub fn get(&self, idx: u8) -> Result<u8, VmError> {
        self.registers
            .get(idx as usize)
            .copied()
            .ok_or(VmError::InvalidRegister(idx))
    }

    /// Set register value
    #[inline]
    pub fn set(&mut self, idx: u8, value: u8) -> Result<(), VmError> {
        let slot = self
            .registers
            .get_mut(idx as usize)
            .ok_or(VmError::InvalidRegister(idx))?;
        *slot = value;
        Ok(())
    }

    #[inline]
    pub fn sp(&self) -> u8 {
        self.registers[SP as usize]
    }

    #[inline]
    pub fn set_sp(&mut self, value: u8) {
        self.registers[SP as usize] = value;
    }

    pub fn as_array(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }
}

/// Comparison flags written by CMP: `00000LGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(u8);

impl Flags {
    pub const EQUAL: u8 = 0b001;
    pub const GREATER: u8 = 0b010;
    pub const LESS: u8 = 0b100;

    /// Flags describing how `left` orders against `right`
    pub fn compare(left: u8, right: u8) -> Self {
        match left.cmp(&right) {
            Ordering::Equal => Flags(Self::EQUAL),
            Ordering::Greater => Flags(Self::GREATER),
            Ordering::Less => Flags(Self::LESS),
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn equal(self) -> bool {
        self.0 & Self::EQUAL != 0
    }

    #[inline]
    pub fn greater(self) -> bool {
        self.0 & Self::GREATER != 0
    }

    #[inline]
    pub fn less(self) -> bool {
        self.0 & Self::LESS != 0
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            bit(self.less(), 'L'),
            bit(self.greater(), 'G'),
            bit(self.equal(), 'E')
        )
    }
}
