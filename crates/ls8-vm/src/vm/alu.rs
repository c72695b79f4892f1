//! Arithmetic/logic unit

use crate::config::OverflowPolicy;
use crate::error::VmError;
use crate::opcode::{instruction, OpCode};
use crate::registers::Flags;

/// Operations the ALU implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
    Cmp,
}

/// What an ALU operation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOutcome {
    /// New value for register A
    Value(u8),
    /// New flags register
    Flags(Flags),
}

impl AluOp {
    /// Select the operation named by an ALU opcode byte
    pub fn from_opcode(byte: u8) -> Option<Self> {
        if !instruction::is_alu(byte) {
            return None;
        }
        match OpCode::from_u8(byte)? {
            OpCode::Add => Some(AluOp::Add),
            OpCode::Mul => Some(AluOp::Mul),
            OpCode::Cmp => Some(AluOp::Cmp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Mul => "MUL",
            AluOp::Cmp => "CMP",
        }
    }

    /// Apply the operation to two register values
    pub fn apply(self, left: u8, right: u8, policy: OverflowPolicy) -> Result<AluOutcome, VmError> {
        let (checked, wrapped, saturated) = match self {
            AluOp::Add => (
                left.checked_add(right),
                left.wrapping_add(right),
                left.saturating_add(right),
            ),
            AluOp::Mul => (
                left.checked_mul(right),
                left.wrapping_mul(right),
                left.saturating_mul(right),
            ),
            AluOp::Cmp => return Ok(AluOutcome::Flags(Flags::compare(left, right))),
        };

        let value = match policy {
            OverflowPolicy::Wrap => wrapped,
            OverflowPolicy::Saturate => saturated,
            OverflowPolicy::Trap => checked.ok_or(VmError::ArithmeticOverflow {
                operation: self.name(),
                left,
                right,
            })?,
        };
        Ok(AluOutcome::Value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_opcode() {
        assert_eq!(AluOp::from_opcode(0b1010_0000), Some(AluOp::Add));
        assert_eq!(AluOp::from_opcode(0b1010_0010), Some(AluOp::Mul));
        assert_eq!(AluOp::from_opcode(0b1010_0111), Some(AluOp::Cmp));
        assert_eq!(AluOp::from_opcode(0b1010_0001), None);
        assert_eq!(AluOp::from_opcode(OpCode::Ldi.as_u8()), None);
    }

    #[test]
    fn test_add_mul() {
        let wrap = OverflowPolicy::Wrap;
        assert_eq!(AluOp::Add.apply(2, 3, wrap).unwrap(), AluOutcome::Value(5));
        assert_eq!(AluOp::Mul.apply(8, 9, wrap).unwrap(), AluOutcome::Value(72));
    }

    #[test]
    fn test_overflow_policies() {
        assert_eq!(
            AluOp::Mul.apply(200, 2, OverflowPolicy::Wrap).unwrap(),
            AluOutcome::Value(144)
        );
        assert_eq!(
            AluOp::Add.apply(200, 100, OverflowPolicy::Saturate).unwrap(),
            AluOutcome::Value(255)
        );
        assert!(matches!(
            AluOp::Add.apply(255, 1, OverflowPolicy::Trap),
            Err(VmError::ArithmeticOverflow { operation: "ADD", left: 255, right: 1 })
        ));
        assert_eq!(
            AluOp::Add.apply(254, 1, OverflowPolicy::Trap).unwrap(),
            AluOutcome::Value(255)
        );
    }

    #[test]
    fn test_cmp_ignores_policy() {
        assert_eq!(
            AluOp::Cmp.apply(255, 0, OverflowPolicy::Trap).unwrap(),
            AluOutcome::Flags(Flags::compare(255, 0))
        );
    }
}
