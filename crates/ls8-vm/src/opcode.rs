//! OpCode definitions for the LS-8
//!
//! Every instruction is a single opcode byte followed by up to two operand
//! bytes. The opcode byte carries its own shape:
//!
//! ```text
//! AABCDDDD
//!   AA    number of operands (0-2)
//!   B     1 if the instruction is handled by the ALU
//!   C     1 if the instruction sets PC itself
//!   DDDD  instruction identifier
//! ```

use std::fmt;

/// Machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // ===== Control =====
    /// Halt the machine
    Hlt = 0b0000_0001,

    // ===== Registers & Output =====
    /// Load immediate: R[A] = B
    Ldi = 0b1000_0010,
    /// Print register: emit R[A] as a decimal line
    Prn = 0b0100_0111,

    // ===== ALU =====
    /// Addition: R[A] = R[A] + R[B]
    Add = 0b1010_0000,
    /// Multiplication: R[A] = R[A] * R[B]
    Mul = 0b1010_0010,
    /// Compare: FL = compare(R[A], R[B])
    Cmp = 0b1010_0111,

    // ===== Stack =====
    /// Push: M[--SP] = R[A]
    Push = 0b0100_0101,
    /// Pop: R[A] = M[SP++]
    Pop = 0b0100_0110,

    // ===== Subroutines =====
    /// Call: M[--SP] = PC + 2, PC = R[A]
    Call = 0b0101_0000,
    /// Return: PC = M[SP++]
    Ret = 0b0001_0001,

    // ===== Jumps & Branches =====
    /// Unconditional jump: PC = R[A]
    Jmp = 0b0101_0100,
    /// Jump if equal: if FL.E then PC = R[A]
    Jeq = 0b0101_0101,
    /// Jump if not equal: if !FL.E then PC = R[A]
    Jne = 0b0101_0110,
}

impl OpCode {
    /// Every opcode in the instruction table
    pub const ALL: [OpCode; 13] = [
        OpCode::Hlt,
        OpCode::Ldi,
        OpCode::Prn,
        OpCode::Add,
        OpCode::Mul,
        OpCode::Cmp,
        OpCode::Push,
        OpCode::Pop,
        OpCode::Call,
        OpCode::Ret,
        OpCode::Jmp,
        OpCode::Jeq,
        OpCode::Jne,
    ];

    /// Get opcode from byte value
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0b0000_0001 => Some(OpCode::Hlt),
            0b1000_0010 => Some(OpCode::Ldi),
            0b0100_0111 => Some(OpCode::Prn),
            0b1010_0000 => Some(OpCode::Add),
            0b1010_0010 => Some(OpCode::Mul),
            0b1010_0111 => Some(OpCode::Cmp),
            0b0100_0101 => Some(OpCode::Push),
            0b0100_0110 => Some(OpCode::Pop),
            0b0101_0000 => Some(OpCode::Call),
            0b0001_0001 => Some(OpCode::Ret),
            0b0101_0100 => Some(OpCode::Jmp),
            0b0101_0101 => Some(OpCode::Jeq),
            0b0101_0110 => Some(OpCode::Jne),
            _ => None,
        }
    }

    /// Convert opcode to byte value
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get assembler mnemonic
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Hlt => "HLT",
            OpCode::Ldi => "LDI",
            OpCode::Prn => "PRN",
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::Cmp => "CMP",
            OpCode::Push => "PUSH",
            OpCode::Pop => "POP",
            OpCode::Call => "CALL",
            OpCode::Ret => "RET",
            OpCode::Jmp => "JMP",
            OpCode::Jeq => "JEQ",
            OpCode::Jne => "JNE",
        }
    }

    /// Number of operand bytes following the opcode
    #[inline]
    pub fn operand_count(self) -> usize {
        instruction::operand_count(self.as_u8())
    }

    /// Total encoded length in bytes
    #[inline]
    pub fn encoded_len(self) -> usize {
        1 + self.operand_count()
    }

    #[inline]
    pub fn is_alu(self) -> bool {
        instruction::is_alu(self.as_u8())
    }

    /// Whether the instruction is responsible for setting PC
    #[inline]
    pub fn sets_pc(self) -> bool {
        instruction::sets_pc(self.as_u8())
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Opcode bit-field helpers, valid for any byte including unknown opcodes
pub mod instruction {
    pub const OPERAND_COUNT_SHIFT: u8 = 6;
    pub const ALU_BIT: u8 = 0b0010_0000;
    pub const SETS_PC_BIT: u8 = 0b0001_0000;
    pub const IDENTIFIER_MASK: u8 = 0b0000_1111;

    /// Decode operand count (bits 7-6)
    #[inline]
    pub fn operand_count(opcode: u8) -> usize {
        (opcode >> OPERAND_COUNT_SHIFT) as usize
    }

    /// Decode ALU flag (bit 5)
    #[inline]
    pub fn is_alu(opcode: u8) -> bool {
        opcode & ALU_BIT != 0
    }

    /// Decode sets-PC flag (bit 4)
    #[inline]
    pub fn sets_pc(opcode: u8) -> bool {
        opcode & SETS_PC_BIT != 0
    }

    /// Decode instruction identifier (bits 3-0)
    #[inline]
    pub fn identifier(opcode: u8) -> u8 {
        opcode & IDENTIFIER_MASK
    }
}
