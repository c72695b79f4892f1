//! Program disassembly

use crate::opcode::OpCode;
use std::fmt;

/// One disassembled row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    pub address: usize,
    pub bytes: Vec<u8>,
    pub text: String,
}

impl fmt::Display for DisassembledInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
        write!(f, "{:02X}  {:<9} {}", self.address, raw.join(" "), self.text)
    }
}

/// Disassemble a program image starting at address 0
///
/// Unknown bytes, and instructions cut short by the end of the image, are
/// emitted one byte at a time as `.byte` rows.
pub fn disassemble(bytes: &[u8]) -> Vec<DisassembledInstruction> {
    let mut rows = Vec::new();
    let mut address = 0;

    while address < bytes.len() {
        let byte = bytes[address];
        let decoded = OpCode::from_u8(byte).and_then(|opcode| {
            let end = address + opcode.encoded_len();
            bytes
                .get(address + 1..end)
                .map(|operands| (opcode, operands))
        });

        match decoded {
            Some((opcode, operands)) => {
                rows.push(DisassembledInstruction {
                    address,
                    bytes: bytes[address..address + opcode.encoded_len()].to_vec(),
                    text: format_instruction(opcode, operands),
                });
                address += opcode.encoded_len();
            }
            None => {
                rows.push(DisassembledInstruction {
                    address,
                    bytes: vec![byte],
                    text: format!(".byte 0b{:08b}", byte),
                });
                address += 1;
            }
        }
    }

    rows
}

fn format_instruction(opcode: OpCode, operands: &[u8]) -> String {
    match (opcode, operands) {
        (OpCode::Ldi, [reg, imm]) => format!("LDI R{}, {}", reg, imm),
        (_, [a, b]) => format!("{} R{}, R{}", opcode, a, b),
        (_, [a]) => format!("{} R{}", opcode, a),
        _ => opcode.name().to_string(),
    }
}
