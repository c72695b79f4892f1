//! Parsed program image

/// Ordered program bytes together with the source line each came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
    lines: Vec<usize>,
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte read from the given 1-based source line
    pub fn push(&mut self, byte: u8, line: usize) {
        self.bytes.push(byte);
        self.lines.push(line);
    }

    /// Program bytes in load order (index == load address)
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Source line of the byte loaded at `address`
    pub fn line_of(&self, address: usize) -> Option<usize> {
        self.lines.get(address).copied()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        let lines = (1..=bytes.len()).collect();
        Self { bytes, lines }
    }
}
