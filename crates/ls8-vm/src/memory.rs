//! Byte-addressable machine memory

use crate::error::VmError;

/// Size of the address space in bytes
pub const MEMORY_SIZE: usize = 256;

/// Fixed-size, zero-initialized RAM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Read the byte at `address`
    #[inline]
    pub fn read(&self, address: usize) -> Result<u8, VmError> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(VmError::MemoryOutOfBounds { address })
    }

    /// Write `value` at `address`
    #[inline]
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), VmError> {
        let slot = self
            .bytes
            .get_mut(address)
            .ok_or(VmError::MemoryOutOfBounds { address })?;
        *slot = value;
        Ok(())
    }

    /// Read without faulting; `None` past the end of memory
    #[inline]
    pub fn peek(&self, address: usize) -> Option<u8> {
        self.bytes.get(address).copied()
    }

    /// Copy a program image to address 0. Bytes past the image keep their value.
    pub fn load(&mut self, program: &[u8]) -> Result<(), VmError> {
        if program.len() > MEMORY_SIZE {
            return Err(VmError::ProgramTooLarge {
                size: program.len(),
                capacity: MEMORY_SIZE,
            });
        }
        self.bytes[..program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let mut memory = Memory::new();
        assert_eq!(memory.read(0).unwrap(), 0);

        memory.write(0xFF, 42).unwrap();
        assert_eq!(memory.read(0xFF).unwrap(), 42);
        assert_eq!(memory.peek(0xFF), Some(42));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.read(MEMORY_SIZE),
            Err(VmError::MemoryOutOfBounds { address: 256 })
        ));
        assert!(memory.write(300, 1).is_err());
        assert_eq!(memory.peek(MEMORY_SIZE), None);
    }

    #[test]
    fn test_load() {
        let mut memory = Memory::new();
        memory.load(&[1, 2, 3]).unwrap();
        assert_eq!(&memory.as_slice()[..4], &[1, 2, 3, 0]);

        let full = vec![7u8; MEMORY_SIZE];
        memory.load(&full).unwrap();
        assert_eq!(memory.read(MEMORY_SIZE - 1).unwrap(), 7);

        let too_big = vec![0u8; MEMORY_SIZE + 1];
        assert!(matches!(
            memory.load(&too_big),
            Err(VmError::ProgramTooLarge { size: 257, capacity: 256 })
        ));
    }
}
