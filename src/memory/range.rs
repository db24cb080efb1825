// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRange {
    start: Address,
    size: u64,
}

impl MemoryRange {
    pub fn from_start_size(start: Address, size: u64) -> Self {
        Self { start, size }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.start.as_u64().saturating_add(self.size)
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.as_u64() >= self.start.as_u64() && addr.as_u64() < self.end()
    }

    /// Bytes available from `addr` to the end of the range.
    pub fn remaining_from(&self, addr: Address) -> u64 {
        if self.contains(addr) {
            self.end() - addr.as_u64()
        } else {
            0
        }
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start.as_u64() < other.end() && self.end() > other.start.as_u64()
    }
}

impl fmt::Display for MemoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, 0x{:016x})", self.start, self.end())
    }
}
