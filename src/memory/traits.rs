// Wed Jan 15 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRegion, Protection};

/// Read-only view of the target's address space.
pub trait MemoryReader: Send + Sync {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError>;

    /// Protection of the page holding `addr`, `None` when unmapped.
    fn protection_at(&self, addr: Address) -> Option<Protection>;

    fn get_regions(&self) -> Vec<MemoryRegion>;

    fn read_u64(&self, addr: Address) -> Result<u64, MemoryError> {
        let bytes = self.read_bytes(addr, 8)?;
        if bytes.len() < 8 {
            return Err(MemoryError::ReadFailed(addr.as_u64(), 8));
        }
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..8]);
        Ok(u64::from_le_bytes(raw))
    }

    fn read_ptr(&self, addr: Address) -> Result<Address, MemoryError> {
        self.read_u64(addr).map(Address::new)
    }

    /// Number of readable bytes starting at `addr` within its region.
    fn readable_len(&self, addr: Address) -> u64 {
        self.get_regions()
            .iter()
            .find(|r| r.contains(addr) && r.protection().can_read())
            .map(|r| r.range().remaining_from(addr))
            .unwrap_or(0)
    }
}
