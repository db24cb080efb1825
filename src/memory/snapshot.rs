// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryReader, MemoryRegion, Protection};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A captured block of target memory, as stored in a reflection snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub start: Address,
    pub protection: Protection,
    #[serde(default)]
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
enum RegionData {
    Owned(Vec<u8>),
    Mapped { map: Arc<Mmap>, offset: usize, len: usize },
}

impl RegionData {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data,
            Self::Mapped { map, offset, len } => {
                let end = (*offset + *len).min(map.len());
                &map[(*offset).min(end)..end]
            }
        }
    }
}

#[derive(Debug)]
struct MappedRegion {
    region: MemoryRegion,
    data: RegionData,
}

/// Address space assembled from snapshot blocks and loaded module images.
///
/// Bytes of a region past its backing data (zero-initialised sections) read
/// as zero.
#[derive(Debug, Default)]
pub struct SnapshotMemory {
    regions: Vec<MappedRegion>,
}

impl SnapshotMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<MemoryBlock>) -> Result<Self, MemoryError> {
        let mut memory = Self::new();
        for block in blocks {
            memory.add_block(block)?;
        }
        Ok(memory)
    }

    pub fn add_block(&mut self, block: MemoryBlock) -> Result<(), MemoryError> {
        let range = MemoryRange::from_start_size(block.start, block.bytes.len() as u64);
        let region = MemoryRegion::new(range, block.protection, block.name);
        self.insert(region, RegionData::Owned(block.bytes))
    }

    /// Maps the parts of `region` not already covered by another region,
    /// so captured blocks keep precedence over image bytes. Returns the
    /// number of pieces mapped.
    pub(crate) fn add_mapped(
        &mut self,
        region: MemoryRegion,
        map: Arc<Mmap>,
        offset: usize,
        len: usize,
    ) -> Result<usize, MemoryError> {
        let start = region.start().as_u64();
        let end = region.range().end();

        let mut pieces = Vec::new();
        let mut cursor = start;
        for existing in &self.regions {
            let (s, e) = (existing.region.start().as_u64(), existing.region.range().end());
            if e <= cursor || s >= end {
                continue;
            }
            if s > cursor {
                pieces.push((cursor, s));
            }
            cursor = cursor.max(e);
        }
        if cursor < end {
            pieces.push((cursor, end));
        }

        for &(s, e) in &pieces {
            let delta = (s - start) as usize;
            let piece = MemoryRegion::new(
                MemoryRange::from_start_size(Address::new(s), e - s),
                region.protection(),
                region.name().to_string(),
            );
            let data = RegionData::Mapped {
                map: Arc::clone(&map),
                offset: offset + delta,
                len: len.saturating_sub(delta).min((e - s) as usize),
            };
            self.insert(piece, data)?;
        }
        Ok(pieces.len())
    }

    fn insert(&mut self, region: MemoryRegion, data: RegionData) -> Result<(), MemoryError> {
        if region.size() == 0 {
            return Ok(());
        }
        if self.regions.iter().any(|r| r.region.range().overlaps(region.range())) {
            return Err(MemoryError::OverlappingRegion(region.start().as_u64()));
        }
        self.regions.push(MappedRegion { region, data });
        self.regions.sort_by_key(|r| r.region.start());
        Ok(())
    }

    fn find(&self, addr: Address) -> Option<&MappedRegion> {
        let idx = self
            .regions
            .partition_point(|r| r.region.start() <= addr)
            .checked_sub(1)?;
        let candidate = &self.regions[idx];
        candidate.region.contains(addr).then_some(candidate)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl MemoryReader for SnapshotMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let mapped = self
            .find(addr)
            .ok_or(MemoryError::AccessViolation(addr.as_u64()))?;

        if !mapped.region.protection().can_read() {
            return Err(MemoryError::AccessViolation(addr.as_u64()));
        }
        if (len as u64) > mapped.region.range().remaining_from(addr) {
            return Err(MemoryError::ReadFailed(addr.as_u64(), len));
        }

        let start = (addr.as_u64() - mapped.region.start().as_u64()) as usize;
        let backing = mapped.data.bytes();
        let mut out = vec![0u8; len];
        if start < backing.len() {
            let available = (backing.len() - start).min(len);
            out[..available].copy_from_slice(&backing[start..start + available]);
        }
        Ok(out)
    }

    fn protection_at(&self, addr: Address) -> Option<Protection> {
        self.find(addr).map(|r| r.region.protection())
    }

    fn get_regions(&self) -> Vec<MemoryRegion> {
        self.regions.iter().map(|r| r.region.clone()).collect()
    }

    fn readable_len(&self, addr: Address) -> u64 {
        self.find(addr)
            .filter(|r| r.region.protection().can_read())
            .map(|r| r.region.range().remaining_from(addr))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: u64, protection: Protection, bytes: Vec<u8>) -> MemoryBlock {
        MemoryBlock {
            start: Address::new(start),
            protection,
            name: String::new(),
            bytes,
        }
    }

    #[test]
    fn test_read_within_block() {
        let memory = SnapshotMemory::from_blocks(vec![block(
            0x1000,
            Protection::ReadWrite,
            0x1122334455667788u64.to_le_bytes().to_vec(),
        )])
        .unwrap();

        assert_eq!(memory.read_u64(Address::new(0x1000)).unwrap(), 0x1122334455667788);
        assert_eq!(memory.read_bytes(Address::new(0x1006), 2).unwrap(), vec![0x22, 0x11]);
        assert_eq!(memory.readable_len(Address::new(0x1004)), 4);
    }

    #[test]
    fn test_unmapped_and_short_reads_fail() {
        let memory =
            SnapshotMemory::from_blocks(vec![block(0x1000, Protection::Read, vec![0; 4])]).unwrap();

        assert!(matches!(
            memory.read_bytes(Address::new(0x2000), 1),
            Err(MemoryError::AccessViolation(0x2000))
        ));
        assert!(matches!(
            memory.read_u64(Address::new(0x1000)),
            Err(MemoryError::ReadFailed(0x1000, 8))
        ));
    }

    #[test]
    fn test_readable_len_stops_at_region_end() {
        let memory = SnapshotMemory::from_blocks(vec![
            block(0x1000, Protection::Read, vec![0; 0x20]),
            block(0x1020, Protection::ReadWrite, vec![0; 0x10]),
            block(0x2000, Protection::None, vec![0; 0x10]),
        ])
        .unwrap();

        assert_eq!(memory.readable_len(Address::new(0x1018)), 8);
        assert_eq!(memory.readable_len(Address::new(0x1020)), 0x10);
        assert_eq!(memory.readable_len(Address::new(0x2004)), 0);
        assert_eq!(memory.readable_len(Address::new(0x3000)), 0);
    }

    #[test]
    fn test_protection_lookup_and_overlap() {
        let mut memory = SnapshotMemory::from_blocks(vec![
            block(0x4000, Protection::ReadExecute, vec![0xC3; 16]),
            block(0x1000, Protection::ReadWrite, vec![0; 16]),
        ])
        .unwrap();

        assert_eq!(memory.protection_at(Address::new(0x4008)), Some(Protection::ReadExecute));
        assert_eq!(memory.protection_at(Address::new(0x100f)), Some(Protection::ReadWrite));
        assert_eq!(memory.protection_at(Address::new(0x1010)), None);
        assert!(memory
            .add_block(block(0x1008, Protection::Read, vec![0; 16]))
            .is_err());
    }
}
