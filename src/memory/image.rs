// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryRegion, Protection, SnapshotMemory};
use goblin::elf::program_header::{PF_R, PF_W, PF_X, PT_LOAD};
use goblin::mach::Mach;
use goblin::Object;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const PE_SCN_MEM_EXECUTE: u32 = 0x2000_0000;
const PE_SCN_MEM_READ: u32 = 0x4000_0000;
const PE_SCN_MEM_WRITE: u32 = 0x8000_0000;

#[derive(Debug, Clone)]
pub struct ImageSegment {
    pub name: String,
    /// Address relative to the image's preferred base.
    pub rva: u64,
    pub vmsize: u64,
    pub fileoff: u64,
    pub filesize: u64,
    pub protection: Protection,
}

/// An on-disk module (ELF, PE or thin Mach-O) whose loadable segments can be
/// mapped into a [`SnapshotMemory`] at the address the target loaded it.
pub struct ModuleImage {
    path: PathBuf,
    map: Arc<Mmap>,
    preferred_base: u64,
    segments: Vec<ImageSegment>,
}

impl ModuleImage {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let file = File::open(path.as_ref())?;
        let map = unsafe { Mmap::map(&file) }?;
        let (preferred_base, segments) = Self::parse_segments(&map)?;

        log::debug!(
            "Loaded image {} ({} segments, preferred base 0x{:x})",
            path.as_ref().display(),
            segments.len(),
            preferred_base
        );

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            map: Arc::new(map),
            preferred_base,
            segments,
        })
    }

    fn parse_segments(data: &[u8]) -> Result<(u64, Vec<ImageSegment>), MemoryError> {
        let object = Object::parse(data)
            .map_err(|e| MemoryError::BinaryParseError(format!("Failed to parse image: {}", e)))?;

        match object {
            Object::Elf(elf) => {
                let loads: Vec<_> = elf
                    .program_headers
                    .iter()
                    .filter(|ph| ph.p_type == PT_LOAD)
                    .collect();
                let base = loads.iter().map(|ph| ph.p_vaddr).min().unwrap_or(0);
                let segments = loads
                    .iter()
                    .enumerate()
                    .map(|(i, ph)| {
                        let mut bits = 0;
                        if ph.p_flags & PF_R != 0 {
                            bits |= 1;
                        }
                        if ph.p_flags & PF_W != 0 {
                            bits |= 2;
                        }
                        if ph.p_flags & PF_X != 0 {
                            bits |= 4;
                        }
                        ImageSegment {
                            name: format!("LOAD{}", i),
                            rva: ph.p_vaddr - base,
                            vmsize: ph.p_memsz,
                            fileoff: ph.p_offset,
                            filesize: ph.p_filesz,
                            protection: Protection::from_flags(bits),
                        }
                    })
                    .collect();
                Ok((base, segments))
            }
            Object::PE(pe) => {
                let segments = pe
                    .sections
                    .iter()
                    .map(|section| {
                        let c = section.characteristics;
                        let mut bits = 0;
                        if c & PE_SCN_MEM_READ != 0 {
                            bits |= 1;
                        }
                        if c & PE_SCN_MEM_WRITE != 0 {
                            bits |= 2;
                        }
                        if c & PE_SCN_MEM_EXECUTE != 0 {
                            bits |= 4;
                        }
                        ImageSegment {
                            name: section.name().unwrap_or("").to_string(),
                            rva: section.virtual_address as u64,
                            vmsize: (section.virtual_size.max(section.size_of_raw_data)) as u64,
                            fileoff: section.pointer_to_raw_data as u64,
                            filesize: section.size_of_raw_data as u64,
                            protection: Protection::from_flags(bits),
                        }
                    })
                    .collect();
                Ok((pe.image_base as u64, segments))
            }
            Object::Mach(Mach::Binary(macho)) => {
                let mut raw = Vec::new();
                for segment in &macho.segments {
                    let segname = std::str::from_utf8(&segment.segname)
                        .unwrap_or("")
                        .trim_end_matches('\0');
                    if segment.initprot == 0 {
                        continue;
                    }
                    raw.push((segname.to_string(), segment.vmaddr, segment.vmsize, segment.fileoff, segment.filesize, segment.initprot));
                }
                let base = raw.iter().map(|s| s.1).min().unwrap_or(0);
                let segments = raw
                    .into_iter()
                    .map(|(name, vmaddr, vmsize, fileoff, filesize, prot)| ImageSegment {
                        name,
                        rva: vmaddr - base,
                        vmsize,
                        fileoff,
                        filesize,
                        protection: Protection::from_flags(prot as u32),
                    })
                    .collect();
                Ok((base, segments))
            }
            Object::Mach(Mach::Fat(_)) => Err(MemoryError::NotSupported(
                "Fat binaries not supported".to_string(),
            )),
            _ => Err(MemoryError::NotSupported(
                "Unrecognised image format".to_string(),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferred_base(&self) -> Address {
        Address::new(self.preferred_base)
    }

    pub fn segments(&self) -> &[ImageSegment] {
        &self.segments
    }

    /// Maps every loadable segment at `load_base` (the preferred base when
    /// `None`). Ranges already held by snapshot blocks are left to the
    /// snapshot. Returns the number of regions mapped.
    pub fn map_into(&self, memory: &mut SnapshotMemory, load_base: Option<Address>) -> Result<usize, MemoryError> {
        let base = load_base.unwrap_or_else(|| self.preferred_base());
        let mut mapped = 0;

        for segment in &self.segments {
            if segment.vmsize == 0 {
                continue;
            }
            let start = base
                .checked_add(segment.rva)
                .ok_or(MemoryError::AccessViolation(segment.rva))?;
            let range = MemoryRange::from_start_size(start, segment.vmsize);
            let region = MemoryRegion::new(range, segment.protection, segment.name.clone());
            let len = segment.filesize.min(segment.vmsize) as usize;
            mapped += memory.add_mapped(region, Arc::clone(&self.map), segment.fileoff as usize, len)?;
        }

        log::info!("Mapped {} regions of {} at {}", mapped, self.path.display(), base);
        Ok(mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBlock, MemoryReader};

    const LOAD_BASE: u64 = 0x7100_0000_0000;

    fn current_image() -> ModuleImage {
        ModuleImage::load(std::env::current_exe().unwrap()).unwrap()
    }

    /// A readable segment backed by at least `min` file bytes.
    fn backed_segment(image: &ModuleImage, min: u64) -> ImageSegment {
        image
            .segments()
            .iter()
            .find(|s| s.protection.can_read() && s.filesize.min(s.vmsize) >= min)
            .cloned()
            .unwrap()
    }

    fn file_bytes(segment: &ImageSegment, delta: u64, len: usize) -> Vec<u8> {
        let data = std::fs::read(std::env::current_exe().unwrap()).unwrap();
        let start = (segment.fileoff + delta) as usize;
        data[start..start + len].to_vec()
    }

    #[test]
    fn test_load_finds_code_segment() {
        let image = current_image();
        assert!(!image.segments().is_empty());
        assert!(image.segments().iter().any(|s| s.protection.is_code()));
    }

    #[test]
    fn test_map_rebased_reads_file_bytes() {
        let image = current_image();
        let segment = backed_segment(&image, 0x40);
        let mut memory = SnapshotMemory::new();

        let mapped = image.map_into(&mut memory, Some(Address::new(LOAD_BASE))).unwrap();
        assert!(mapped > 0);

        let start = Address::new(LOAD_BASE + segment.rva);
        assert_eq!(memory.read_bytes(start, 0x20).unwrap(), file_bytes(&segment, 0, 0x20));
        assert_eq!(memory.protection_at(start), Some(segment.protection));
        assert!(memory.readable_len(start) >= 0x40);
    }

    #[test]
    fn test_snapshot_block_takes_precedence() {
        let image = current_image();
        let segment = backed_segment(&image, 0x40);
        let captured = LOAD_BASE + segment.rva + 0x10;

        let mut memory = SnapshotMemory::from_blocks(vec![MemoryBlock {
            start: Address::new(captured),
            protection: Protection::Read,
            name: "vtable".to_string(),
            bytes: vec![0xAB; 0x10],
        }])
        .unwrap();

        image.map_into(&mut memory, Some(Address::new(LOAD_BASE))).unwrap();

        assert_eq!(memory.read_bytes(Address::new(captured), 0x10).unwrap(), vec![0xAB; 0x10]);
        assert_eq!(memory.protection_at(Address::new(captured)), Some(Protection::Read));
        assert_eq!(memory.readable_len(Address::new(captured)), 0x10);

        let before = Address::new(LOAD_BASE + segment.rva);
        assert_eq!(memory.read_bytes(before, 0x10).unwrap(), file_bytes(&segment, 0, 0x10));
        let after = Address::new(captured + 0x10);
        assert_eq!(memory.read_bytes(after, 0x10).unwrap(), file_bytes(&segment, 0x20, 0x10));
    }
}
