// Tue Jan 13 2026 - Alex

use crate::generator::GeneratorError;
use crate::memory::{Address, MemoryReader};
use crate::pattern::PatternMatcher;
use crate::policy::{PredefinedMethod, VirtualFunctionPattern};

pub const MAX_VIRTUAL_SLOTS: usize = 1024;

/// Binds virtual function patterns to slots of a live instance's virtual table.
pub struct VirtualSlotMatcher<'a> {
    reader: &'a dyn MemoryReader,
    window: usize,
    max_slots: usize,
}

impl<'a> VirtualSlotMatcher<'a> {
    pub fn new(reader: &'a dyn MemoryReader) -> Self {
        Self {
            reader,
            window: PatternMatcher::DEFAULT_WINDOW,
            max_slots: MAX_VIRTUAL_SLOTS,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// Entries of the table the instance points to, up to the first one that
    /// does not point into executable memory.
    pub fn read_table(&self, owner: &str, instance: Address) -> Result<Vec<Address>, GeneratorError> {
        let unreadable = |at: Address| GeneratorError::VirtualTable(owner.to_string(), at);

        let table = self.reader.read_ptr(instance).map_err(|_| unreadable(instance))?;
        let mut slots = Vec::new();
        for index in 0..self.max_slots {
            let entry_addr = table.slot(index).ok_or_else(|| unreadable(table))?;
            let entry = self.reader.read_ptr(entry_addr).map_err(|_| unreadable(entry_addr))?;
            match self.reader.protection_at(entry) {
                Some(protection) if protection.is_code() => slots.push(entry),
                _ => break,
            }
        }
        Ok(slots)
    }

    /// One inline method per pattern found, bound to the first matching slot.
    pub fn match_patterns(
        &self,
        owner: &str,
        instance: Address,
        patterns: &[VirtualFunctionPattern],
    ) -> Result<Vec<PredefinedMethod>, GeneratorError> {
        let slots = self.read_table(owner, instance)?;
        log::debug!("{}: {} virtual slots at {}", owner, slots.len(), instance);

        let matcher = PatternMatcher::new(self.reader).with_window(self.window);
        let mut methods = Vec::new();
        for pattern in patterns {
            for (index, &entry) in slots.iter().enumerate() {
                if matcher.find_in_window(&pattern.pattern, entry)?.is_some() {
                    methods.push(PredefinedMethod::inline(pattern.render(index)));
                    break;
                }
            }
        }
        Ok(methods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBlock, Protection, SnapshotMemory};
    use crate::pattern::Pattern;

    const INSTANCE: u64 = 0x1000;

    fn block(start: u64, protection: Protection, bytes: Vec<u8>) -> MemoryBlock {
        MemoryBlock { start: Address::new(start), protection, name: String::new(), bytes }
    }

    fn pointers(values: &[u64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// Two code slots at 0x3000 and 0x3400, then a pointer into data.
    fn memory() -> SnapshotMemory {
        let mut code = vec![0x90; 0x600];
        code[0x10..0x12].copy_from_slice(&[0x40, 0x53]);
        code[0x420..0x423].copy_from_slice(&[0x48, 0x89, 0x5C]);
        SnapshotMemory::from_blocks(vec![
            block(INSTANCE, Protection::ReadWrite, pointers(&[0x2000])),
            block(0x2000, Protection::Read, pointers(&[0x3000, 0x3400, 0x2000, 0x3000])),
            block(0x3000, Protection::ReadExecute, code),
        ])
        .unwrap()
    }

    fn pattern(text: &str, template: &str) -> VirtualFunctionPattern {
        VirtualFunctionPattern::new(Pattern::from_ida_pattern(text).unwrap(), template)
    }

    #[test]
    fn test_slot_count_stops_at_non_code() {
        let memory = memory();
        let slots = VirtualSlotMatcher::new(&memory).read_table("Class A.B", Address::new(INSTANCE)).unwrap();
        assert_eq!(slots, vec![Address::new(0x3000), Address::new(0x3400)]);
    }

    #[test]
    fn test_null_entry_ends_table() {
        let mut code = vec![0x90; 0x600];
        code[0x400..0x402].copy_from_slice(&[0x40, 0x53]);
        let memory = SnapshotMemory::from_blocks(vec![
            block(INSTANCE, Protection::ReadWrite, pointers(&[0x2000])),
            block(0x2000, Protection::Read, pointers(&[0x3000, 0, 0x3400])),
            block(0x3000, Protection::ReadExecute, code),
        ])
        .unwrap();

        let matcher = VirtualSlotMatcher::new(&memory);
        let slots = matcher.read_table("Class A.B", Address::new(INSTANCE)).unwrap();
        assert_eq!(slots, vec![Address::new(0x3000)]);

        let methods = matcher
            .with_window(0x10)
            .match_patterns("Class A.B", Address::new(INSTANCE), &[pattern("40 53", "ProcessEvent {index}")])
            .unwrap();
        assert!(methods.is_empty());
    }

    #[test]
    fn test_binds_first_matching_slot() {
        let memory = memory();
        let patterns = vec![
            pattern("48 89 5C", "PostRender {index}"),
            pattern("90 90 90", "Nop {index}"),
            pattern("CC CC CC CC", "Missing {index}"),
            pattern("40 53", "ProcessEvent {index}"),
        ];
        let methods = VirtualSlotMatcher::new(&memory)
            .match_patterns("Class A.B", Address::new(INSTANCE), &patterns)
            .unwrap();

        let bodies: Vec<&str> = methods.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["PostRender 1", "Nop 0", "ProcessEvent 0"]);
        assert!(methods.iter().all(PredefinedMethod::is_inline));
    }

    #[test]
    fn test_unreadable_table_is_error() {
        let memory = memory();
        let patterns = vec![pattern("40 53", "ProcessEvent {index}")];
        let result = VirtualSlotMatcher::new(&memory).match_patterns("Class A.B", Address::new(0x9000), &patterns);
        assert!(matches!(result, Err(GeneratorError::VirtualTable(ref owner, _)) if owner == "Class A.B"));

        let dangling = SnapshotMemory::from_blocks(vec![block(INSTANCE, Protection::ReadWrite, pointers(&[0x7000]))]).unwrap();
        let result = VirtualSlotMatcher::new(&dangling).read_table("Class A.B", Address::new(INSTANCE));
        assert!(matches!(result, Err(GeneratorError::VirtualTable(_, at)) if at == Address::new(0x7000)));
    }
}
