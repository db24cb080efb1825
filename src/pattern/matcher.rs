// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader};
use crate::pattern::Pattern;

/// Searches for a pattern in a bounded window starting at a code address.
pub struct PatternMatcher<'a> {
    reader: &'a dyn MemoryReader,
    window: usize,
}

impl<'a> PatternMatcher<'a> {
    pub const DEFAULT_WINDOW: usize = 0x200;

    pub fn new(reader: &'a dyn MemoryReader) -> Self {
        Self {
            reader,
            window: Self::DEFAULT_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Offset of the first match within `[start, start + window)`, clamped to
    /// the readable part of the region holding `start`.
    pub fn find_in_window(&self, pattern: &Pattern, start: Address) -> Result<Option<usize>, MemoryError> {
        let len = (self.window as u64).min(self.reader.readable_len(start)) as usize;
        if len == 0 {
            return Err(MemoryError::AccessViolation(start.as_u64()));
        }
        let data = self.reader.read_bytes(start, len)?;
        Ok(pattern.find_in(&data))
    }
}
