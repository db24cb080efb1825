// Tue Jan 13 2026 - Alex

use crate::pattern::PatternError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte signature with per-byte significance mask (`??` = wildcard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    bytes: Vec<u8>,
    mask: Vec<bool>,
}

impl Pattern {
    pub fn new(bytes: Vec<u8>, mask: Vec<bool>) -> Result<Self, PatternError> {
        if bytes.len() != mask.len() {
            return Err(PatternError::MaskLengthMismatch(bytes.len(), mask.len()));
        }
        if bytes.is_empty() {
            return Err(PatternError::PatternTooShort(0));
        }
        Ok(Self { bytes, mask })
    }

    /// Parses `"48 8B ?? 05 ?"` style text. Every token must be a two-digit
    /// hex byte or a wildcard.
    pub fn from_ida_pattern(pattern: &str) -> Result<Self, PatternError> {
        let mut bytes = Vec::new();
        let mut mask = Vec::new();

        for token in pattern.split_whitespace() {
            if token == "?" || token == "??" {
                bytes.push(0);
                mask.push(false);
                continue;
            }
            if token.len() != 2 {
                return Err(PatternError::InvalidPattern(token.to_string()));
            }
            let byte = u8::from_str_radix(token, 16)
                .map_err(|_| PatternError::InvalidPattern(token.to_string()))?;
            bytes.push(byte);
            mask.push(true);
        }

        if !mask.iter().any(|&m| m) {
            return Err(PatternError::InvalidWildcard(pattern.to_string()));
        }

        Self::new(bytes, mask)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PatternError> {
        Self::new(bytes.to_vec(), vec![true; bytes.len()])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        if data.len() < self.bytes.len() {
            return false;
        }

        self.bytes
            .iter()
            .zip(self.mask.iter())
            .zip(data.iter())
            .all(|((pattern_byte, &significant), &data_byte)| !significant || *pattern_byte == data_byte)
    }

    /// Offset of the first match inside `data`.
    pub fn find_in(&self, data: &[u8]) -> Option<usize> {
        if self.bytes.is_empty() || data.len() < self.bytes.len() {
            return None;
        }

        let first_significant = self.mask.iter().position(|&m| m).unwrap_or(0);
        let first_byte = self.bytes[first_significant];

        (0..=(data.len() - self.bytes.len()))
            .filter(|&i| data[i + first_significant] == first_byte)
            .find(|&i| self.matches(&data[i..]))
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_ida_pattern(&value)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (byte, significant)) in self.bytes.iter().zip(self.mask.iter()).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if *significant {
                write!(f, "{:02X}", byte)?;
            } else {
                write!(f, "??")?;
            }
        }
        Ok(())
    }
}
