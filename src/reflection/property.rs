// Tue Jan 13 2026 - Alex

use crate::reflection::{ObjectId, PropertyFlags};
use serde::{Deserialize, Serialize};

fn default_array_dim() -> usize {
    1
}

fn native_bool_mask() -> u8 {
    0xFF
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyData {
    pub offset: usize,
    /// Raw per-element size reported by the runtime.
    pub element_size: usize,
    #[serde(default = "default_array_dim")]
    pub array_dim: usize,
    #[serde(default)]
    pub flags: u64,
    pub kind: PropertyKind,
}

impl PropertyData {
    pub fn property_flags(&self) -> PropertyFlags {
        PropertyFlags::from_bits_retain(self.flags)
    }

    /// Raw element size scaled by the fixed array dimension.
    pub fn total_size(&self) -> usize {
        self.element_size * self.array_dim.max(1)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.kind, PropertyKind::Bool { .. })
    }

    pub fn is_bit_field(&self) -> bool {
        matches!(self.kind, PropertyKind::Bool { field_mask } if field_mask != 0xFF)
    }

    /// Bit position key used to order bit-fields sharing one backing byte.
    pub fn bit_mask(&self) -> Option<u8> {
        match self.kind {
            PropertyKind::Bool { field_mask } => Some(field_mask),
            _ => None,
        }
    }
}

/// Closed set of property sub-kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    Int8,
    Int16,
    Int,
    Int64,
    #[serde(rename = "uint16")]
    UInt16,
    #[serde(rename = "uint32")]
    UInt32,
    #[serde(rename = "uint64")]
    UInt64,
    Float,
    Double,
    Byte {
        #[serde(default)]
        enum_type: Option<ObjectId>,
    },
    Bool {
        #[serde(default = "native_bool_mask")]
        field_mask: u8,
    },
    Name,
    Str,
    Text,
    Object {
        #[serde(default)]
        class: Option<ObjectId>,
    },
    Class {
        #[serde(default)]
        meta_class: Option<ObjectId>,
    },
    Interface {
        #[serde(default)]
        interface_class: Option<ObjectId>,
    },
    WeakObject {
        #[serde(default)]
        class: Option<ObjectId>,
    },
    LazyObject {
        #[serde(default)]
        class: Option<ObjectId>,
    },
    AssetObject {
        #[serde(default)]
        class: Option<ObjectId>,
    },
    Delegate,
    MulticastDelegate,
    Struct {
        script_struct: ObjectId,
    },
    Array {
        inner: ObjectId,
    },
    Set {
        element: ObjectId,
    },
    Map {
        key: ObjectId,
        value: ObjectId,
    },
    Unknown {
        #[serde(default)]
        class_name: String,
    },
}

impl PropertyKind {
    /// Element/key/value properties of a container kind.
    pub fn container_elements(&self) -> Vec<ObjectId> {
        match self {
            Self::Array { inner } => vec![*inner],
            Self::Set { element } => vec![*element],
            Self::Map { key, value } => vec![*key, *value],
            _ => Vec::new(),
        }
    }
}
