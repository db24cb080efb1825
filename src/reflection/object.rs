// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use crate::reflection::{FunctionFlags, PropertyData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substrings marking default instances and half-initialised objects.
pub const RESERVED_MARKERS: [&str; 3] = ["Default__", "<uninitialized>", "PLACEHOLDER-CLASS"];

pub fn is_placeholder_name(name: &str) -> bool {
    RESERVED_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Identity handle of a reflected object. Equality is identity, not name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectedObject {
    pub id: ObjectId,
    /// Slot in the runtime's global object table.
    #[serde(default)]
    pub index: u32,
    pub name: String,
    /// Native name with prefix (`UObject`, `FVector`), derived when absent.
    #[serde(default)]
    pub cpp_name: Option<String>,
    pub full_name: String,
    #[serde(default)]
    pub outer: Option<ObjectId>,
    #[serde(default)]
    pub package: Option<ObjectId>,
    /// Live instance address of the object itself.
    #[serde(default)]
    pub address: Address,
    pub kind: ObjectKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    Package,
    Enum { names: Vec<String> },
    Const { value: String },
    ScriptStruct(StructData),
    Class(StructData),
    Function(FunctionData),
    Property(PropertyData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Package,
    Enum,
    Const,
    ScriptStruct,
    Class,
    Function,
    Property,
}

impl ObjectKind {
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Package => KindTag::Package,
            Self::Enum { .. } => KindTag::Enum,
            Self::Const { .. } => KindTag::Const,
            Self::ScriptStruct(_) => KindTag::ScriptStruct,
            Self::Class(_) => KindTag::Class,
            Self::Function(_) => KindTag::Function,
            Self::Property(_) => KindTag::Property,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructData {
    #[serde(default)]
    pub super_struct: Option<ObjectId>,
    /// Declared total size in bytes, inherited part included.
    pub property_size: usize,
    #[serde(default)]
    pub children: Vec<ObjectId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionData {
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub children: Vec<ObjectId>,
}

impl FunctionData {
    pub fn function_flags(&self) -> FunctionFlags {
        FunctionFlags::from_bits_retain(self.flags)
    }
}

impl ReflectedObject {
    pub fn is_placeholder(&self) -> bool {
        is_placeholder_name(&self.name)
    }

    pub fn struct_data(&self) -> Option<&StructData> {
        match &self.kind {
            ObjectKind::ScriptStruct(data) | ObjectKind::Class(data) => Some(data),
            _ => None,
        }
    }

    pub fn property_data(&self) -> Option<&PropertyData> {
        match &self.kind {
            ObjectKind::Property(data) => Some(data),
            _ => None,
        }
    }

    pub fn function_data(&self) -> Option<&FunctionData> {
        match &self.kind {
            ObjectKind::Function(data) => Some(data),
            _ => None,
        }
    }

    /// Ordered child list of a struct, class or function.
    pub fn children(&self) -> &[ObjectId] {
        match &self.kind {
            ObjectKind::ScriptStruct(data) | ObjectKind::Class(data) => &data.children,
            ObjectKind::Function(data) => &data.children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_names() {
        assert!(is_placeholder_name("Default__Actor"));
        assert!(is_placeholder_name("Foo<uninitialized>"));
        assert!(is_placeholder_name("PLACEHOLDER-CLASS_3"));
        assert!(!is_placeholder_name("DefaultPawn"));
    }

    #[test]
    fn test_deserialize_tagged_kinds() {
        let json = r#"{
            "id": 7,
            "name": "Vector",
            "full_name": "ScriptStruct CoreUObject.Vector",
            "package": 1,
            "kind": { "type": "script_struct", "property_size": 12, "children": [8, 9, 10] }
        }"#;
        let object: ReflectedObject = serde_json::from_str(json).unwrap();
        assert_eq!(object.kind.tag(), KindTag::ScriptStruct);
        assert_eq!(object.struct_data().unwrap().property_size, 12);
        assert_eq!(object.children().len(), 3);
        assert!(object.address.is_null());
    }
}
