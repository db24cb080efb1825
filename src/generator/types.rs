// Tue Jan 13 2026 - Alex

use crate::generator::Method;
use crate::policy::PredefinedMethod;
use crate::reflection::ObjectId;
use indexmap::IndexMap;
use serde::Serialize;

/// One emitted field of a struct or class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub offset: usize,
    pub size: usize,
    pub comment: String,
    pub flags: String,
}

impl Member {
    pub fn new(name: String, ty: String, offset: usize, size: usize) -> Self {
        Self {
            name,
            ty,
            offset,
            size,
            comment: String::new(),
            flags: String::new(),
        }
    }

    /// Filler covering `size` bytes nobody explains.
    pub fn unknown(id: usize, offset: usize, size: usize, reason: impl Into<String>) -> Self {
        Self {
            name: format!("UnknownData{:02}[0x{:X}]", id, size),
            ty: "unsigned char".to_string(),
            offset,
            size,
            comment: reason.into(),
            flags: String::new(),
        }
    }

    pub fn is_filler(&self) -> bool {
        self.name.starts_with("UnknownData") && self.ty == "unsigned char"
    }

    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub name: String,
    pub full_name: String,
    /// Value names in declaration order; the position is the value.
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptStruct {
    #[serde(skip)]
    pub id: ObjectId,
    pub name: String,
    pub full_name: String,
    pub name_cpp: String,
    /// Declaration head, e.g. `struct alignas(16) FPlane : public FVector`.
    pub name_cpp_full: String,
    pub size: usize,
    pub inherited_size: usize,
    pub members: Vec<Member>,
    #[serde(skip)]
    pub predefined_methods: Vec<PredefinedMethod>,
}

impl ScriptStruct {
    pub fn has_content(&self) -> bool {
        !self.members.is_empty() || !self.predefined_methods.is_empty()
    }

    pub fn own_size(&self) -> usize {
        self.size.saturating_sub(self.inherited_size)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Class {
    #[serde(flatten)]
    pub record: ScriptStruct,
    #[serde(skip)]
    pub methods: Vec<Method>,
}

impl Class {
    pub fn has_content(&self) -> bool {
        self.record.has_content() || !self.methods.is_empty()
    }
}

/// Everything generated for one package, ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct PackageOutput {
    pub id: ObjectId,
    pub name: String,
    pub enums: Vec<Enum>,
    /// Name to literal; a later constant with the same name replaces the value.
    pub constants: IndexMap<String, String>,
    pub script_structs: Vec<ScriptStruct>,
    pub classes: Vec<Class>,
}

impl PackageOutput {
    pub fn new(id: ObjectId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn has_content(&self) -> bool {
        self.enums.iter().any(|e| !e.values.is_empty())
            || self.script_structs.iter().any(ScriptStruct::has_content)
            || self.classes.iter().any(Class::has_content)
    }

    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_member_name() {
        let member = Member::unknown(3, 0x10, 0x1C, "MISSED OFFSET");
        assert_eq!(member.name, "UnknownData03[0x1C]");
        assert_eq!(member.ty, "unsigned char");
        assert_eq!(member.end(), 0x2C);
        assert!(member.is_filler());
    }

    #[test]
    fn test_empty_package_has_no_content() {
        let mut package = PackageOutput::new(ObjectId(1), "Engine");
        assert!(!package.has_content());

        package.enums.push(Enum { name: "EEmpty".into(), full_name: "Enum Engine.EEmpty".into(), values: vec![] });
        package.constants.insert("A".into(), "1".into());
        assert!(!package.has_content());

        package.enums[0].values.push("One".into());
        assert!(package.has_content());
    }
}
