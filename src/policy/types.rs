// Tue Jan 13 2026 - Alex

use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedMember {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

impl PredefinedMember {
    pub fn new(ty: &str, name: &str) -> Self {
        Self {
            ty: ty.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Body emitted inside the type declaration.
    Inline,
    /// Signature declared in the type, body emitted out of line.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedMethod {
    pub kind: MethodKind,
    #[serde(default)]
    pub signature: String,
    pub body: String,
}

impl PredefinedMethod {
    pub fn inline(body: impl Into<String>) -> Self {
        Self {
            kind: MethodKind::Inline,
            signature: String::new(),
            body: body.into(),
        }
    }

    pub fn default_with(signature: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: MethodKind::Default,
            signature: signature.into(),
            body: body.into(),
        }
    }

    pub fn is_inline(&self) -> bool {
        self.kind == MethodKind::Inline
    }
}

/// Byte signature of a virtual function plus the inline method emitted when a
/// virtual slot matches it. `{index}` in the template is replaced by the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualFunctionPattern {
    pub pattern: Pattern,
    pub template: String,
}

impl VirtualFunctionPattern {
    pub fn new(pattern: Pattern, template: &str) -> Self {
        Self {
            pattern,
            template: template.to_string(),
        }
    }

    pub fn render(&self, slot: usize) -> String {
        self.template.replace("{index}", &slot.to_string())
    }
}
