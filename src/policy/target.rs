// Tue Jan 13 2026 - Alex

use crate::policy::{GenerationPolicy, PolicyError, PredefinedMember, PredefinedMethod, VirtualFunctionPattern};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON-loadable [`GenerationPolicy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetPolicy {
    pub game_name_short: String,
    pub generate_empty_files: bool,
    pub use_strings: bool,
    pub xor_strings: bool,
    pub global_member_alignment: usize,
    pub type_overrides: IndexMap<String, String>,
    pub alignas: IndexMap<String, usize>,
    pub predefined_members: IndexMap<String, Vec<PredefinedMember>>,
    pub predefined_static_members: IndexMap<String, Vec<PredefinedMember>>,
    pub predefined_methods: IndexMap<String, Vec<PredefinedMethod>>,
    pub virtual_function_patterns: IndexMap<String, Vec<VirtualFunctionPattern>>,
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self {
            game_name_short: "SDK".to_string(),
            generate_empty_files: false,
            use_strings: false,
            xor_strings: false,
            global_member_alignment: 8,
            type_overrides: IndexMap::new(),
            alignas: IndexMap::new(),
            predefined_members: IndexMap::new(),
            predefined_static_members: IndexMap::new(),
            predefined_methods: IndexMap::new(),
            virtual_function_patterns: IndexMap::new(),
        }
    }
}

impl TargetPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.game_name_short.is_empty() {
            return Err(PolicyError::Invalid("game_name_short must not be empty".to_string()));
        }
        if let Some((name, _)) = self.alignas.iter().find(|(_, a)| !a.is_power_of_two()) {
            return Err(PolicyError::Invalid(format!("alignas for {} is not a power of two", name)));
        }
        Ok(())
    }

    pub fn with_game_name_short(mut self, name: &str) -> Self {
        self.game_name_short = name.to_string();
        self
    }

    pub fn with_global_member_alignment(mut self, alignment: usize) -> Self {
        self.global_member_alignment = alignment;
        self
    }

    pub fn with_use_strings(mut self, use_strings: bool, xor_strings: bool) -> Self {
        self.use_strings = use_strings;
        self.xor_strings = xor_strings;
        self
    }

    pub fn with_empty_files(mut self, generate: bool) -> Self {
        self.generate_empty_files = generate;
        self
    }
}

impl GenerationPolicy for TargetPolicy {
    fn should_generate_empty_files(&self) -> bool {
        self.generate_empty_files
    }

    fn should_use_strings(&self) -> bool {
        self.use_strings
    }

    fn should_xor_strings(&self) -> bool {
        self.xor_strings
    }

    fn global_member_alignment(&self) -> usize {
        self.global_member_alignment
    }

    fn game_name_short(&self) -> &str {
        &self.game_name_short
    }

    fn override_type(&self, ty: &str) -> String {
        self.type_overrides
            .get(ty)
            .cloned()
            .unwrap_or_else(|| ty.to_string())
    }

    fn class_alignas(&self, full_name: &str) -> Option<usize> {
        self.alignas.get(full_name).copied().filter(|&a| a != 0)
    }

    fn predefined_members(&self, full_name: &str) -> Option<&[PredefinedMember]> {
        self.predefined_members.get(full_name).map(Vec::as_slice)
    }

    fn predefined_static_members(&self, full_name: &str) -> Option<&[PredefinedMember]> {
        self.predefined_static_members.get(full_name).map(Vec::as_slice)
    }

    fn predefined_methods(&self, full_name: &str) -> &[PredefinedMethod] {
        self.predefined_methods
            .get(full_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn virtual_function_patterns(&self, full_name: &str) -> Option<&[VirtualFunctionPattern]> {
        self.virtual_function_patterns
            .get(full_name)
            .map(Vec::as_slice)
            .filter(|patterns| !patterns.is_empty())
    }
}
