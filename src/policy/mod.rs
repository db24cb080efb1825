// Tue Jan 13 2026 - Alex

pub mod error;
pub mod target;
pub mod types;

pub use error::PolicyError;
pub use target::TargetPolicy;
pub use types::{MethodKind, PredefinedMember, PredefinedMethod, VirtualFunctionPattern};

/// Per-target generation overrides. Lookups are keyed by an object's full
/// name (`Class Engine.Actor`).
pub trait GenerationPolicy: Send + Sync {
    fn should_generate_empty_files(&self) -> bool;

    /// Resolve functions and classes by name at runtime instead of by global index.
    fn should_use_strings(&self) -> bool;

    /// Wrap embedded names in `_xor_(..)`.
    fn should_xor_strings(&self) -> bool;

    /// Trailing gaps smaller than this are treated as padding.
    fn global_member_alignment(&self) -> usize;

    fn game_name_short(&self) -> &str;

    /// Replacement for a builtin type name, e.g. the boolean type used for parameters.
    fn override_type(&self, ty: &str) -> String;

    fn class_alignas(&self, full_name: &str) -> Option<usize>;

    fn predefined_members(&self, full_name: &str) -> Option<&[PredefinedMember]>;

    fn predefined_static_members(&self, full_name: &str) -> Option<&[PredefinedMember]>;

    fn predefined_methods(&self, full_name: &str) -> &[PredefinedMethod];

    fn virtual_function_patterns(&self, full_name: &str) -> Option<&[VirtualFunctionPattern]>;
}
