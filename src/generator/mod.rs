// Tue Jan 13 2026 - Alex

pub mod context;
pub mod engine;
pub mod error;
pub mod layout;
pub mod method;
pub mod ordering;
pub mod package;
pub mod types;
pub mod vtable;

pub use context::GenerationContext;
pub use engine::{GenerationResult, Generator};
pub use error::GeneratorError;
pub use layout::{compare_properties, LayoutReconstructor, NameCounter};
pub use method::{Method, MethodSynthesizer, ParamType, Parameter};
pub use ordering::{CycleDiagnostic, DefineStatus, DefinedSet, PackageOrder, Placement, ResolutionState};
pub use package::PackageBuilder;
pub use types::{Class, Enum, Member, PackageOutput, ScriptStruct};
pub use vtable::VirtualSlotMatcher;
