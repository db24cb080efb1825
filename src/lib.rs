// Tue Jan 15 2026 - Alex

pub mod config;
pub mod generator;
pub mod memory;
pub mod naming;
pub mod output;
pub mod pattern;
pub mod policy;
pub mod reflection;
pub mod utils;

pub use config::Config;
pub use generator::{GenerationContext, GenerationResult, Generator, ResolutionState};
pub use memory::{MemoryReader, ModuleImage, SnapshotMemory};
pub use naming::{NameResolver, NameValidator};
pub use output::{SdkPrinter, SdkWriter};
pub use pattern::{Pattern, PatternMatcher};
pub use policy::{GenerationPolicy, TargetPolicy};
pub use reflection::{Snapshot, SnapshotGraph, TypeGraph};
