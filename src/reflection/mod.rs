// Tue Jan 13 2026 - Alex

#[cfg(test)]
pub mod builder;
pub mod error;
pub mod flags;
pub mod graph;
pub mod info;
pub mod object;
pub mod property;
pub mod snapshot;

#[cfg(test)]
pub use builder::GraphBuilder;
pub use error::ReflectionError;
pub use flags::{stringify_flags, FunctionFlags, PropertyFlags};
pub use graph::TypeGraph;
pub use info::{property_info, PropertyInfo, PropertyType};
pub use object::{is_placeholder_name, FunctionData, KindTag, ObjectId, ObjectKind, ReflectedObject, StructData, RESERVED_MARKERS};
pub use property::{PropertyData, PropertyKind};
pub use snapshot::{Snapshot, SnapshotGraph};
