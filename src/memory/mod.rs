// Tue Jan 13 2026 - Alex

pub mod address;
pub mod error;
pub mod image;
pub mod protection;
pub mod range;
pub mod region;
pub mod snapshot;
pub mod traits;

pub use address::Address;
pub use error::MemoryError;
pub use image::ModuleImage;
pub use protection::Protection;
pub use range::MemoryRange;
pub use region::MemoryRegion;
pub use snapshot::{MemoryBlock, SnapshotMemory};
pub use traits::MemoryReader;
