// Tue Jan 13 2026 - Alex

pub mod error;
pub mod printer;
pub mod writer;

pub use error::OutputError;
pub use printer::{FileKind, SdkPrinter};
pub use writer::{CycleEntry, Manifest, PackageEntry, SdkWriter, WriteSummary, MANIFEST_FILE, SDK_DIR, UMBRELLA_HEADER};
