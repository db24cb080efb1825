// Tue Jan 13 2026 - Alex

pub mod validator;

pub use validator::NameValidator;

use crate::reflection::ReflectedObject;

/// Turns raw runtime identifiers into identifiers safe to emit.
pub trait NameResolver {
    fn sanitize(&self, raw: &str) -> String;

    /// Sanitized native name, disambiguated against every other object of the
    /// same kind in the run.
    fn unique_name(&self, object: &ReflectedObject) -> String;
}
