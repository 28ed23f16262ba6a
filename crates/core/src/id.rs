//! Resource identifiers.

use uuid::Uuid;

/// Anything stored in a table row that carries a primary identifier.
pub trait HasId {
    /// Returns the primary identifier.
    fn id(&self) -> &str;
}

/// Generate a fresh resource identifier.
///
/// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
/// for determinism.
pub fn generate_uuid() -> String {
    Uuid::now_v7().to_string()
}
