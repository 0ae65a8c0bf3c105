//! Identifier generation for domain entities.
//!
//! # Responsibility
//! - Produce the opaque string identifiers used as the only externally
//!   addressable entity keys.
//!
//! # Invariants
//! - A generated guid is globally unique and never reissued.
//! - The rendered form is the canonical hyphenated UUID string.

use uuid::Uuid;

/// Generates a fresh entity guid.
///
/// The value is a 128-bit random identifier rendered in canonical form.
/// Callers assign it exactly once at entity creation; it never changes
/// afterwards.
pub fn new_guid() -> String {
    Uuid::new_v4().to_string()
}

/// Returns whether the value contains any non-whitespace text.
///
/// Blank-ness is the shared precondition check for guids, names and
/// descriptions across the service layer.
pub fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}
