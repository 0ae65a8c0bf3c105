//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `checklist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("checklist_core ping={}", checklist_core::ping());
    println!("checklist_core version={}", checklist_core::core_version());
}
