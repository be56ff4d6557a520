//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tidylist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("tidylist_core ping={}", tidylist_core::ping());
    println!("tidylist_core version={}", tidylist_core::core_version());
}
