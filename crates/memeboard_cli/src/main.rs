//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `memeboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("memeboard_core ping={}", memeboard_core::ping());
    println!("memeboard_core version={}", memeboard_core::core_version());
}
