//! Platform hosts
//!
//! - `headless`: simulated frame clock, used natively and in tests
//! - `web`: browser canvas bindings (wasm32 only)

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{HeadlessRunner, RoundReport};
