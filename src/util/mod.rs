//! Browser-environment helpers: clock, markdown rendering and local storage.
//!
//! Each helper has a native fallback so the modules that call it still run
//! under `cargo test`.

pub mod clock;
pub mod markdown;
pub mod persistence;
