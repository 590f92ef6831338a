//! # candle-academy
//!
//! Leptos + WASM frontend for the Candle Academy trading-education app.
//!
//! The crate is split into a small navigation/session core (`routing`,
//! `session`, `subscription`) that builds and tests natively, and the
//! browser-facing layers (`net`, `pages`, `components`) whose browser glue is
//! compiled only with the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod content;
pub mod net;
pub mod pages;
pub mod routing;
pub mod session;
pub mod state;
pub mod subscription;
pub mod util;
