//! Route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its screen-scoped state and collaborator calls; shared
//! chrome lives in `components`. Collaborator failures are logged and shown
//! inline on the page that made the call.

pub mod auth;
pub mod chat;
pub mod home;
pub mod learning;
pub mod patterns;
pub mod policies;
pub mod practice;
pub mod pricing;
pub mod profile;
pub mod quiz;
pub mod quiz_results;
