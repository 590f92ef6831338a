//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the `Navigator`, `SessionHandle` and `Services` contexts
//! provided by `app::App`; none of them own backend state.

pub mod link;
pub mod load_gate;
pub mod loading;
pub mod markdown;
pub mod not_found;
pub mod shell;
