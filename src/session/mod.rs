//! Session gating: resolve the auth session once, then follow provider
//! notifications for the rest of the process lifetime.
//!
//! ARCHITECTURE
//! ============
//! `gate` is a pure reducer over provider events. `controller` connects it to
//! an `AuthProvider` and owns the change subscription. `provider` defines the
//! provider contract the backend implements.

pub mod controller;
pub mod gate;
pub mod provider;

pub use controller::{SessionController, SessionHandle};
pub use gate::{GateEffect, GateEvent, GateState, GateView, SessionGate};
pub use provider::{AuthEvent, AuthProvider, SessionChange};
