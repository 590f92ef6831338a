//! Screen-level state models.
//!
//! Plain data plus the transitions on it; screens hold these inside
//! signals and call the transition methods from event handlers.

pub mod chat;
pub mod lazy;
pub mod practice;
pub mod quiz;
