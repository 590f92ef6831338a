//! Static learning content, plan list and policy texts.

pub mod catalog;
pub mod plans;
pub mod policies;
