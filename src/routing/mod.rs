//! Hash-based navigation: location parsing, the view registry, history
//! backends and the navigation controller.
//!
//! ARCHITECTURE
//! ============
//! `parser` is a total function from a location string to a `Route`.
//! `navigation` owns the current location and re-parses on every history
//! notification. `registry` maps each `ViewId` to its screen and layout.

pub mod history;
pub mod navigation;
pub mod parser;
pub mod registry;

pub use history::{HistoryBackend, MemoryHistory};
pub use navigation::{NavState, NavigationController, Navigator};
pub use parser::{Location, Route, RouteParams, ViewId, parse};
pub use registry::Layout;
