//! Backend collaborators reached over HTTP and WebSocket.
//!
//! SYSTEM CONTEXT
//! ==============
//! `supabase` holds the shared client and request plumbing. `auth`,
//! `functions`, `store`, `storage` and `realtime` wrap the backend services;
//! `payment` bridges the checkout widget. Every call returns a typed error
//! that the calling screen turns into local UI state.

pub mod auth;
pub mod error;
pub mod functions;
pub mod payment;
pub mod realtime;
pub mod storage;
pub mod store;
pub mod supabase;
pub mod types;

pub use error::{AuthError, BackendError, PaymentError};
pub use supabase::SupabaseClient;
