//! HTTP layer
//!
//! axum handlers over the service layer. Request bodies are validated by the
//! models' typed parse step; every failure leaves as a
//! [`SchoolDeskError`](crate::utils::errors::SchoolDeskError) rendered by
//! [`error`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
