//! Folio API Library
//!
//! HTTP handlers, authentication and application setup for the portfolio
//! backend. The binary in `main.rs` only loads configuration and calls
//! [`setup::initialize_app`].

mod api_doc;
mod handlers;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
