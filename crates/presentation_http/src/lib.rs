//! tempbox HTTP presentation layer
//!
//! Serves the three HTML views (index, inbox, message detail), binds
//! provisioned mailbox credentials to a signed session cookie, and turns
//! every provider failure into a flash message plus redirect.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

pub use config::{AppConfig, Environment};
pub use routes::create_router;
pub use state::AppState;
