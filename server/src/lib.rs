//! # Postforge server
//!
//! HTTP facade over the template suggestion pipeline. One POST endpoint ranks
//! the pre-computed template catalog against a user prompt; a health endpoint
//! reports whether the catalog artifact was found at startup.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use routes::build_router;
pub use state::AppState;
