//! # HTTP API
//!
//! JSON over HTTP with axum. Every operation lives under `/api`; see [`routes`] for the
//! table. Handlers are thin: they pull the token and body out of the request, call the
//! matching service and let [`ApiError`] turn failures into status codes.
//!
//! Tokens travel in `x-auth-token`; `Authorization: Bearer` works too.

mod account;
mod catalog;
pub mod error;
pub mod extract;
mod orders;
pub mod routes;
pub mod state;
mod upload;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
