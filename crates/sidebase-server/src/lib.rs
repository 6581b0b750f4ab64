//! # Sidebase Server
//!
//! HTTP API layer for Sidebase:
//! - **POST /api/extract-keywords**: turn page text into a keyword list,
//!   memoized by content hash
//! - **GET /api/search?q=**: stream an explanation for a keyword as
//!   Server-Sent Events, memoized by keyword and replayed from cache
//!
//! Both endpoints sit on top of an opaque [`GenerativeBackend`] and an
//! append-only cache abstraction.
//!
//! [`GenerativeBackend`]: sidebase_protocols::GenerativeBackend

pub mod cache;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod routes;
pub mod search;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{Cache, MemoryCache};
pub use prompt::{PromptStore, ResponseMode};
pub use routes::create_router;
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
