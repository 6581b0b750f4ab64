//! Error types for providers, the relay service, and the client.

mod client;
mod provider;
mod service;

pub use client::ClientError;
pub use provider::ProviderError;
pub use service::{ServiceError, QUOTA_MESSAGE};
