//! Google Gemini backend for Sidebase.
//!
//! Implements [`sidebase_protocols::GenerativeBackend`] over the Gemini
//! REST API, with SSE-based streaming.

mod client;
mod provider;
mod types;

pub use client::GeminiClient;
pub use provider::GeminiProvider;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
