//! Client-side errors.
//!
//! All of these are caught locally and rendered as a transient notice or an
//! error panel. They must never escape as a panic.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("The server responded with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
