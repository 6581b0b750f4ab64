//! # Sidebase Protocols
//!
//! Shared protocol definitions for the Sidebase system.
//!
//! - [`GenerativeBackend`] - Trait for generative model providers
//! - [`StreamEvent`] - Events on the relay token stream
//! - Error taxonomy: [`ProviderError`], [`ServiceError`], [`ClientError`]

pub mod error;
pub mod events;
pub mod generate;

pub use error::{ClientError, ProviderError, ServiceError};
pub use events::{ErrorPayload, StreamEvent, TokenPayload, END_EVENT, ERROR_EVENT};
pub use generate::{FinishReason, GenerationChunk, GenerationStream, GenerativeBackend};
