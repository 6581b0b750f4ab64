//! Shared application state.

use std::sync::Arc;

use sidebase_protocols::generate::GenerativeBackend;

use crate::cache::{Cache, MemoryCache};
use crate::prompt::{PromptStore, ResponseMode};

/// State shared by all request handlers.
pub struct AppState {
    /// The generative model backend.
    pub backend: Arc<dyn GenerativeBackend>,
    /// Loaded prompt templates.
    pub prompts: PromptStore,
    /// Sidebar prompt mode, part of the relay cache key.
    pub mode: ResponseMode,
    /// Content-hash keyed keyword lists.
    pub extraction_cache: Arc<dyn Cache<Vec<String>>>,
    /// Keyword keyed full response texts.
    pub response_cache: Arc<dyn Cache<String>>,
}

impl AppState {
    /// Create state with fresh in-memory caches.
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        prompts: PromptStore,
        mode: ResponseMode,
    ) -> Self {
        Self {
            backend,
            prompts,
            mode,
            extraction_cache: Arc::new(MemoryCache::new()),
            response_cache: Arc::new(MemoryCache::new()),
        }
    }
}
