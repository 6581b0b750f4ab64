//! Keyword extraction endpoint.
//!
//! `POST /api/extract-keywords` with body `{"text": "..."}` returns a JSON
//! array of keyword strings. Identical page text is answered from cache
//! without re-invoking the model.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use sidebase_protocols::error::ServiceError;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for keyword extraction.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Raw page text. Missing or blank text is rejected.
    pub text: Option<String>,
}

/// Deterministic content hash used as the cache key suffix.
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Pull a JSON string array out of raw model output.
///
/// The model is asked for a JSON array but often fences it in a markdown
/// code block; the fenced form is tried first, bare JSON second.
pub fn parse_keyword_array(raw: &str) -> Result<Vec<String>, ServiceError> {
    let candidate = match fenced_json(raw) {
        Some(inner) => inner,
        None => raw.trim(),
    };

    serde_json::from_str(candidate).map_err(|e| ServiceError::ParseError(e.to_string()))
}

fn fenced_json(raw: &str) -> Option<&str> {
    let start = raw.find("```json")? + "```json".len();
    let end = raw[start..].find("```")?;
    Some(raw[start..start + end].trim())
}

/// `POST /api/extract-keywords` handler.
pub async fn extract_keywords(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExtractRequest>,
) -> Result<Response, ApiError> {
    let text = match body.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            return Err(ServiceError::InvalidRequest("Text content is required.".to_string()).into())
        }
    };

    let cache_key = format!("extract-keywords:{}", content_hash(&text));
    if let Some(cached) = state.extraction_cache.get(&cache_key) {
        debug!("extraction cache hit: {}", cache_key);
        return Ok(Json(cached).into_response());
    }

    let prompt = state.prompts.render_extraction(&text);
    let raw = state
        .backend
        .generate(&prompt)
        .await
        .map_err(|e| {
            error!("keyword extraction failed: {}", e);
            ApiError(e.into())
        })?;

    let keywords = parse_keyword_array(&raw)?;
    debug!("extracted {} keywords", keywords.len());

    state.extraction_cache.insert(cache_key, keywords.clone());
    Ok(Json(keywords).into_response())
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
