//! Content pipeline: guards, keyword fetch, and highlighting.
//!
//! Failure of any step surfaces as a transient, dismissible on-page notice;
//! nothing here ever panics or mutates the page before all guards pass.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use sidebase_protocols::error::ClientError;

use crate::highlight::{HighlightReport, Highlighter};
use crate::page::TextPage;
use crate::settings::Settings;

/// Pages with less trimmed text than this are skipped entirely.
pub const MIN_PAGE_TEXT_CHARS: usize = 200;

/// How long an error notice stays on the page before auto-dismissing.
pub const NOTICE_TTL: Duration = Duration::from_secs(7);

/// Where keyword lists come from.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ClientError>;
}

/// Keyword source backed by the extraction endpoint.
pub struct HttpKeywordSource {
    client: Client,
    base_url: String,
}

impl HttpKeywordSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl KeywordSource for HttpKeywordSource {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/api/extract-keywords", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The body may not be JSON at all; fall back to a status message.
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body["error"].as_str().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("The server responded with status {}", status));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// A dismissible, auto-expiring on-page error notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub message: String,
    pub ttl: Duration,
}

impl ErrorNotice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ttl: NOTICE_TTL,
        }
    }
}

/// Why a page was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blacklisted,
    PageTooShort,
    NoKeywords,
}

/// Result of running the pipeline over a page.
pub enum Outcome {
    /// A guard fired; the page was not mutated and no notice is shown.
    Skipped(SkipReason),
    /// Keywords were highlighted. The matcher is returned for click
    /// handling.
    Highlighted(HighlightReport, Highlighter),
    /// Something failed; show a transient notice.
    Notice(ErrorNotice),
}

/// The content-script flow: guards, extraction, highlighting.
pub struct ContentPipeline<S: KeywordSource> {
    source: S,
    settings: Settings,
}

impl<S: KeywordSource> ContentPipeline<S> {
    pub fn new(source: S, settings: Settings) -> Self {
        Self { source, settings }
    }

    pub async fn process(&self, page: &mut dyn TextPage) -> Outcome {
        let hostname = page.hostname().to_string();
        if self.settings.is_blacklisted(&hostname) {
            info!("skipping blacklisted site: {}", hostname);
            return Outcome::Skipped(SkipReason::Blacklisted);
        }

        let text = page.body_text();
        if text.trim().chars().count() < MIN_PAGE_TEXT_CHARS {
            info!("page content too short, skipping");
            return Outcome::Skipped(SkipReason::PageTooShort);
        }

        let keywords = match self.source.extract(&text).await {
            Ok(keywords) => keywords,
            Err(e) => {
                warn!("failed to fetch keywords: {}", e);
                return Outcome::Notice(ErrorNotice::new(e.to_string()));
            }
        };

        match Highlighter::build(&keywords, &self.settings.highlight_color) {
            Ok(Some(highlighter)) => {
                let report = highlighter.highlight(page);
                Outcome::Highlighted(report, highlighter)
            }
            Ok(None) => Outcome::Skipped(SkipReason::NoKeywords),
            Err(e) => Outcome::Notice(ErrorNotice::new(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
