//! Prompt template loading and rendering.
//!
//! Templates are plain-text files with a single placeholder token that is
//! substituted by literal string replacement (first occurrence only). This
//! is deliberately not a templating engine.

use std::path::Path;

use sidebase_protocols::error::ServiceError;

/// Placeholder in the extraction template.
pub const PAGE_CONTENT_PLACEHOLDER: &str = "{page_content}";

/// Placeholder in the sidebar templates.
pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// Which sidebar template the relay uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Search,
    Summarize,
}

impl ResponseMode {
    /// Cache-key discriminator for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Summarize => "summarize",
        }
    }
}

impl std::str::FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Self::Search),
            "summarize" => Ok(Self::Summarize),
            other => Err(format!("unknown response mode: {}", other)),
        }
    }
}

/// Loaded prompt templates.
#[derive(Debug, Clone)]
pub struct PromptStore {
    extract_keywords: String,
    sidebar_search: String,
    sidebar_summarize: String,
}

impl PromptStore {
    /// Load the three templates from a directory.
    pub async fn load(dir: &Path) -> Result<Self, ServiceError> {
        Ok(Self {
            extract_keywords: read_template(dir, "extract_keywords_prompt.txt").await?,
            sidebar_search: read_template(dir, "sidebar_search_prompt.txt").await?,
            sidebar_summarize: read_template(dir, "sidebar_summarize_prompt.txt").await?,
        })
    }

    /// Build a store from in-memory templates (used by tests).
    pub fn from_templates(
        extract_keywords: impl Into<String>,
        sidebar_search: impl Into<String>,
        sidebar_summarize: impl Into<String>,
    ) -> Self {
        Self {
            extract_keywords: extract_keywords.into(),
            sidebar_search: sidebar_search.into(),
            sidebar_summarize: sidebar_summarize.into(),
        }
    }

    /// Render the keyword-extraction prompt for a page.
    pub fn render_extraction(&self, page_content: &str) -> String {
        render(&self.extract_keywords, PAGE_CONTENT_PLACEHOLDER, page_content)
    }

    /// Render the sidebar prompt for a keyword.
    pub fn render_sidebar(&self, mode: ResponseMode, keyword: &str) -> String {
        let template = match mode {
            ResponseMode::Search => &self.sidebar_search,
            ResponseMode::Summarize => &self.sidebar_summarize,
        };
        render(template, KEYWORD_PLACEHOLDER, keyword)
    }
}

async fn read_template(dir: &Path, name: &str) -> Result<String, ServiceError> {
    let path = dir.join(name);
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ServiceError::Template(format!("{}: {}", path.display(), e)))
}

fn render(template: &str, placeholder: &str, value: &str) -> String {
    template.replacen(placeholder, value, 1)
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
