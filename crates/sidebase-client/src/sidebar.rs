//! Sidebar rendering and stream session management.
//!
//! Tokens accumulate into a summary region until the sources sentinel shows
//! up in the accumulated text; everything after the sentinel goes to a
//! separate sources region with its own heading. Both regions re-render as
//! HTML on every token. Detection runs against the accumulation, so a
//! sentinel split across token boundaries is still found.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use pulldown_cmark::{html, Parser};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use sidebase_protocols::error::ClientError;
use sidebase_protocols::events::StreamEvent;

use crate::message::KeywordStore;

/// Fixed literal dividing the summary and sources portions of a response.
/// Part of the response protocol; must be preserved verbatim.
pub const SOURCES_SENTINEL: &str = "---SOURCES---";

/// Heading shown above the sources region.
pub const SOURCES_HEADING: &str = "Related sources";

/// Shown when an error event carried no parseable message.
pub const GENERIC_STREAM_ERROR: &str = "Could not reach the server or the stream failed.";

/// Stream of decoded relay events.
pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

/// Where token streams come from. The HTTP implementation is
/// [`crate::sse::SseClient`].
#[async_trait]
pub trait TokenStreamSource: Send + Sync {
    async fn open(&self, keyword: &str) -> Result<EventStream, ClientError>;
}

/// A rendered snapshot of the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarView {
    pub keyword: String,
    pub summary_html: String,
    /// `None` until the sentinel has been observed.
    pub sources_html: Option<String>,
    pub error: Option<String>,
    pub done: bool,
}

/// Incremental renderer for one keyword's stream.
pub struct SidebarRenderer {
    keyword: String,
    summary: String,
    sources: String,
    in_sources: bool,
    error: Option<String>,
    done: bool,
}

impl SidebarRenderer {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            summary: String::new(),
            sources: String::new(),
            in_sources: false,
            error: None,
            done: false,
        }
    }

    /// Apply one stream event. Returns true when the stream is finished.
    pub fn apply(&mut self, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Token(token) => {
                self.push_token(&token);
                false
            }
            StreamEvent::End => {
                self.done = true;
                true
            }
            StreamEvent::Error(message) => {
                self.fail(message);
                true
            }
        }
    }

    fn push_token(&mut self, token: &str) {
        if self.in_sources {
            self.sources.push_str(token);
            return;
        }

        self.summary.push_str(token);
        // Check the accumulation, not the chunk: a sentinel split across
        // token boundaries is found once its tail arrives.
        if let Some(position) = self.summary.find(SOURCES_SENTINEL) {
            let after = self.summary[position + SOURCES_SENTINEL.len()..].to_string();
            self.summary.truncate(position);
            self.sources = after;
            self.in_sources = true;
        }
    }

    /// Replace the rendered content with an error panel. Any tokens already
    /// rendered are discarded from the view.
    pub fn fail(&mut self, message: Option<String>) {
        self.error = Some(message.unwrap_or_else(|| GENERIC_STREAM_ERROR.to_string()));
        self.done = true;
    }

    /// Render the current state. The sources region is prefixed with its
    /// heading; once an error is set, it replaces both regions.
    pub fn view(&self) -> SidebarView {
        if self.error.is_some() {
            return SidebarView {
                keyword: self.keyword.clone(),
                summary_html: String::new(),
                sources_html: None,
                error: self.error.clone(),
                done: self.done,
            };
        }

        SidebarView {
            keyword: self.keyword.clone(),
            summary_html: render_markdown(&self.summary),
            sources_html: self.in_sources.then(|| {
                format!("<h3>{}</h3>{}", SOURCES_HEADING, render_markdown(&self.sources))
            }),
            error: self.error.clone(),
            done: self.done,
        }
    }
}

fn render_markdown(text: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(text));
    out
}

/// Drives at most one live stream subscription for the sidebar.
pub struct SidebarSession<S: TokenStreamSource + 'static> {
    source: Arc<S>,
    views: watch::Sender<SidebarView>,
    task: Option<JoinHandle<()>>,
}

impl<S: TokenStreamSource + 'static> SidebarSession<S> {
    pub fn new(source: S) -> (Self, watch::Receiver<SidebarView>) {
        let (views, receiver) = watch::channel(SidebarView::default());
        (
            Self {
                source: Arc::new(source),
                views,
                task: None,
            },
            receiver,
        )
    }

    /// Open a stream for a newly selected keyword. Any previous stream is
    /// closed first; there is never more than one live subscription.
    pub fn select_keyword(&mut self, keyword: &str) {
        if let Some(task) = self.task.take() {
            debug!("closing previous sidebar stream");
            task.abort();
        }

        let mut renderer = SidebarRenderer::new(keyword);
        let _ = self.views.send(renderer.view());

        let source = self.source.clone();
        let views = self.views.clone();
        let keyword = keyword.to_string();

        self.task = Some(tokio::spawn(async move {
            let mut stream = match source.open(&keyword).await {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("failed to open stream for {}: {}", keyword, e);
                    renderer.fail(Some(e.to_string()));
                    let _ = views.send(renderer.view());
                    return;
                }
            };

            while let Some(event) = stream.next().await {
                let finished = renderer.apply(event);
                let _ = views.send(renderer.view());
                if finished {
                    break;
                }
            }
        }));
    }

    /// Whether a stream task is currently attached.
    pub fn has_active_stream(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Follow the shared current-keyword value, re-subscribing on every
    /// change. Runs until the store side is dropped.
    pub async fn run(&mut self, store: &dyn KeywordStore) -> Result<(), ClientError> {
        let mut changes = store.subscribe();

        if let Some(keyword) = store.current().await? {
            self.select_keyword(&keyword);
        }

        while changes.changed().await.is_ok() {
            let keyword = changes.borrow_and_update().clone();
            if let Some(keyword) = keyword {
                self.select_keyword(&keyword);
            }
        }

        Ok(())
    }
}

impl<S: TokenStreamSource + 'static> Drop for SidebarSession<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "sidebar_tests.rs"]
mod tests;
