//! Highlighter-to-sidebar handoff.
//!
//! A click on a highlight sends a message with an action discriminator and
//! a keyword payload. The receiving side persists the keyword to shared
//! storage and opens the side panel, falling back to a popup window where
//! the side-panel capability is unavailable. The storage write completes
//! before any panel opens, so the sidebar's dependent read is consistent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::debug;

use sidebase_protocols::error::ClientError;

/// Message action discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageAction {
    #[serde(rename = "openSidebar")]
    OpenSidebar,
}

/// A message from the highlighter to the sidebar machinery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarMessage {
    pub action: MessageAction,
    pub keyword: String,
}

impl SidebarMessage {
    pub fn open(keyword: impl Into<String>) -> Self {
        Self {
            action: MessageAction::OpenSidebar,
            keyword: keyword.into(),
        }
    }
}

/// Sender half of the handoff.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn send(&self, message: SidebarMessage) -> Result<(), ClientError>;
}

/// Shared current-keyword storage with change notification.
#[async_trait]
pub trait KeywordStore: Send + Sync {
    /// The currently selected keyword, if any.
    async fn current(&self) -> Result<Option<String>, ClientError>;

    /// Persist a new current keyword.
    async fn set_current(&self, keyword: String) -> Result<(), ClientError>;

    /// Watch for current-keyword changes.
    fn subscribe(&self) -> watch::Receiver<Option<String>>;
}

/// Which surface the sidebar opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSurface {
    SidePanel,
    Popup,
}

/// In-process bus standing in for extension runtime messaging and storage.
pub struct LocalBus {
    keyword: watch::Sender<Option<String>>,
    supports_side_panel: bool,
    last_opened: Mutex<Option<PanelSurface>>,
}

impl LocalBus {
    pub fn new(supports_side_panel: bool) -> Self {
        let (keyword, _) = watch::channel(None);
        Self {
            keyword,
            supports_side_panel,
            last_opened: Mutex::new(None),
        }
    }

    /// The surface opened by the most recent message, if any.
    pub async fn last_opened(&self) -> Option<PanelSurface> {
        *self.last_opened.lock().await
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl MessageBus for LocalBus {
    async fn send(&self, message: SidebarMessage) -> Result<(), ClientError> {
        match message.action {
            MessageAction::OpenSidebar => {
                debug!("opening sidebar for keyword: {}", message.keyword);
                // Write first; watchers observe the keyword before the
                // panel becomes visible.
                self.keyword.send_replace(Some(message.keyword));

                let surface = if self.supports_side_panel {
                    PanelSurface::SidePanel
                } else {
                    PanelSurface::Popup
                };
                *self.last_opened.lock().await = Some(surface);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl KeywordStore for LocalBus {
    async fn current(&self) -> Result<Option<String>, ClientError> {
        Ok(self.keyword.borrow().clone())
    }

    async fn set_current(&self, keyword: String) -> Result<(), ClientError> {
        self.keyword.send_replace(Some(keyword));
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.keyword.subscribe()
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
