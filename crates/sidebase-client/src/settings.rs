//! User settings: highlight color and hostname blacklist.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use sidebase_protocols::error::ClientError;

/// Persisted user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// CSS color applied to highlighted keywords.
    pub highlight_color: String,
    /// Hostname substrings on which the pipeline never runs.
    pub blacklist: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highlight_color: "blue".to_string(),
            blacklist: Vec::new(),
        }
    }
}

impl Settings {
    /// Blacklist entries are hostname substrings, matched case-sensitively.
    pub fn is_blacklisted(&self, hostname: &str) -> bool {
        self.blacklist.iter().any(|entry| hostname.contains(entry.as_str()))
    }
}

/// Asynchronous settings persistence, standing in for synced extension
/// storage.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings, ClientError>;
    async fn save(&self, settings: Settings) -> Result<(), ClientError>;
}

/// In-memory settings store.
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings, ClientError> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: Settings) -> Result<(), ClientError> {
        *self.settings.write().await = settings;
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
