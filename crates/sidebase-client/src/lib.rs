//! # Sidebase Client
//!
//! The browser-extension side of Sidebase expressed as a library, so the
//! scanning/highlighting algorithm and the stream consumer are testable
//! without a rendering engine:
//!
//! - [`page`] - abstract text-page model (the "text node provider")
//! - [`highlight`] - keyword scanning and rewriting
//! - [`pipeline`] - blacklist / short-page guards and the extraction flow
//! - [`sidebar`] - incremental stream rendering with the sources split
//! - [`sse`] - Server-Sent-Events consumption of the relay
//! - [`message`] - highlighter-to-sidebar handoff and keyword storage
//! - [`settings`] - highlight color and hostname blacklist

pub mod highlight;
pub mod message;
pub mod page;
pub mod pipeline;
pub mod settings;
pub mod sidebar;
pub mod sse;

pub use highlight::{HighlightReport, Highlighter, HIGHLIGHT_LABEL};
pub use message::{KeywordStore, LocalBus, MessageAction, MessageBus, PanelSurface, SidebarMessage};
pub use page::{ContainerTag, NodeId, PageModel, Segment, TextPage};
pub use pipeline::{ContentPipeline, ErrorNotice, HttpKeywordSource, KeywordSource, Outcome,
    SkipReason, MIN_PAGE_TEXT_CHARS, NOTICE_TTL};
pub use settings::{MemorySettingsStore, Settings, SettingsStore};
pub use sidebar::{SidebarRenderer, SidebarSession, SidebarView, TokenStreamSource,
    SOURCES_HEADING, SOURCES_SENTINEL};
pub use sse::{SseClient, SseDecoder};
