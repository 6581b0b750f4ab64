//! Abstract text-page model.
//!
//! The highlighter never touches a real DOM; it works against [`TextPage`],
//! a minimal "text node provider" capability: ordered text leaves, each with
//! the tag of its immediate structural container, plus in-place replacement
//! of one leaf by a sequence of segments.

/// Stable handle for a node. Handles stay valid across rewrites; a replaced
/// node is marked detached rather than removed.
pub type NodeId = usize;

/// Tag of a text node's immediate structural container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerTag {
    Script,
    Style,
    NoScript,
    TextArea,
    Code,
    Anchor,
    Other(String),
}

impl ContainerTag {
    /// Parse a tag name, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "SCRIPT" => Self::Script,
            "STYLE" => Self::Style,
            "NOSCRIPT" => Self::NoScript,
            "TEXTAREA" => Self::TextArea,
            "CODE" => Self::Code,
            "A" => Self::Anchor,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Containers whose text must never be rewritten: executable or
    /// already-interactive content, and places where a rewrite would corrupt
    /// user input.
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            Self::Script | Self::Style | Self::NoScript | Self::TextArea | Self::Code | Self::Anchor
        )
    }
}

/// A piece of rewritten content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text carried over unchanged.
    Text(String),
    /// Interactive highlighted keyword (the clickable span), styled with
    /// the configured highlight color.
    Link { keyword: String, color: String },
    /// The small fixed label marker following each highlight.
    Tag { label: String },
}

/// A DOM-like tree of text-bearing leaves, in document order.
pub trait TextPage {
    /// Hostname of the page, for blacklist checks.
    fn hostname(&self) -> &str;

    /// All visible text, for the short-page guard and extraction request.
    fn body_text(&self) -> String;

    /// Attached text-leaf handles in document order.
    fn text_nodes(&self) -> Vec<NodeId>;

    /// Text of a node, if it is still an attached plain-text leaf.
    fn node_text(&self, id: NodeId) -> Option<String>;

    /// Container tag of a node.
    fn container(&self, id: NodeId) -> Option<ContainerTag>;

    /// Whether the node is still attached (not replaced by a rewrite).
    fn is_attached(&self, id: NodeId) -> bool;

    /// Replace a text leaf with a sequence of segments.
    fn replace_node(&mut self, id: NodeId, segments: Vec<Segment>);
}

struct Entry {
    container: ContainerTag,
    segment: Segment,
    attached: bool,
}

/// Concrete in-memory page.
pub struct PageModel {
    hostname: String,
    arena: Vec<Entry>,
    order: Vec<NodeId>,
}

impl PageModel {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            arena: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Append a text leaf under the given container.
    pub fn push_text(&mut self, container: ContainerTag, text: impl Into<String>) -> NodeId {
        let id = self.arena.len();
        self.arena.push(Entry {
            container,
            segment: Segment::Text(text.into()),
            attached: true,
        });
        self.order.push(id);
        id
    }

    /// Append a paragraph (text under an ordinary container).
    pub fn push_paragraph(&mut self, text: impl Into<String>) -> NodeId {
        self.push_text(ContainerTag::Other("P".to_string()), text)
    }

    /// Flattened page content in document order, links and labels included.
    /// Used by tests to assert exact rewrite boundaries.
    pub fn rendered_text(&self) -> String {
        self.order
            .iter()
            .map(|&id| match &self.arena[id].segment {
                Segment::Text(text) => text.clone(),
                Segment::Link { keyword, .. } => keyword.clone(),
                Segment::Tag { label } => label.clone(),
            })
            .collect()
    }

    /// All attached segments in document order.
    pub fn segments(&self) -> Vec<&Segment> {
        self.order.iter().map(|&id| &self.arena[id].segment).collect()
    }

    /// Number of attached `Link` segments.
    pub fn link_count(&self) -> usize {
        self.order
            .iter()
            .filter(|&&id| matches!(self.arena[id].segment, Segment::Link { .. }))
            .count()
    }
}

impl TextPage for PageModel {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn body_text(&self) -> String {
        self.order
            .iter()
            .filter_map(|&id| match &self.arena[id].segment {
                Segment::Text(text) if !self.arena[id].container.is_excluded() => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn text_nodes(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                self.arena[id].attached && matches!(self.arena[id].segment, Segment::Text(_))
            })
            .collect()
    }

    fn node_text(&self, id: NodeId) -> Option<String> {
        let entry = self.arena.get(id)?;
        if !entry.attached {
            return None;
        }
        match &entry.segment {
            Segment::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn container(&self, id: NodeId) -> Option<ContainerTag> {
        self.arena.get(id).map(|entry| entry.container.clone())
    }

    fn is_attached(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(|entry| entry.attached)
    }

    fn replace_node(&mut self, id: NodeId, segments: Vec<Segment>) {
        let Some(position) = self.order.iter().position(|&n| n == id) else {
            return;
        };
        if !self.arena[id].attached {
            return;
        }

        self.arena[id].attached = false;
        self.order.remove(position);

        let parent = self.arena[id].container.clone();
        let mut insert_at = position;
        for segment in segments {
            let container = match &segment {
                Segment::Text(_) => parent.clone(),
                Segment::Link { .. } => ContainerTag::Anchor,
                Segment::Tag { .. } => ContainerTag::Other("SPAN".to_string()),
            };
            let new_id = self.arena.len();
            self.arena.push(Entry {
                container,
                segment,
                attached: true,
            });
            self.order.insert(insert_at, new_id);
            insert_at += 1;
        }
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
