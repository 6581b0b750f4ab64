//! Keyword scanning and highlighting.
//!
//! A single case-insensitive alternation of literal-escaped keywords runs
//! over every eligible text leaf in two passes: a read-only scan that
//! collects matching nodes, then a rewrite pass that replaces each collected
//! node with interleaved text and interactive segments. The scan never
//! mutates nodes it is still inspecting.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use sidebase_protocols::error::ClientError;

use crate::message::{MessageBus, SidebarMessage};
use crate::page::{NodeId, Segment, TextPage};

/// The small visual marker appended after every highlighted keyword.
pub const HIGHLIGHT_LABEL: &str = " [Sidebase]";

/// Outcome of a highlighting run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightReport {
    /// Text nodes that were rewritten.
    pub nodes_rewritten: usize,
    /// Total keyword occurrences wrapped.
    pub matches: usize,
}

/// Compiled keyword matcher.
pub struct Highlighter {
    pattern: Regex,
    keywords: Vec<String>,
    color: String,
}

impl Highlighter {
    /// Compile a matcher from the keyword list; `color` is carried onto
    /// every link segment the rewrite emits. Returns `None` for an empty
    /// list: highlighting is a no-op without keywords.
    pub fn build(keywords: &[String], color: &str) -> Result<Option<Self>, ClientError> {
        let literals: Vec<String> = keywords
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| regex::escape(k))
            .collect();
        if literals.is_empty() {
            return Ok(None);
        }

        let pattern = RegexBuilder::new(&literals.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        Ok(Some(Self {
            pattern,
            keywords: keywords.to_vec(),
            color: color.to_string(),
        }))
    }

    /// Scan and rewrite the whole page.
    pub fn highlight(&self, page: &mut dyn TextPage) -> HighlightReport {
        let worklist = self.scan(page);
        debug!("highlighting {} matching nodes", worklist.len());
        self.rewrite(page, &worklist)
    }

    /// Read-only pass: collect nodes whose text matches, skipping excluded
    /// containers and whitespace-only nodes. No mutation happens here.
    fn scan(&self, page: &dyn TextPage) -> Vec<NodeId> {
        page.text_nodes()
            .into_iter()
            .filter(|&id| {
                let Some(container) = page.container(id) else {
                    return false;
                };
                if container.is_excluded() {
                    return false;
                }
                let Some(text) = page.node_text(id) else {
                    return false;
                };
                !text.trim().is_empty() && self.pattern.is_match(&text)
            })
            .collect()
    }

    /// Second pass: rewrite each collected node. Nodes detached by an
    /// earlier rewrite are skipped.
    fn rewrite(&self, page: &mut dyn TextPage, worklist: &[NodeId]) -> HighlightReport {
        let mut report = HighlightReport::default();

        for &id in worklist {
            if !page.is_attached(id) {
                continue;
            }
            let Some(text) = page.node_text(id) else {
                continue;
            };

            let (segments, matches) = self.split_segments(&text);
            if matches == 0 {
                continue;
            }

            page.replace_node(id, segments);
            report.nodes_rewritten += 1;
            report.matches += matches;
        }

        report
    }

    /// Interleave unmatched text with link/label segments, left to right,
    /// non-overlapping.
    fn split_segments(&self, text: &str) -> (Vec<Segment>, usize) {
        let mut segments = Vec::new();
        let mut matches = 0;
        let mut last = 0;

        for found in self.pattern.find_iter(text) {
            if found.start() > last {
                segments.push(Segment::Text(text[last..found.start()].to_string()));
            }
            segments.push(Segment::Link {
                keyword: found.as_str().to_string(),
                color: self.color.clone(),
            });
            segments.push(Segment::Tag {
                label: HIGHLIGHT_LABEL.to_string(),
            });
            last = found.end();
            matches += 1;
        }
        if last < text.len() {
            segments.push(Segment::Text(text[last..].to_string()));
        }

        (segments, matches)
    }

    /// Resolve the originally-cased keyword for a matched substring, falling
    /// back to the matched text itself.
    pub fn resolve_keyword(&self, matched: &str) -> String {
        let lowered = matched.to_lowercase();
        self.keywords
            .iter()
            .find(|k| k.to_lowercase() == lowered)
            .cloned()
            .unwrap_or_else(|| matched.to_string())
    }

    /// Click handler for a highlighted span: hand the resolved keyword off
    /// to the sidebar.
    pub async fn on_click(
        &self,
        matched: &str,
        bus: &dyn MessageBus,
    ) -> Result<(), ClientError> {
        let keyword = self.resolve_keyword(matched);
        bus.send(SidebarMessage::open(keyword)).await
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
