//! Render options and context for manpage rendering
//!
//! This module handles the resolved document attributes and the per-render
//! state: output buffering, collected warnings, and the cross-reference
//! table.

use fxhash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{RenderWarning, WarningKind};

/// Resolved document attributes controlling the rendered page.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Document title (the manpage name). Required; rendering fails
    /// without it.
    pub title: String,
    /// Manual volume section, e.g. "1" or "3pm".
    pub section: String,
    /// Date stamp for the header comment and `.TH` line; today when unset.
    pub date: Option<String>,
    /// Source (project/version) for the `.TH` line.
    pub source: Option<String>,
    /// Manual name for the `.TH` line.
    pub manual: Option<String>,
    /// Language note in the header comment block.
    pub language: String,
    /// Author names for the header comment block.
    pub authors: Vec<String>,
    /// Additional registered page names; each yields a redirect file.
    pub aliases: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            section: "1".to_string(),
            date: None,
            source: None,
            manual: None,
            language: "English".to_string(),
            authors: Vec::new(),
            aliases: Vec::new(),
        }
    }
}

impl RenderOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_manual(mut self, manual: impl Into<String>) -> Self {
        self.manual = Some(manual.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Date used in the header comment and `.TH` line.
    pub fn resolved_date(&self) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Initial capacity for the output buffer (reduces reallocations)
const INITIAL_BUFFER_CAPACITY: usize = 4096;

/// Per-render state threaded through the block renderers.
///
/// The cross-reference table is built once before rendering starts and is
/// read-only afterwards; nothing here is shared across renders.
pub struct RenderContext {
    /// Output buffer
    pub output: String,
    /// Render options
    pub options: RenderOptions,
    /// Collected warnings during rendering
    pub warnings: Vec<RenderWarning>,
    /// Section id to title lookup for internal references
    pub xrefs: FxHashMap<String, String>,
}

impl RenderContext {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            output: String::with_capacity(INITIAL_BUFFER_CAPACITY),
            options,
            warnings: Vec::new(),
            xrefs: FxHashMap::default(),
        }
    }

    /// Push a string to the output buffer
    pub fn push(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Push a string followed by a line terminator
    pub fn push_line(&mut self, s: &str) {
        self.push(s);
        self.push("\n");
    }

    /// Add a newline if not already at one
    pub fn newline(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.push("\n");
        }
    }

    /// Record a non-fatal rendering problem
    pub fn add_warning(&mut self, kind: WarningKind, message: impl Into<String>) {
        self.warnings.push(RenderWarning::new(kind, message));
    }

    /// Resolve an internal cross-reference target to its section title
    pub fn lookup_xref(&self, target: &str) -> Option<&str> {
        self.xrefs.get(target).map(|s| s.as_str())
    }

    /// Finalize the buffer: single trailing line terminator
    pub fn finalize(mut self) -> (String, Vec<RenderWarning>) {
        let trimmed_len = self.output.trim_end().len();
        self.output.truncate(trimmed_len);
        self.output.push('\n');
        (self.output, self.warnings)
    }
}
