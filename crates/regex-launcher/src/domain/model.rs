//! Domain models for editor context snapshots and the launchable tools.

use std::fmt;
use std::path::PathBuf;

/// Point-in-time capture of the editor state used to fill argument templates.
///
/// Every field is optional. An empty `selection` is a real value (a collapsed
/// cursor) and is distinct from an absent one (no active editor).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSnapshot {
    pub regex: Option<String>,
    pub file: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    /// 1-based line of the cursor endpoint of the selection.
    pub line: Option<u32>,
    pub selection: Option<String>,
}

impl ContextSnapshot {
    /// Snapshot with every field absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the regex field, keeping the editor-derived fields.
    pub fn with_regex(mut self, regex: Option<String>) -> Self {
        self.regex = regex;
        self
    }

    /// Selected text when the selection spans at least one character.
    pub fn non_empty_selection(&self) -> Option<&str> {
        self.selection.as_deref().filter(|text| !text.is_empty())
    }
}

/// Zero-based position inside a document. `character` counts Unicode scalar values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Selection with an anchor and an active (cursor) endpoint.
///
/// The anchor may come after the active endpoint when the user selected
/// backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Collapsed selection at `position`.
    pub fn caret(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }
}

/// External regex tools that can be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    RegexBuddy,
    RegexMagic,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::RegexBuddy, Tool::RegexMagic];

    /// Product name shown in dialogs and passed to detection.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::RegexBuddy => "RegexBuddy",
            Tool::RegexMagic => "RegexMagic",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What the launched tool receives on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// A regular expression to edit.
    Regex,
    /// Sample text to test regular expressions against.
    Sample,
}
