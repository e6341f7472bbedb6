//! Capturing editor state into a [`ContextSnapshot`].

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::model::{ContextSnapshot, Position, Selection};

/// Read access to the editor that currently has focus.
pub trait ActiveEditor {
    /// Absolute path of the open document.
    fn document_path(&self) -> &Path;

    /// Current selection, including its direction.
    fn selection(&self) -> Selection;

    /// Exact document text between the ordered endpoints of `selection`.
    fn text_in(&self, selection: &Selection) -> String;
}

/// Capture the state of `editor`, or an empty snapshot when no editor is active.
///
/// `regex` is never filled here; callers decide where the regex comes from.
pub fn extract_context(editor: Option<&dyn ActiveEditor>) -> ContextSnapshot {
    let Some(editor) = editor else {
        return ContextSnapshot::empty();
    };

    let file = editor.document_path().to_path_buf();
    let dir = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| file.clone());
    let selection = editor.selection();

    ContextSnapshot {
        regex: None,
        file: Some(file),
        dir: Some(dir),
        line: Some(selection.active.line.saturating_add(1)),
        selection: Some(editor.text_in(&selection)),
    }
}

/// In-memory document with a selection, as described on the command line.
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    path: PathBuf,
    text: String,
    lines: Vec<Range<usize>>,
    selection: Selection,
}

impl DocumentEditor {
    /// Wrap `text` as the contents of `path` with the caret at the start.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = line_spans(&text);
        Self {
            path: path.into(),
            text,
            lines,
            selection: Selection::default(),
        }
    }

    /// Load a document from disk. Invalid UTF-8 is replaced rather than rejected.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read document {}", path.display()))?;
        let absolute = std::path::absolute(path)
            .with_context(|| format!("failed to resolve document path {}", path.display()))?;
        Ok(Self::from_text(
            absolute,
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    }

    /// Set the selection, clamping both endpoints into the document.
    pub fn select(&mut self, anchor: Position, active: Position) {
        self.selection = Selection::new(self.validate(anchor), self.validate(active));
    }

    /// Builder form of [`DocumentEditor::select`].
    pub fn with_selection(mut self, anchor: Position, active: Position) -> Self {
        self.select(anchor, active);
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Clamp a position the way editors do: past-the-end lines snap to the last
    /// line and past-the-end columns snap to the line end.
    pub fn validate(&self, position: Position) -> Position {
        let last_line = self.lines.len().saturating_sub(1);
        let line = (position.line as usize).min(last_line);
        let width = self.text[self.lines[line].clone()].chars().count();
        let character = (position.character as usize).min(width);
        Position::new(line as u32, character as u32)
    }

    fn offset(&self, position: Position) -> usize {
        let position = self.validate(position);
        let span = self.lines[position.line as usize].clone();
        let content = &self.text[span.clone()];
        let within = content
            .char_indices()
            .nth(position.character as usize)
            .map(|(idx, _)| idx)
            .unwrap_or(content.len());
        span.start + within
    }
}

impl ActiveEditor for DocumentEditor {
    fn document_path(&self) -> &Path {
        &self.path
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn text_in(&self, selection: &Selection) -> String {
        let start = self.offset(selection.start());
        let end = self.offset(selection.end());
        self.text[start..end].to_owned()
    }
}

/// Byte ranges of each line's content, excluding `\n` or `\r\n` terminators.
/// A trailing terminator opens one more (empty) line.
fn line_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices('\n') {
        let end = if text[start..idx].ends_with('\r') {
            idx - 1
        } else {
            idx
        };
        spans.push(start..end);
        start = idx + 1;
    }
    spans.push(start..text.len());
    spans
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = "Line 1\nLine 2\nLine 3\nSelected text here\nLine 5";

    fn editor() -> DocumentEditor {
        DocumentEditor::from_text("/work/notes/sample.txt", SAMPLE)
    }

    #[test]
    fn no_active_editor_yields_empty_snapshot() {
        assert_eq!(extract_context(None), ContextSnapshot::empty());
    }

    #[test]
    fn captures_file_dir_line_and_selection() {
        let editor = editor().with_selection(Position::new(3, 0), Position::new(3, 18));
        let ctx = extract_context(Some(&editor));

        assert_eq!(ctx.file, Some(PathBuf::from("/work/notes/sample.txt")));
        assert_eq!(ctx.dir, Some(PathBuf::from("/work/notes")));
        assert_eq!(ctx.line, Some(4));
        assert_eq!(ctx.selection.as_deref(), Some("Selected text here"));
        assert_eq!(ctx.regex, None);
    }

    #[test]
    fn caret_at_document_start_reports_line_one_and_empty_selection() {
        let editor = DocumentEditor::from_text("/tmp/test.txt", "Test content")
            .with_selection(Position::new(0, 0), Position::new(0, 0));
        let ctx = extract_context(Some(&editor));
        assert_eq!(ctx.line, Some(1));
        assert_eq!(ctx.selection.as_deref(), Some(""));
    }

    #[test]
    fn line_follows_the_cursor_for_backward_selections() {
        let editor = editor().with_selection(Position::new(3, 4), Position::new(1, 2));
        let ctx = extract_context(Some(&editor));
        assert_eq!(ctx.line, Some(2));
        assert_eq!(ctx.selection.as_deref(), Some("ne 2\nLine 3\nSele"));
    }

    #[test]
    fn selection_keeps_crlf_terminators() {
        let editor = DocumentEditor::from_text("/tmp/crlf.txt", "ab\r\ncd\r\n")
            .with_selection(Position::new(0, 1), Position::new(1, 1));
        assert_eq!(editor.line_count(), 3);
        assert_eq!(extract_context(Some(&editor)).selection.as_deref(), Some("b\r\nc"));
    }

    #[test]
    fn positions_are_clamped_into_the_document() {
        let editor = editor();
        assert_eq!(editor.validate(Position::new(0, 99)), Position::new(0, 6));
        assert_eq!(editor.validate(Position::new(40, 3)), Position::new(4, 3));

        let editor = editor.with_selection(Position::new(4, 0), Position::new(99, 99));
        let ctx = extract_context(Some(&editor));
        assert_eq!(ctx.line, Some(5));
        assert_eq!(ctx.selection.as_deref(), Some("Line 5"));
    }

    #[test]
    fn columns_count_unicode_scalars() {
        let editor = DocumentEditor::from_text("/tmp/u.txt", "héllo 世界")
            .with_selection(Position::new(0, 1), Position::new(0, 8));
        assert_eq!(extract_context(Some(&editor)).selection.as_deref(), Some("éllo 世界"));
    }

    #[test]
    fn open_reads_document_and_resolves_absolute_path() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "first\nsecond")?;

        let editor = DocumentEditor::open(file.path())?
            .with_selection(Position::new(1, 0), Position::new(1, 6));
        let ctx = extract_context(Some(&editor));

        assert!(ctx.file.as_deref().is_some_and(Path::is_absolute));
        assert_eq!(ctx.dir.as_deref(), file.path().parent());
        assert_eq!(ctx.selection.as_deref(), Some("second"));
        Ok(())
    }

    #[test]
    fn open_missing_file_is_an_error() {
        assert!(DocumentEditor::open(Path::new("/definitely/not/here.txt")).is_err());
    }
}
