//! Keeps the table and the source text of a script in step.
//!
//! The source surface holds two buffers: the committed text, derived from the
//! document, and the draft the user is typing. Structural edits always win:
//! regenerating the text throws an uncommitted draft away.

use log::{debug, warn};

use crate::codec;
use crate::document::{Document, DEFAULT_NAME};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveView {
    #[default]
    Table,
    Source,
}

/// Caret position in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub ch: usize,
}

#[derive(Debug, Clone)]
pub struct ViewSync {
    default_name: String,
    committed_text: String,
    draft_text: String,
    error: Option<String>,
    active: ActiveView,
    cursor: Cursor,
}

impl Default for ViewSync {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_NAME.to_string(),
            committed_text: String::new(),
            draft_text: String::new(),
            error: None,
            active: ActiveView::default(),
            cursor: Cursor::default(),
        }
    }
}

impl ViewSync {
    pub fn new(document: &Document) -> Self {
        Self::with_default_name(document, DEFAULT_NAME)
    }

    /// Like [`ViewSync::new`], writing an unnamed document as `default_name`.
    pub fn with_default_name(document: &Document, default_name: &str) -> Self {
        let mut sync = Self {
            default_name: default_name.to_string(),
            ..Self::default()
        };
        sync.regenerate(document);
        sync
    }

    pub fn committed_text(&self) -> &str {
        &self.committed_text
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    /// The message of the last failed commit, shown next to the source.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_view(&self) -> ActiveView {
        self.active
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn has_unsaved_draft(&self) -> bool {
        self.draft_text != self.committed_text
    }

    /// Re-derives the text from `document`, discarding any draft and stored error.
    pub fn regenerate(&mut self, document: &Document) {
        if self.has_unsaved_draft() {
            warn!("Discarding uncommitted source edits");
        }

        self.committed_text = codec::serialize_named(document, &self.default_name);
        self.draft_text = self.committed_text.clone();
        self.error = None;
        self.cursor = Cursor::default();
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    /// Remembers a caret position the user moved to.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Parses the draft when it differs from the committed text.
    ///
    /// Returns `None` when there was nothing to commit, or the parsed document,
    /// which the caller installs before calling [`ViewSync::regenerate`]. An
    /// unchanged draft matches the document, so any stored error is cleared.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when the draft is malformed. The message is kept and the
    /// source view is forced active until a later commit succeeds.
    pub fn commit(&mut self, fallback_name: &str) -> Result<Option<Document>> {
        if !self.has_unsaved_draft() {
            debug!("Source unchanged, skipping parse");
            self.error = None;
            return Ok(None);
        }

        match codec::parse(&self.draft_text, fallback_name) {
            Ok(document) => {
                self.error = None;
                Ok(Some(document))
            }
            Err(e) => {
                warn!("There are errors in the source: {e}");
                self.error = Some(e.to_string());
                self.active = ActiveView::Source;
                Err(e)
            }
        }
    }

    /// Switches the visible surface.
    ///
    /// # Errors
    ///
    /// [`Error::ParseErrorPending`] when leaving the source view while its last
    /// commit failed; the source view stays active.
    pub fn switch_view(&mut self, view: ActiveView) -> Result<ActiveView> {
        if self.error.is_some() && view != ActiveView::Source {
            self.active = ActiveView::Source;
            return Err(Error::ParseErrorPending);
        }

        self.active = view;
        Ok(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    fn sample() -> Document {
        Document::new(
            Some("sample".to_string()),
            vec![Command::new("open", "/", ""), Command::new("click", "id=go", "")],
        )
    }

    #[test]
    fn test_new_derives_text() {
        let sync = ViewSync::new(&sample());
        assert_eq!(sync.committed_text(), codec::serialize(&sample()));
        assert_eq!(sync.draft_text(), sync.committed_text());
        assert!(sync.error().is_none());
        assert_eq!(sync.active_view(), ActiveView::Table);
    }

    #[test]
    fn test_commit_unchanged_is_noop() {
        let mut sync = ViewSync::new(&sample());
        assert!(sync.commit("f").unwrap().is_none());
    }

    #[test]
    fn test_commit_parses_changed_draft() {
        let mut sync = ViewSync::new(&sample());
        sync.edit_draft(r#"{"name": "edited", "commands": [{"action": "refresh", "target": "", "value": ""}]}"#);

        let document = sync.commit("f").unwrap().unwrap();
        assert_eq!(document.display_name(), "edited");
        assert_eq!(document.commands(), &[Command::new("refresh", "", "")]);
    }

    #[test]
    fn test_parse_failure_blocks_view_switch() {
        let mut sync = ViewSync::new(&sample());
        sync.switch_view(ActiveView::Source).unwrap();
        sync.edit_draft("{ \"name\": ");

        assert!(matches!(sync.commit("f"), Err(Error::Parse(_))));
        assert!(!sync.error().unwrap().is_empty());

        assert!(matches!(
            sync.switch_view(ActiveView::Table),
            Err(Error::ParseErrorPending)
        ));
        assert_eq!(sync.active_view(), ActiveView::Source);

        sync.edit_draft(r#"{"name": "fixed", "commands": []}"#);
        let fixed = sync.commit("f").unwrap().unwrap();
        assert!(sync.error().is_none());
        sync.regenerate(&fixed);

        assert_eq!(sync.switch_view(ActiveView::Table).unwrap(), ActiveView::Table);
    }

    #[test]
    fn test_reverting_draft_after_parse_failure_unblocks_switch() {
        let mut sync = ViewSync::new(&sample());
        let committed = sync.committed_text().to_string();
        sync.edit_draft("{ bad");
        assert!(sync.commit("f").is_err());

        sync.edit_draft(committed);
        assert!(sync.commit("f").unwrap().is_none());
        assert!(sync.error().is_none());

        assert_eq!(sync.switch_view(ActiveView::Table).unwrap(), ActiveView::Table);
    }

    #[test]
    fn test_default_name_used_for_unnamed_document() {
        let sync = ViewSync::with_default_name(&Document::default(), "Scratch");
        assert!(sync.committed_text().contains("\"Scratch\""));
        assert_eq!(
            sync.committed_text(),
            codec::serialize_named(&Document::default(), "Scratch")
        );
    }

    #[test]
    fn test_parse_failure_forces_source_view() {
        let mut sync = ViewSync::new(&sample());
        sync.edit_draft("oops");
        assert!(sync.commit("f").is_err());
        assert_eq!(sync.active_view(), ActiveView::Source);
    }

    #[test]
    fn test_regenerate_discards_draft_and_resets_cursor() {
        let mut sync = ViewSync::new(&sample());
        sync.edit_draft("half typed");
        sync.set_cursor(Cursor { line: 3, ch: 7 });
        assert!(sync.has_unsaved_draft());

        let mut changed = sample();
        changed
            .insert_command(
                crate::playback::PlaybackStatus::Stopped,
                Command::new("pause", "100", ""),
                2,
            )
            .unwrap();
        sync.regenerate(&changed);

        assert!(!sync.has_unsaved_draft());
        assert_eq!(sync.draft_text(), codec::serialize(&changed));
        assert_eq!(sync.cursor(), Cursor::default());
    }
}
