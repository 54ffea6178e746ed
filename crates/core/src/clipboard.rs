//! Cut, copy, paste and insert against a [`Document`].

use log::debug;

use crate::command::Command;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::playback::PlaybackStatus;

/// Commands held for pasting. Entries are owned snapshots taken at copy time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    commands: Vec<Command>,
}

impl Clipboard {
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Paste is only offered when this is false.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replaces the clipboard with a copy of the command at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentLocked`] unless stopped,
    /// [`Error::IndexOutOfRange`] for an invalid index.
    pub fn copy(&mut self, document: &Document, status: PlaybackStatus, index: usize) -> Result<()> {
        if status != PlaybackStatus::Stopped {
            return Err(Error::DocumentLocked { status });
        }

        let command = document
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, document.len()))?;

        debug!("Copying `{command}` from {index}");
        self.commands = vec![command.clone()];
        Ok(())
    }

    /// Copies the command at `index` and then removes it from the document.
    ///
    /// # Errors
    ///
    /// Same as [`Clipboard::copy`]; on error neither the clipboard nor the
    /// document changes.
    pub fn cut(&mut self, document: &mut Document, status: PlaybackStatus, index: usize) -> Result<()> {
        let previous = std::mem::take(&mut self.commands);

        if let Err(e) = self.copy(document, status, index) {
            self.commands = previous;
            return Err(e);
        }

        document.remove_command(status, index)?;
        Ok(())
    }

    /// Inserts a copy of every clipboard command right after `index`, in order.
    /// Does nothing when the clipboard is empty.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentLocked`] unless stopped,
    /// [`Error::IndexOutOfRange`] when `index` is past the end.
    pub fn paste(&self, document: &mut Document, status: PlaybackStatus, index: usize) -> Result<()> {
        if status != PlaybackStatus::Stopped {
            return Err(Error::DocumentLocked { status });
        }

        if self.commands.is_empty() {
            debug!("Clipboard is empty, nothing to paste");
            return Ok(());
        }

        if index >= document.len() && !(document.is_empty() && index == 0) {
            return Err(Error::index_out_of_range(index, document.len()));
        }

        let at = if document.is_empty() { 0 } else { index + 1 };

        for (offset, command) in self.commands.iter().enumerate() {
            document.insert_command(status, command.clone(), at + offset)?;
        }

        Ok(())
    }
}

/// Inserts a fresh copy of `template` at `at`, for "new row" affordances.
///
/// # Errors
///
/// Same as [`Document::insert_command`].
pub fn insert(document: &mut Document, status: PlaybackStatus, template: &Command, at: usize) -> Result<()> {
    document.insert_command(status, template.clone(), at)
}
