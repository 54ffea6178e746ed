//! The script document: the ordered command list plus its metadata.
//!
//! Every mutation is gated on the player being stopped. Commands are identified
//! by position, so structural edits shift the selection along with the command
//! it points at.

use std::borrow::Cow;

use log::debug;

use crate::command::{Command, CommandField};
use crate::error::{Error, Result};
use crate::playback::PlaybackStatus;

/// Display name used when a script has no name of its own.
pub const DEFAULT_NAME: &str = "Untitled";

/// How a row selection was requested.
///
/// There is no multi-select yet, so both resolve to a single selected index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Ordinary row click.
    Exclusive,
    /// Context-menu invocation; keeps any surrounding selection context.
    KeepContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptMeta {
    pub name: Option<String>,
    /// Identity of the persisted origin; `None` for a new, unsaved script.
    pub source_id: Option<String>,
    pub selected_index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    commands: Vec<Command>,
    pub meta: ScriptMeta,
}

fn ensure_stopped(status: PlaybackStatus) -> Result<()> {
    if status == PlaybackStatus::Stopped {
        Ok(())
    } else {
        Err(Error::DocumentLocked { status })
    }
}

impl Document {
    pub fn new(name: Option<String>, commands: Vec<Command>) -> Self {
        Self {
            commands,
            meta: ScriptMeta {
                name,
                ..ScriptMeta::default()
            },
        }
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.meta.source_id = Some(source_id.into());
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// The rows shown by the table: the commands, or a single blank placeholder
    /// when the script is empty. The placeholder is never stored.
    pub fn rows(&self) -> Cow<'_, [Command]> {
        if self.commands.is_empty() {
            Cow::Owned(vec![Command::blank()])
        } else {
            Cow::Borrowed(&self.commands)
        }
    }

    /// The script name, or `fallback` when it has none.
    pub fn display_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match &self.meta.name {
            Some(name) if !name.is_empty() => name.as_str(),
            _ => fallback,
        }
    }

    pub fn display_name(&self) -> &str {
        self.display_name_or(DEFAULT_NAME)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.meta.selected_index
    }

    /// The selected command, if the selection still points at one.
    pub fn selected_command(&self) -> Option<&Command> {
        self.meta
            .selected_index
            .and_then(|index| self.commands.get(index))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.commands.len() {
            Ok(())
        } else {
            Err(Error::index_out_of_range(index, self.commands.len()))
        }
    }

    /// Inserts `command` at `at`, shifting every later command (and the selection) up by one.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentLocked`] unless stopped, [`Error::IndexOutOfRange`] when
    /// `at` is past the end.
    pub fn insert_command(&mut self, status: PlaybackStatus, command: Command, at: usize) -> Result<()> {
        ensure_stopped(status)?;

        if at > self.commands.len() {
            return Err(Error::index_out_of_range(at, self.commands.len()));
        }

        debug!("Inserting `{command}` at {at}");
        self.commands.insert(at, command);

        if let Some(selected) = self.meta.selected_index {
            if selected >= at {
                self.meta.selected_index = Some(selected + 1);
            }
        }

        Ok(())
    }

    /// Removes and returns the command at `index`.
    ///
    /// Removing the selected command clears the selection; a selection after it
    /// moves down with its command.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentLocked`] unless stopped, [`Error::IndexOutOfRange`] for an
    /// invalid index.
    pub fn remove_command(&mut self, status: PlaybackStatus, index: usize) -> Result<Command> {
        ensure_stopped(status)?;
        self.check_index(index)?;

        let removed = self.commands.remove(index);
        debug!("Removed `{removed}` from {index}");

        self.meta.selected_index = match self.meta.selected_index {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };

        Ok(removed)
    }

    /// Inserts a copy of the command at `index` right after it.
    ///
    /// # Errors
    ///
    /// Same as [`Document::remove_command`].
    pub fn duplicate_command(&mut self, status: PlaybackStatus, index: usize) -> Result<()> {
        ensure_stopped(status)?;
        self.check_index(index)?;

        let copy = self.commands[index].clone();
        self.insert_command(status, copy, index + 1)
    }

    /// Sets one field of the command at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentLocked`], [`Error::IndexOutOfRange`], or
    /// [`Error::TargetNotOffered`] for a target outside the command's options.
    pub fn update_field(
        &mut self,
        status: PlaybackStatus,
        index: usize,
        field: CommandField,
        value: &str,
    ) -> Result<()> {
        ensure_stopped(status)?;
        self.check_index(index)?;

        self.commands[index].set_field(field, value)
    }

    /// Sets one field of the selected command. Does nothing when the selection
    /// is empty or no longer points at a command.
    ///
    /// # Errors
    ///
    /// Same as [`Document::update_field`], minus the range check.
    pub fn update_selected_field(
        &mut self,
        status: PlaybackStatus,
        field: CommandField,
        value: &str,
    ) -> Result<()> {
        ensure_stopped(status)?;

        match self.meta.selected_index {
            Some(index) if index < self.commands.len() => {
                self.update_field(status, index, field, value)
            }
            _ => {
                debug!("No selected command to set {field} on");
                Ok(())
            }
        }
    }

    /// Selects the command at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentLocked`] unless stopped, [`Error::IndexOutOfRange`] for an
    /// invalid index.
    pub fn select_command(
        &mut self,
        status: PlaybackStatus,
        index: usize,
        mode: SelectionMode,
    ) -> Result<()> {
        ensure_stopped(status)?;
        self.check_index(index)?;

        debug!("Selecting command {index} ({mode:?})");
        self.meta.selected_index = Some(index);
        Ok(())
    }

    /// Replaces the command list and name wholesale, keeping the source identity.
    ///
    /// The selection is kept when it still points inside the new list.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentLocked`] unless stopped.
    pub fn replace_contents(&mut self, status: PlaybackStatus, replacement: Document) -> Result<()> {
        ensure_stopped(status)?;

        self.commands = replacement.commands;
        self.meta.name = replacement.meta.name;
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        if let Some(selected) = self.meta.selected_index {
            if selected >= self.commands.len() {
                self.meta.selected_index = None;
            }
        }
    }
}
