//! Application state and the reducer that drives it.
//!
//! Every user or driver event is an [`Action`]. [`AppState::reduce`] applies it
//! and returns the [`Effect`]s the host must carry out against the driver. No
//! rendering surface is needed to exercise the editor.

use log::debug;

use crate::clipboard::{self, Clipboard};
use crate::command::{Command, CommandField};
use crate::config::EditorConfig;
use crate::document::{Document, SelectionMode};
use crate::error::{Error, Result};
use crate::playback::{CommandOutcome, PlayMode, PlaybackStatus, Player, RowStatus, RunRequest};
use crate::view_sync::{ActiveView, Cursor, ViewSync};

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the document with one loaded from a source.
    Load(Document),
    InsertCommand { command: Command, at: usize },
    /// Insert a blank row at the given position.
    InsertBlank(usize),
    RemoveCommand(usize),
    DuplicateCommand(usize),
    UpdateField {
        index: usize,
        field: CommandField,
        value: String,
    },
    UpdateSelectedField { field: CommandField, value: String },
    SelectCommand { index: usize, mode: SelectionMode },
    Cut(usize),
    Copy(usize),
    Paste(usize),
    EditSource(String),
    SetSourceCursor(Cursor),
    /// The source surface lost focus.
    CommitSource,
    SwitchView(ActiveView),
    Play { mode: PlayMode, start_index: usize },
    CommandFinished { index: usize, outcome: CommandOutcome },
    Stop,
    RunEnded,
    ToggleInspecting,
    /// The inspector picked an element; its locator becomes the selected target.
    /// A locator outside the target options is refused and inspecting goes on.
    Inspected(String),
    LocateSelected,
}

/// Requests for the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Play(RunRequest),
    Stop,
    Locate { locator: String },
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub document: Document,
    pub clipboard: Clipboard,
    pub player: Player,
    pub view_sync: ViewSync,
    pub config: EditorConfig,
}

impl AppState {
    pub fn new(document: Document, config: EditorConfig) -> Self {
        let view_sync = ViewSync::with_default_name(&document, &config.default_name);
        Self {
            document,
            clipboard: Clipboard::default(),
            player: Player::default(),
            view_sync,
            config,
        }
    }

    /// True when the field editors should accept input.
    pub fn is_command_editable(&self) -> bool {
        self.player.is_stopped() && self.document.selected_command().is_some()
    }

    pub fn can_paste(&self) -> bool {
        !self.clipboard.is_empty()
    }

    /// Status of every visible row, placeholder included.
    pub fn row_statuses(&self) -> Vec<RowStatus> {
        let selected = self.document.selected_index();
        (0..self.document.rows().len())
            .map(|index| self.player.row_status(index, selected))
            .collect()
    }

    /// Applies `action`, returning any driver requests it produced.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation reports. A failed action leaves the
    /// document unchanged.
    pub fn reduce(&mut self, action: Action) -> Result<Vec<Effect>> {
        debug!("Reducing {action:?}");
        let status = self.player.status();

        match action {
            Action::Load(document) => {
                if !self.player.is_stopped() {
                    return Err(Error::DocumentLocked { status });
                }
                self.document = document;
                self.view_sync.regenerate(&self.document);
                Ok(Vec::new())
            }
            Action::InsertCommand { command, at } => {
                self.document.insert_command(status, command, at)?;
                self.document_changed()
            }
            Action::InsertBlank(at) => {
                clipboard::insert(&mut self.document, status, &Command::blank(), at)?;
                self.document_changed()
            }
            Action::RemoveCommand(index) => {
                self.document.remove_command(status, index)?;
                self.document_changed()
            }
            Action::DuplicateCommand(index) => {
                self.document.duplicate_command(status, index)?;
                self.document_changed()
            }
            Action::UpdateField {
                index,
                field,
                value,
            } => {
                self.document.update_field(status, index, field, &value)?;
                self.document_changed()
            }
            Action::UpdateSelectedField { field, value } => {
                self.document.update_selected_field(status, field, &value)?;
                self.document_changed()
            }
            Action::SelectCommand { index, mode } => {
                self.document.select_command(status, index, mode)?;
                Ok(Vec::new())
            }
            Action::Cut(index) => {
                self.clipboard.cut(&mut self.document, status, index)?;
                self.document_changed()
            }
            Action::Copy(index) => {
                self.clipboard.copy(&self.document, status, index)?;
                Ok(Vec::new())
            }
            Action::Paste(index) => {
                self.clipboard.paste(&mut self.document, status, index)?;
                self.document_changed()
            }
            Action::EditSource(text) => {
                self.view_sync.edit_draft(text);
                Ok(Vec::new())
            }
            Action::SetSourceCursor(cursor) => {
                self.view_sync.set_cursor(cursor);
                Ok(Vec::new())
            }
            Action::CommitSource => {
                if !self.player.is_stopped() {
                    return Err(Error::DocumentLocked { status });
                }

                let fallback = self.config.parse_fallback_name.clone();
                if let Some(parsed) = self.view_sync.commit(&fallback)? {
                    self.document.replace_contents(status, parsed)?;
                    self.view_sync.regenerate(&self.document);
                }
                Ok(Vec::new())
            }
            Action::SwitchView(view) => {
                self.view_sync.switch_view(view)?;
                Ok(Vec::new())
            }
            Action::Play { mode, start_index } => {
                let request = self.player.start(
                    &self.document,
                    mode,
                    start_index,
                    self.config.post_delay_ms(),
                    &self.config.default_name,
                )?;
                Ok(vec![Effect::Play(request)])
            }
            Action::CommandFinished { index, outcome } => {
                self.player.record_outcome(index, &outcome)?;
                Ok(Vec::new())
            }
            Action::Stop => {
                self.player.request_stop()?;
                Ok(vec![Effect::Stop])
            }
            Action::RunEnded => {
                self.player.run_ended();
                Ok(Vec::new())
            }
            Action::ToggleInspecting => {
                self.player.toggle_inspecting()?;
                Ok(Vec::new())
            }
            Action::Inspected(locator) => {
                if status != PlaybackStatus::Inspecting {
                    return Err(Error::invalid_transition(status, "accept an inspected target"));
                }
                if let Some(command) = self.document.selected_command() {
                    if !command.accepts_target(&locator) {
                        return Err(Error::TargetNotOffered { target: locator });
                    }
                }

                self.player.stop_inspecting()?;
                self.document.update_selected_field(
                    self.player.status(),
                    CommandField::Target,
                    &locator,
                )?;
                self.document_changed()
            }
            Action::LocateSelected => match self.document.selected_command() {
                Some(command) if self.player.is_stopped() && !command.target.is_empty() => {
                    Ok(vec![Effect::Locate {
                        locator: command.target.clone(),
                    }])
                }
                _ => Ok(Vec::new()),
            },
        }
    }

    fn document_changed(&mut self) -> Result<Vec<Effect>> {
        self.view_sync.regenerate(&self.document);
        Ok(Vec::new())
    }
}
