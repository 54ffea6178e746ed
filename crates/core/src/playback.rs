//! The player state machine.
//!
//! A run goes `Stopped -> Running -> Stopped`. Inspecting is a separate mode that
//! is only entered from `Stopped`. The driver that actually executes commands
//! lives outside this crate: it receives a [`RunRequest`] and reports back one
//! [`CommandOutcome`] per command and finally that the run ended.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use log::{debug, info, warn};
use serde::Serialize;

use crate::command::Command;
use crate::document::Document;
use crate::error::{Error, Result};

/// What the application is doing. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    /// Recording or playing.
    Running,
    /// Picking a target element in the page.
    Inspecting,
}

impl Display for PlaybackStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Running => "running",
            PlaybackStatus::Inspecting => "inspecting",
        })
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayMode {
    /// Execute exactly one command.
    Single,
    /// Execute from the start index to the end.
    #[default]
    Straight,
}

/// Driver-reported result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Passed,
    /// The command failed; a straight run carries on.
    Failed { message: String },
    /// The driver cannot continue; the run ends after recording the failure.
    Fatal { message: String },
}

/// Where a run stands after an outcome was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Next(usize),
    Stopped,
}

/// Everything the driver needs to execute a run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub title: String,
    pub source_id: Option<String>,
    pub mode: PlayMode,
    pub start_index: usize,
    pub commands: Vec<Command>,
    pub post_delay_ms: u64,
}

/// How a table row should be rendered. Earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Selected,
    Running,
    Error,
    Done,
    Normal,
}

#[derive(Debug, Clone, Default)]
pub struct Player {
    status: PlaybackStatus,
    mode: PlayMode,
    start_index: Option<usize>,
    next_command_index: Option<usize>,
    done_indices: BTreeSet<usize>,
    error_indices: BTreeSet<usize>,
    command_count: usize,
    stop_requested: bool,
}

impl Player {
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_stopped(&self) -> bool {
        self.status == PlaybackStatus::Stopped
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn start_index(&self) -> Option<usize> {
        self.start_index
    }

    pub fn next_command_index(&self) -> Option<usize> {
        self.next_command_index
    }

    pub fn done_indices(&self) -> &BTreeSet<usize> {
        &self.done_indices
    }

    pub fn error_indices(&self) -> &BTreeSet<usize> {
        &self.error_indices
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Starts a run over `document` at `start_index` and returns the request for the driver.
    ///
    /// Outcomes from the previous run are cleared. An unnamed document runs under
    /// the title `default_name`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransition`] unless stopped, [`Error::IndexOutOfRange`] when
    /// `start_index` does not point at a command.
    pub fn start(
        &mut self,
        document: &Document,
        mode: PlayMode,
        start_index: usize,
        post_delay_ms: u64,
        default_name: &str,
    ) -> Result<RunRequest> {
        if self.status != PlaybackStatus::Stopped {
            return Err(Error::invalid_transition(self.status, "start a run"));
        }

        if start_index >= document.len() {
            return Err(Error::index_out_of_range(start_index, document.len()));
        }

        info!(
            "Starting {mode:?} run of `{}` at command {start_index}",
            document.display_name_or(default_name)
        );

        self.status = PlaybackStatus::Running;
        self.mode = mode;
        self.start_index = Some(start_index);
        self.next_command_index = Some(start_index);
        self.done_indices.clear();
        self.error_indices.clear();
        self.command_count = document.len();
        self.stop_requested = false;

        Ok(RunRequest {
            title: document.display_name_or(default_name).to_string(),
            source_id: document.meta.source_id.clone(),
            mode,
            start_index,
            commands: document.commands().to_vec(),
            post_delay_ms,
        })
    }

    /// Records the outcome of the running command and advances the run.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransition`] when no run is active, [`Error::UnexpectedOutcome`]
    /// when `index` is not the running command. Neither changes any state.
    pub fn record_outcome(&mut self, index: usize, outcome: &CommandOutcome) -> Result<Progress> {
        if self.status != PlaybackStatus::Running {
            return Err(Error::invalid_transition(self.status, "record a command outcome"));
        }

        let expected = self.next_command_index.unwrap_or(self.command_count);
        if index != expected {
            warn!("Ignoring outcome for command {index}, expected {expected}");
            return Err(Error::UnexpectedOutcome { index, expected });
        }

        match outcome {
            CommandOutcome::Passed => {
                debug!("Command {index} passed");
                self.done_indices.insert(index);
            }
            CommandOutcome::Failed { message } | CommandOutcome::Fatal { message } => {
                warn!("Command {index} failed: {message}");
                self.error_indices.insert(index);
            }
        }

        let next = index + 1;
        self.next_command_index = Some(next);

        let finished = self.mode == PlayMode::Single
            || next >= self.command_count
            || self.stop_requested
            || matches!(outcome, CommandOutcome::Fatal { .. });

        if finished {
            self.finish();
            Ok(Progress::Stopped)
        } else {
            Ok(Progress::Next(next))
        }
    }

    /// Asks a running player to stop at the next command boundary.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransition`] while inspecting.
    pub fn request_stop(&mut self) -> Result<()> {
        match self.status {
            PlaybackStatus::Running => {
                info!("Stop requested");
                self.stop_requested = true;
                Ok(())
            }
            PlaybackStatus::Stopped => Ok(()),
            PlaybackStatus::Inspecting => {
                Err(Error::invalid_transition(self.status, "stop a run"))
            }
        }
    }

    /// The driver reported the end of the run. Idempotent.
    pub fn run_ended(&mut self) {
        if self.status == PlaybackStatus::Running {
            self.finish();
        }
    }

    fn finish(&mut self) {
        info!(
            "Run finished: {} passed, {} failed",
            self.done_indices.len(),
            self.error_indices.len()
        );
        self.status = PlaybackStatus::Stopped;
        self.next_command_index = None;
        self.stop_requested = false;
    }

    /// # Errors
    ///
    /// [`Error::InvalidTransition`] unless stopped.
    pub fn start_inspecting(&mut self) -> Result<()> {
        if self.status != PlaybackStatus::Stopped {
            return Err(Error::invalid_transition(self.status, "start inspecting"));
        }

        self.status = PlaybackStatus::Inspecting;
        Ok(())
    }

    /// # Errors
    ///
    /// [`Error::InvalidTransition`] unless inspecting.
    pub fn stop_inspecting(&mut self) -> Result<()> {
        if self.status != PlaybackStatus::Inspecting {
            return Err(Error::invalid_transition(self.status, "stop inspecting"));
        }

        self.status = PlaybackStatus::Stopped;
        Ok(())
    }

    /// # Errors
    ///
    /// [`Error::InvalidTransition`] while running.
    pub fn toggle_inspecting(&mut self) -> Result<()> {
        if self.status == PlaybackStatus::Inspecting {
            self.stop_inspecting()
        } else {
            self.start_inspecting()
        }
    }

    pub fn row_status(&self, index: usize, selected_index: Option<usize>) -> RowStatus {
        if selected_index == Some(index) {
            RowStatus::Selected
        } else if self.next_command_index == Some(index) {
            RowStatus::Running
        } else if self.error_indices.contains(&index) {
            RowStatus::Error
        } else if self.done_indices.contains(&index) {
            RowStatus::Done
        } else {
            RowStatus::Normal
        }
    }
}
