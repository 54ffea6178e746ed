//! Playback drivers for the command line.
//!
//! The editor only produces run requests; a driver carries them out and feeds
//! outcomes back through the reducer. The dry-run driver executes nothing: it
//! prints each command and reports the outcome it was configured with.

use std::thread;
use std::time::Duration;

use log::{debug, info};
use scribe_core::app::{Action, AppState, Effect};
use scribe_core::command::Command;
use scribe_core::error::Result;
use scribe_core::playback::{CommandOutcome, PlayMode, RunRequest};

/// Executes single commands on behalf of a run.
pub trait Driver {
    fn execute(&mut self, index: usize, command: &Command) -> CommandOutcome;

    /// Called between commands; `true` asks the player to stop at the boundary.
    fn should_stop(&mut self, _index: usize) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct DryRunDriver {
    pub fail_at: Option<usize>,
    pub stop_after: Option<usize>,
    pub log: Vec<String>,
}

impl Driver for DryRunDriver {
    fn execute(&mut self, index: usize, command: &Command) -> CommandOutcome {
        let line = format!("[{index}] {command}");
        println!("{line}");
        self.log.push(line);

        if self.fail_at == Some(index) {
            CommandOutcome::Failed {
                message: format!("dry run failure requested for command {index}"),
            }
        } else {
            CommandOutcome::Passed
        }
    }

    fn should_stop(&mut self, index: usize) -> bool {
        self.stop_after == Some(index)
    }
}

/// Plays `request` to completion, reporting each outcome to `state`.
fn drive<D: Driver>(
    state: &mut AppState,
    driver: &mut D,
    request: &RunRequest,
    honour_delay: bool,
) -> Result<()> {
    let mut index = request.start_index;

    while let Some(command) = request.commands.get(index) {
        if state.player.is_stopped() {
            break;
        }

        let outcome = driver.execute(index, command);

        if driver.should_stop(index) {
            debug!("Driver asked to stop after command {index}");
            for effect in state.reduce(Action::Stop)? {
                debug!("Ignoring effect {effect:?} during dry run");
            }
        }

        state.reduce(Action::CommandFinished { index, outcome })?;

        if request.mode == PlayMode::Single {
            break;
        }

        if honour_delay && request.post_delay_ms > 0 {
            thread::sleep(Duration::from_millis(request.post_delay_ms));
        }

        index += 1;
    }

    state.reduce(Action::RunEnded)?;
    Ok(())
}

/// Starts a run on `state` and plays it with `driver`.
///
/// # Errors
///
/// Returns an error if the run cannot be started, e.g. `start_index` is out of range.
pub fn replay<D: Driver>(
    state: &mut AppState,
    driver: &mut D,
    mode: PlayMode,
    start_index: usize,
    honour_delay: bool,
) -> Result<()> {
    let effects = state.reduce(Action::Play { mode, start_index })?;

    for effect in effects {
        if let Effect::Play(request) = effect {
            info!(
                "Playing `{}` from command {} ({} commands)",
                request.title,
                request.start_index,
                request.commands.len()
            );
            drive(state, driver, &request, honour_delay)?;
        }
    }

    Ok(())
}
