//! Scribe Core Library
//!
//! This crate provides the document model behind scribe, an editor for
//! browser-automation test scripts. A script is an ordered list of commands
//! (action, target locator, value) that can be edited as a table or as text
//! and replayed by an external driver.
//!
//! # Key Features
//!
//! - **Script Documents**: Positional command lists with selection tracking
//! - **Text Codec**: Canonical JSON text for scripts, with structural validation
//! - **Clipboard**: Cut, copy, paste and insert of commands
//! - **Playback**: The player state machine that tracks run progress and outcomes
//! - **View Sync**: Draft/committed buffers keeping table and source in step
//! - **Application State**: A reducer over all of the above, testable without a UI
//!
//! # Examples
//!
//! Loading a script and starting a run from its second command:
//!
//! ```no_run
//! use scribe_core::app::{Action, AppState};
//! use scribe_core::config::EditorConfig;
//! use scribe_core::file_handling::load_script;
//! use scribe_core::playback::PlayMode;
//!
//! let document = load_script("login.json", "untitled")?;
//! let mut state = AppState::new(document, EditorConfig::default());
//! let effects = state.reduce(Action::Play { mode: PlayMode::Straight, start_index: 1 })?;
//! println!("{effects:?}");
//! # Ok::<(), scribe_core::error::Error>(())
//! ```

pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod codec;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handling;
pub mod playback;
pub mod view_sync;
