//! Scribe CLI Library
//!
//! This crate provides the command-line interface for scribe. It loads script
//! files, applies editing operations through the core reducer, renders the
//! command table and replays scripts through a dry-run driver.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`editing`]: Mapping edit subcommands onto reducer actions
//! - [`table`]: Terminal rendering of the command table
//! - [`driver`]: Playback drivers
//!
//! # Examples
//!
//! ```bash
//! # List the available actions
//! scribe catalog click
//!
//! # Show a script
//! scribe show login.json
//!
//! # Append a command and save
//! scribe edit login.json insert 3 clickAndWait "css=button.submit"
//!
//! # Replay from the second command, failing the third
//! scribe run login.json --from 1 --fail-at 2
//! ```

pub mod cli_args;
pub mod driver;
pub mod editing;
pub mod table;
