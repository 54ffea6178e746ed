//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate. Every subcommand works on a script file in the canonical text format.

use clap::{Parser, Subcommand};
use scribe_core::command::CommandField;

/// Command-line arguments for the scribe CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use scribe_cli::cli_args::Args;
///
/// let args = Args::parse_from(["scribe", "show", "login.json"]);
/// assert!(args.config_path.is_none());
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the editor config file YAML.
    ///
    /// If not provided, defaults to `~/.scribe/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Subcommands,
}

#[derive(Subcommand, Debug)]
pub enum Subcommands {
    /// Print the actions a script may use.
    Catalog {
        /// Only list actions starting with this prefix.
        prefix: Option<String>,
    },

    /// Print a script as a table.
    Show { file: String },

    /// Check that a script parses and uses only catalogued actions.
    Check { file: String },

    /// Rewrite a script in canonical form.
    Fmt { file: String },

    /// Apply one edit to a script and save it.
    Edit {
        file: String,

        #[command(subcommand)]
        operation: EditOperation,
    },

    /// Replay a script through the dry-run driver.
    Run {
        file: String,

        /// Index of the first command to run.
        #[arg(long, short = 'f', default_value_t = 0)]
        from: usize,

        /// Run only the command at `--from`.
        #[arg(long, short = 's', action)]
        single: bool,

        /// Report a failure for the command at this index.
        #[arg(long)]
        fail_at: Option<usize>,

        /// Stop the run after the command at this index.
        #[arg(long)]
        stop_after: Option<usize>,

        /// Skip the configured delay between commands.
        #[arg(long, action)]
        no_delay: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum EditOperation {
    /// Insert a command before `at` (use the script length to append).
    Insert {
        at: usize,
        action: String,
        #[arg(default_value = "")]
        target: String,
        #[arg(default_value = "")]
        value: String,
    },

    /// Insert a blank row at `at`.
    InsertBlank { at: usize },

    /// Remove the command at `index`.
    Remove { index: usize },

    /// Duplicate the command at `index`.
    Duplicate { index: usize },

    /// Set one field (`action`, `target` or `value`) of the command at `index`.
    Set {
        index: usize,
        field: CommandField,
        value: String,
    },

    /// Cut the command at `from` and paste it after `after` (counted after the cut).
    Move { from: usize, after: usize },

    /// Copy the command at `from` and paste it after `after`.
    CopyTo { from: usize, after: usize },
}
