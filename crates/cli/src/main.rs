use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, warn};
use scribe_cli::cli_args::{Args, Subcommands};
use scribe_cli::driver::{self, DryRunDriver};
use scribe_cli::{editing, table};
use scribe_core::app::AppState;
use scribe_core::config::EditorConfig;
use scribe_core::error::{Error, Result};
use scribe_core::playback::PlayMode;
use scribe_core::{catalog, codec, config, file_handling};

/// Initialize configuration and load a script into a fresh application state
fn load_state(config: &EditorConfig, file: &str) -> Result<AppState> {
    let document = file_handling::load_script(file, &config.parse_fallback_name)?;
    Ok(AppState::new(document, config.clone()))
}

fn save_state(file: &str, state: &AppState) -> Result<()> {
    file_handling::save_script(file, &state.document, &state.config.default_name)
}

fn print_table(state: &AppState) -> Result<()> {
    let mut stdout = stdout();
    table::render_table(&mut stdout, state)
}

fn check(config: &EditorConfig, file: &str) -> Result<()> {
    let state = load_state(config, file)?;
    let unknown = codec::unknown_actions(&state.document);

    if unknown.is_empty() {
        println!(
            "`{}`: {} command(s), all actions known.",
            state.document.display_name_or(&state.config.default_name),
            state.document.len()
        );
        return Ok(());
    }

    for (index, action) in &unknown {
        println!("{index}: unknown action `{action}`");
    }

    Err(Error::Misc(format!(
        "{} command(s) use actions outside the catalog: {}",
        unknown.len(),
        unknown.iter().map(|(_, action)| action).unique().join(", ")
    )))
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);
    let config = config::load_config(&config_path)?;

    match args.command {
        Subcommands::Catalog { prefix } => {
            let names = match prefix {
                Some(prefix) => catalog::matching(&prefix),
                None => catalog::available_commands().to_vec(),
            };
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Subcommands::Show { file } => print_table(&load_state(&config, &file)?),
        Subcommands::Check { file } => check(&config, &file),
        Subcommands::Fmt { file } => {
            let state = load_state(&config, &file)?;
            save_state(&file, &state)
        }
        Subcommands::Edit { file, operation } => {
            let mut state = load_state(&config, &file)?;
            if !editing::apply_lenient(&mut state, &operation)? {
                println!("Nothing changed in `{file}`.");
                return Ok(());
            }

            if !codec::unknown_actions(&state.document).is_empty() {
                warn!("Saving a script with actions outside the catalog");
            }

            save_state(&file, &state)?;
            print_table(&state)
        }
        Subcommands::Run {
            file,
            from,
            single,
            fail_at,
            stop_after,
            no_delay,
        } => {
            let mut state = load_state(&config, &file)?;
            let mode = if single {
                PlayMode::Single
            } else {
                PlayMode::Straight
            };
            let mut driver = DryRunDriver {
                fail_at,
                stop_after,
                ..DryRunDriver::default()
            };

            driver::replay(&mut state, &mut driver, mode, from, !no_delay)?;
            info!(
                "Run finished with {} failure(s)",
                state.player.error_indices().len()
            );

            println!();
            print_table(&state)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
