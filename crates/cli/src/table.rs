//! Terminal rendering of a script as a command table.
//!
//! Rows are coloured by their playback status, the same precedence the
//! editor uses: selected, running, error, done.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use scribe_core::app::AppState;
use scribe_core::error::Result;
use scribe_core::playback::RowStatus;

const ACTION_WIDTH: usize = 22;
const TARGET_WIDTH: usize = 32;

/// Trait for converting a row status to terminal colours
pub trait AsTermColor {
    fn foreground_color(&self) -> Option<Color>;
    fn background_color(&self) -> Option<Color>;
}

impl AsTermColor for RowStatus {
    fn foreground_color(&self) -> Option<Color> {
        match self {
            RowStatus::Selected => Some(Color::White),
            RowStatus::Running => Some(Color::Black),
            RowStatus::Error => Some(Color::Red),
            RowStatus::Done => Some(Color::Green),
            RowStatus::Normal => None,
        }
    }

    fn background_color(&self) -> Option<Color> {
        match self {
            RowStatus::Selected => Some(Color::DarkBlue),
            RowStatus::Running => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// Short marker printed before each row, so status survives without colour.
pub fn status_marker(status: RowStatus) -> char {
    match status {
        RowStatus::Selected => '>',
        RowStatus::Running => '*',
        RowStatus::Error => '!',
        RowStatus::Done => '+',
        RowStatus::Normal => ' ',
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else {
        let truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

/// Writes the script name and one line per row to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_table<W: Write>(out: &mut W, state: &AppState) -> Result<()> {
    let rows = state.document.rows();
    let statuses = state.row_statuses();

    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(format!(
            "{}\n",
            state.document.display_name_or(&state.config.default_name)
        )),
        Print(format!(
            "    # {} {} value\n",
            fit("action", ACTION_WIDTH),
            fit("target", TARGET_WIDTH)
        )),
        SetAttribute(Attribute::Reset)
    )?;

    for (index, (command, status)) in rows.iter().zip(statuses).enumerate() {
        if let Some(color) = status.foreground_color() {
            queue!(out, SetForegroundColor(color))?;
        }
        if let Some(color) = status.background_color() {
            queue!(out, SetBackgroundColor(color))?;
        }

        queue!(
            out,
            Print(format!(
                "{} {:>3} {} {} {}",
                status_marker(status),
                index,
                fit(&command.action, ACTION_WIDTH),
                fit(&command.target, TARGET_WIDTH),
                command.value
            )),
            ResetColor,
            Print("\n")
        )?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::command::Command;
    use scribe_core::config::EditorConfig;
    use scribe_core::document::Document;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abcd", 4), "abcd");
    }

    #[test]
    fn test_render_empty_script_shows_placeholder_row() {
        let state = AppState::new(Document::default(), EditorConfig::default());
        let mut out = Vec::new();
        render_table(&mut out, &state).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Untitled"));
        assert!(text.contains("  0 "));
    }

    #[test]
    fn test_render_unnamed_script_uses_configured_name() {
        let config = EditorConfig {
            default_name: "Scratch".to_string(),
            ..EditorConfig::default()
        };
        let state = AppState::new(Document::default(), config);
        let mut out = Vec::new();
        render_table(&mut out, &state).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Scratch"));
        assert!(!text.contains("Untitled"));
    }

    #[test]
    fn test_render_lists_every_command() {
        let document = Document::new(
            Some("demo".to_string()),
            vec![
                Command::new("open", "https://example.com", ""),
                Command::new("type", "id=q", "rust"),
            ],
        );
        let state = AppState::new(document, EditorConfig::default());
        let mut out = Vec::new();
        render_table(&mut out, &state).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("demo"));
        assert!(text.contains("https://example.com"));
        assert!(text.contains("rust"));
    }
}
