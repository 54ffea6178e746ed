//! Conversion between a [`Document`] and its canonical text.
//!
//! The text is a JSON object with exactly two fields, `name` and `commands`,
//! each command carrying `action`, `target` and `value`. The text is always
//! derived from the document, never merged back into it.

use log::warn;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalog;
use crate::command::Command;
use crate::document::{Document, DEFAULT_NAME};
use crate::error::{Error, Result};

#[derive(Deserialize)]
struct ScriptText {
    #[serde(default)]
    name: Option<String>,
    commands: Vec<Command>,
}

/// Renders `document` as pretty-printed JSON, naming an unnamed document [`DEFAULT_NAME`].
pub fn serialize(document: &Document) -> String {
    serialize_named(document, DEFAULT_NAME)
}

/// Renders `document` as pretty-printed JSON.
///
/// Blank placeholder commands and UI-only fields such as target options are left
/// out. An unnamed document is written as `default_name`. The output depends only
/// on the document's name and commands.
pub fn serialize_named(document: &Document, default_name: &str) -> String {
    let commands: Vec<Value> = document
        .commands()
        .iter()
        .filter(|command| !command.is_blank())
        .map(|command| {
            json!({
                "action": command.action,
                "target": command.target,
                "value": command.value,
            })
        })
        .collect();

    let script = json!({
        "name": document.display_name_or(default_name),
        "commands": commands,
    });

    format!("{script:#}")
}

/// Parses script text, using `fallback_name` when the text has no `name`.
///
/// Actions are not checked against the catalog; see [`unknown_actions`].
///
/// # Errors
///
/// Returns [`Error::Parse`] when the text is not JSON or does not have the
/// script shape.
pub fn parse(text: &str, fallback_name: &str) -> Result<Document> {
    let script: ScriptText =
        serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;

    let name = script.name.unwrap_or_else(|| fallback_name.to_string());

    Ok(Document::new(Some(name), script.commands))
}

/// Commands whose action is not in the catalog, with their positions.
///
/// Unknown actions are tolerated so newer scripts still load; they are only flagged.
pub fn unknown_actions(document: &Document) -> Vec<(usize, &str)> {
    let unknown: Vec<(usize, &str)> = document
        .commands()
        .iter()
        .enumerate()
        .filter(|(_, command)| !command.is_blank() && !catalog::is_known(&command.action))
        .map(|(index, command)| (index, command.action.as_str()))
        .collect();

    for (index, action) in &unknown {
        warn!("Command {index} uses unknown action `{action}`");
    }

    unknown
}

/// The document as it survives a trip through the text: blank commands dropped
/// and a missing name replaced by `default_name`.
pub fn normalized(document: &Document, default_name: &str) -> Document {
    let commands = document
        .commands()
        .iter()
        .filter(|command| !command.is_blank())
        .cloned()
        .collect();

    Document::new(Some(document.display_name_or(default_name).to_string()), commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(
            Some("login".to_string()),
            vec![
                Command::new("open", "https://example.com/", ""),
                Command::new("type", "id=user", "alice"),
                Command::new("clickAndWait", "css=button.submit", ""),
            ],
        )
    }

    #[test]
    fn test_serialize_shape() {
        let text = serialize(&sample());
        let value: Value = serde_json::from_str(&text).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["name"], "login");

        let commands = object["commands"].as_array().unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[1],
            json!({"action": "type", "target": "id=user", "value": "alice"})
        );
    }

    #[test]
    fn test_serialize_omits_blank_commands_and_target_options() {
        let document = Document::new(
            Some("x".to_string()),
            vec![
                Command::blank(),
                Command::new("click", "id=a", "").with_target_options(vec!["id=a".to_string()]),
                Command::blank(),
            ],
        );

        let text = serialize(&document);
        assert!(!text.contains("targetOptions"));
        assert!(!text.contains("target_options"));

        let parsed = parse(&text, "fallback").unwrap();
        assert_eq!(parsed.commands(), &[Command::new("click", "id=a", "")]);
    }

    #[test]
    fn test_serialize_is_deterministic() {
        assert_eq!(serialize(&sample()), serialize(&sample().clone()));
    }

    #[test]
    fn test_serialize_unnamed_uses_placeholder_name() {
        let text = serialize(&Document::default());
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "Untitled");
        assert_eq!(value["commands"], json!([]));
    }

    #[test]
    fn test_round_trip() {
        let document = sample();
        let parsed = parse(&serialize(&document), "fallback").unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_round_trip_with_placeholders_matches_normalized() {
        let mut commands = sample().commands().to_vec();
        commands.insert(1, Command::blank());
        let document = Document::new(Some("login".to_string()), commands);

        let parsed = parse(&serialize(&document), "fallback").unwrap();
        assert_eq!(parsed, normalized(&document, DEFAULT_NAME));
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_round_trip_unnamed_matches_normalized() {
        for name in [None, Some(String::new())] {
            let document = Document::new(name, vec![Command::new("open", "/", "")]);
            let parsed = parse(&serialize(&document), "fallback").unwrap();

            assert_eq!(parsed, normalized(&document, DEFAULT_NAME));
            assert_eq!(parsed.display_name(), document.display_name());
            assert_eq!(serialize(&parsed), serialize(&document));
        }
    }

    #[test]
    fn test_serialize_named_uses_given_default() {
        let text = serialize_named(&Document::default(), "Scratch");
        let parsed = parse(&text, "fallback").unwrap();
        assert_eq!(parsed.meta.name.as_deref(), Some("Scratch"));
        assert_eq!(parsed, normalized(&Document::default(), "Scratch"));

        assert_eq!(serialize_named(&sample(), "Scratch"), serialize(&sample()));
    }

    #[test]
    fn test_parse_uses_fallback_name() {
        let parsed = parse(r#"{"commands": []}"#, "untitled").unwrap();
        assert_eq!(parsed.meta.name.as_deref(), Some("untitled"));
        assert!(parsed.is_empty());
        assert!(parsed.meta.source_id.is_none());
    }

    #[test]
    fn test_parse_defaults_missing_target_and_value() {
        let parsed = parse(r#"{"name": "n", "commands": [{"action": "refresh"}]}"#, "f").unwrap();
        assert_eq!(parsed.commands(), &[Command::new("refresh", "", "")]);
    }

    #[test]
    fn test_parse_accepts_legacy_cmd_key() {
        let parsed = parse(
            r#"{"name": "n", "commands": [{"cmd": "open", "target": "/", "value": ""}]}"#,
            "f",
        )
        .unwrap();
        assert_eq!(parsed.commands()[0].action, "open");
    }

    #[test]
    fn test_parse_keeps_unknown_actions() {
        let text = r#"{"name": "n", "commands": [{"action": "teleport", "target": "mars", "value": ""}]}"#;
        let parsed = parse(text, "f").unwrap();
        assert_eq!(parsed.commands()[0].action, "teleport");
        assert_eq!(unknown_actions(&parsed), vec![(0, "teleport")]);
        assert_eq!(parse(&serialize(&parsed), "f").unwrap(), parsed);
    }

    #[test]
    fn test_parse_errors() {
        let malformed = [
            "",
            "not json",
            r#"{"name": "n", "commands": [}"#,
            r#"[]"#,
            r#"{"name": "n"}"#,
            r#"{"name": "n", "commands": {}}"#,
            r#"{"name": "n", "commands": [{"target": "x"}]}"#,
            r#"{"name": "n", "commands": [{"action": 3}]}"#,
            r#"{"name": 7, "commands": []}"#,
        ];

        for text in malformed {
            match parse(text, "f") {
                Err(Error::Parse(message)) => assert!(!message.is_empty(), "{text}"),
                other => panic!("expected parse error for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_actions_ignores_blank_rows() {
        let document = Document::new(None, vec![Command::blank(), Command::new("open", "/", "")]);
        assert!(unknown_actions(&document).is_empty());
    }
}
