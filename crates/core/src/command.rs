use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One scripted step: an action applied to a target locator with an optional value.
///
/// A command has no identifier of its own; its position in the script is its identity.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    #[serde(alias = "cmd")]
    pub action: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub value: String,
    /// Closed set of targets to choose from, filled in by the recorder.
    #[serde(skip)]
    pub target_options: Option<Vec<String>>,
}

/// The editable fields of a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandField {
    Action,
    Target,
    Value,
}

impl Command {
    pub fn new(action: &str, target: &str, value: &str) -> Self {
        Self {
            action: action.to_string(),
            target: target.to_string(),
            value: value.to_string(),
            target_options: None,
        }
    }

    /// The blank command used for "new row" affordances and as the empty-script placeholder.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_target_options(mut self, options: Vec<String>) -> Self {
        self.target_options = Some(options);
        self
    }

    /// A command with no action, target or value. Never written out.
    pub fn is_blank(&self) -> bool {
        self.action.is_empty() && self.target.is_empty() && self.value.is_empty()
    }

    /// Target options, if the target is a closed choice.
    pub fn offered_targets(&self) -> Option<&[String]> {
        match &self.target_options {
            Some(options) if !options.is_empty() => Some(options.as_slice()),
            _ => None,
        }
    }

    /// Whether `target` may be set: any value for an open target, one of the
    /// options for a closed choice.
    pub fn accepts_target(&self, target: &str) -> bool {
        self.offered_targets()
            .map_or(true, |options| options.iter().any(|option| option == target))
    }

    pub fn field(&self, field: CommandField) -> &str {
        match field {
            CommandField::Action => &self.action,
            CommandField::Target => &self.target,
            CommandField::Value => &self.value,
        }
    }

    /// Sets exactly one field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TargetNotOffered`] when the target is a closed choice and
    /// `value` is not among the options.
    pub fn set_field(&mut self, field: CommandField, value: &str) -> Result<()> {
        match field {
            CommandField::Action => self.action = value.to_string(),
            CommandField::Target => {
                if !self.accepts_target(value) {
                    return Err(Error::TargetNotOffered {
                        target: value.to_string(),
                    });
                }
                self.target = value.to_string();
            }
            CommandField::Value => self.value = value.to_string(),
        }

        Ok(())
    }
}

impl Display for Command {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.action)?;

        if !self.target.is_empty() {
            write!(formatter, " | {}", self.target)?;
        }

        if !self.value.is_empty() {
            write!(formatter, " | {}", self.value)?;
        }

        Ok(())
    }
}

impl Display for CommandField {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            CommandField::Action => "action",
            CommandField::Target => "target",
            CommandField::Value => "value",
        })
    }
}

impl FromStr for CommandField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "action" | "cmd" => Ok(CommandField::Action),
            "target" => Ok(CommandField::Target),
            "value" => Ok(CommandField::Value),
            _ => Err(Error::Misc(format!("Unknown command field: `{s}`"))),
        }
    }
}
