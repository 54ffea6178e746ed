use log::warn;
use thiserror::Error;

use crate::playback::PlaybackStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The script cannot be edited while the player is {}.", .status)]
    DocumentLocked { status: PlaybackStatus },

    #[error("Command index {} is out of range for a script of {} command(s).", .index, .len)]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{}", .0)]
    Parse(String),

    #[error("Target `{}` is not one of the offered target options.", .target)]
    TargetNotOffered { target: String },

    #[error("Cannot {} while the player is {}.", .operation, .status)]
    InvalidTransition {
        status: PlaybackStatus,
        operation: String,
    },

    #[error("Outcome reported for command {}, but command {} is running.", .index, .expected)]
    UnexpectedOutcome { index: usize, expected: usize },

    #[error("There are errors in the source. Fix them before leaving the source view.")]
    ParseErrorPending,

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn invalid_transition(status: PlaybackStatus, operation: &str) -> Self {
        warn!("Refusing to {operation} while {status}");
        Self::InvalidTransition {
            status,
            operation: operation.to_string(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Whether the error is a local precondition failure that callers may treat as a no-op.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::DocumentLocked { .. } | Self::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_errors() {
        assert!(Error::index_out_of_range(4, 2).is_soft());
        assert!(Error::DocumentLocked {
            status: PlaybackStatus::Running
        }
        .is_soft());
        assert!(!Error::Parse("eof".to_string()).is_soft());
        assert!(!Error::TargetNotOffered {
            target: "id=z".to_string()
        }
        .is_soft());
    }
}
