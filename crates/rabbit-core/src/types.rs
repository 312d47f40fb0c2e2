//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid launch mode value.
    #[error("invalid launch mode: {value}")]
    InvalidLaunchMode { value: String },

    /// The display window length was out of range.
    #[error("window days must be between 0 and 9999, got {value}")]
    WindowOutOfRange { value: u32 },
}

/// How a launch was started.
///
/// This enum encodes the valid launch modes, preventing invalid string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// A normal run.
    Run,
    /// A debug launch.
    Debug,
    /// A profiling launch.
    Profile,
}

impl LaunchMode {
    /// String representation for file storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Debug => "debug",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LaunchMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run" => Ok(Self::Run),
            "debug" => Ok(Self::Debug),
            "profile" => Ok(Self::Profile),
            _ => Err(ValidationError::InvalidLaunchMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated workspace-file identifier.
    ///
    /// File IDs must be non-empty strings. They are stable handles assigned
    /// by the event source, not file-system paths.
    FileId, "file ID"
);

define_string_id!(
    /// A validated command identifier (e.g., `org.example.save`).
    CommandId, "command ID"
);

define_string_id!(
    /// A validated perspective identifier.
    PerspectiveId, "perspective ID"
);

define_string_id!(
    /// A validated task handle identifier.
    ///
    /// Task handles identify a task in the host task manager. Together with
    /// the task creation date they form a stable task identity, since handles
    /// may be reused after a task is deleted.
    TaskHandle, "task handle"
);

define_string_id!(
    /// A validated launch configuration name.
    LaunchName, "launch name"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_rejects_empty() {
        assert!(FileId::new("").is_err());
        assert!(FileId::new("wsfile-1").is_ok());
    }

    #[test]
    fn command_id_rejects_empty() {
        assert!(CommandId::new("").is_err());
        assert!(CommandId::new("org.example.copy").is_ok());
    }

    #[test]
    fn file_id_serde_roundtrip() {
        let id = FileId::new("wsfile-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"wsfile-42\"");
        let parsed: FileId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn file_id_serde_rejects_empty() {
        let result: Result<FileId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn task_handle_as_ref() {
        let handle = TaskHandle::new("local-7").unwrap();
        let s: &str = handle.as_ref();
        assert_eq!(s, "local-7");
    }

    #[test]
    fn launch_mode_from_str() {
        assert_eq!("run".parse::<LaunchMode>().unwrap(), LaunchMode::Run);
        assert_eq!("debug".parse::<LaunchMode>().unwrap(), LaunchMode::Debug);
        assert_eq!(
            "profile".parse::<LaunchMode>().unwrap(),
            LaunchMode::Profile
        );
        assert!("release".parse::<LaunchMode>().is_err());
    }

    #[test]
    fn launch_mode_serde_roundtrip() {
        let mode = LaunchMode::Debug;
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, "\"debug\"");
        let parsed: LaunchMode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mode);
    }
}
