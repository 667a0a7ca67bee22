//! JSON commands relayed from the overlay UI.
//!
//! Messages are objects tagged by `action`:
//!
//! ```json
//! {"action":"set_term","term":"cache line"}
//! {"action":"next"}
//! ```
//!
//! Validation happens before anything is dispatched, so a rejected message
//! never touches the page.

use serde::{Deserialize, Serialize};
use serde_json::Value;


/// Actions the overlay can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    SetTerm { term: String },
    Next,
    Prev,
    Clear,
    Close,
}

const ACTIONS: &[&str] = &["set_term", "next", "prev", "clear", "close"];

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("command must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("command has no string `action` field")]
    MissingAction,
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("search term must be a string, got {0}")]
    InvalidTerm(&'static str),
}

impl Command {
    /// Parse a raw JSON message.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Validate an already-decoded message.
    pub fn from_value(value: Value) -> Result<Self, CommandError> {
        let Value::Object(map) = &value else {
            return Err(CommandError::NotAnObject(kind(&value)));
        };
        let action = map
            .get("action")
            .and_then(Value::as_str)
            .ok_or(CommandError::MissingAction)?;
        if !ACTIONS.contains(&action) {
            return Err(CommandError::UnknownAction(action.to_owned()));
        }
        if action == "set_term" {
            match map.get("term") {
                Some(Value::String(_)) => {}
                Some(other) => return Err(CommandError::InvalidTerm(kind(other))),
                None => return Err(CommandError::InvalidTerm("nothing")),
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// JSON type name for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
