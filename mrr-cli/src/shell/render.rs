//! Output formatting for the shell.

use serde_json::Value;

use crate::error::Error;

const COLOR_RED: &str = "\x1b[31m";
const COLOR_ORANGE: &str = "\x1b[33m";
const COLOR_RESET: &str = "\x1b[0m";

/// Whether to emit ANSI colors. Off when stdout is not a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(COLOR_RED, text)
    }

    pub fn orange(&self, text: &str) -> String {
        self.paint(COLOR_ORANGE, text)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{COLOR_RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Pretty-print a response with two-space indentation.
pub fn json(value: &Value) -> String {
    // Serializing a Value cannot fail: map keys are always strings.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Text shown to the user for a non-fatal error.
pub fn error(err: &Error) -> String {
    match err {
        Error::Api(message) => format!("Error: {message}"),
        Error::Argument { reason, usage } => format!("Error: {reason}\nUsage: {usage}"),
        Error::UnknownCommand(line) => format!("*** Unknown syntax: {line}"),
        Error::Transport(_) | Error::Json(_) => format!("An error occurred: {err}"),
        Error::Config(_) | Error::Io(_) => format!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_two_space_indent() {
        let value = json!({ "success": true, "data": { "id": 1 } });
        assert_eq!(
            json(&value),
            "{\n  \"success\": true,\n  \"data\": {\n    \"id\": 1\n  }\n}"
        );
    }

    #[test]
    fn test_api_error() {
        assert_eq!(error(&Error::Api("bad request".into())), "Error: bad request");
    }

    #[test]
    fn test_argument_error_shows_usage() {
        let err = Error::Argument {
            reason: "missing algo name".into(),
            usage: "get_algo <algo_name>",
        };
        assert_eq!(error(&err), "Error: missing algo name\nUsage: get_algo <algo_name>");
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            error(&Error::UnknownCommand("frobnicate".into())),
            "*** Unknown syntax: frobnicate"
        );
    }

    #[test]
    fn test_decode_error_is_generic_failure() {
        let err = Error::Json(serde_json::from_str::<Value>("<html>").unwrap_err());
        assert!(error(&err).starts_with("An error occurred: JSON error:"));
    }

    #[test]
    fn test_style() {
        assert_eq!(Style::plain().red("x"), "x");
        assert_eq!(Style::colored().red("x"), "\x1b[31mx\x1b[0m");
    }
}
