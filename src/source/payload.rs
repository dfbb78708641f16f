//! Status line payload sent by Claude Code on stdin
//!
//! Every recognized field is optional. Leaf values of an unexpected JSON type
//! are treated as absent rather than rejecting the whole payload.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::consts::{DEFAULT_MODEL, DEFAULT_SESSION, DEFAULT_STYLE};
use crate::core::LineCounts;
use crate::error::PayloadError;

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Integer counts, accepting floats (truncated) from loosely typed producers
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64)))
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Cost {
    #[serde(deserialize_with = "lenient_count")]
    pub(crate) total_lines_added: Option<i64>,
    #[serde(deserialize_with = "lenient_count")]
    pub(crate) total_lines_removed: Option<i64>,
    #[serde(deserialize_with = "lenient_count")]
    pub(crate) total_duration_ms: Option<i64>,
}

impl Cost {
    /// Cumulative line totals, missing values as 0
    pub(crate) fn line_totals(&self) -> LineCounts {
        LineCounts::new(
            self.total_lines_added.unwrap_or(0),
            self.total_lines_removed.unwrap_or(0),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Model {
    #[serde(deserialize_with = "lenient")]
    pub(crate) display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Workspace {
    #[serde(deserialize_with = "lenient")]
    pub(crate) current_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Payload {
    #[serde(deserialize_with = "lenient")]
    session_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    cost: Option<Cost>,
    #[serde(deserialize_with = "lenient")]
    model: Option<Model>,
    /// Either a plain name or an object with `name`/`display_name`
    output_style: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    workspace: Option<Workspace>,
}

impl Payload {
    pub(crate) fn parse(input: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(input.trim())?;
        if !value.is_object() {
            return Err(PayloadError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) fn session_id(&self) -> &str {
        non_empty(&self.session_id).unwrap_or(DEFAULT_SESSION)
    }

    /// `None` when the payload carries no cost data at all
    pub(crate) fn cost(&self) -> Option<&Cost> {
        self.cost.as_ref()
    }

    pub(crate) fn model_name(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| non_empty(&m.display_name))
            .unwrap_or(DEFAULT_MODEL)
    }

    pub(crate) fn output_style(&self) -> &str {
        let named = match &self.output_style {
            Some(Value::String(name)) => Some(name.as_str()),
            Some(Value::Object(style)) => ["name", "display_name"]
                .iter()
                .find_map(|key| style.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty())),
            _ => None,
        };
        named.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_STYLE)
    }

    /// Workspace directory, or the process working directory when absent
    pub(crate) fn workspace_dir(&self) -> PathBuf {
        match self.workspace.as_ref().and_then(|w| non_empty(&w.current_dir)) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let payload = Payload::parse("{}").unwrap();
        assert_eq!(payload.session_id(), "default");
        assert_eq!(payload.model_name(), "Claude");
        assert_eq!(payload.output_style(), "default");
        assert!(payload.cost().is_none());
    }

    #[test]
    fn full_payload() {
        let payload = Payload::parse(
            r#"{
                "session_id": "abc",
                "model": {"id": "claude-opus", "display_name": "Opus"},
                "output_style": "Explanatory",
                "workspace": {"current_dir": "/home/me/project"},
                "cost": {"total_lines_added": 12, "total_lines_removed": 3, "total_duration_ms": 90000}
            }"#,
        )
        .unwrap();
        assert_eq!(payload.session_id(), "abc");
        assert_eq!(payload.model_name(), "Opus");
        assert_eq!(payload.output_style(), "Explanatory");
        assert_eq!(payload.workspace_dir(), PathBuf::from("/home/me/project"));
        let cost = payload.cost().unwrap();
        assert_eq!(cost.line_totals(), LineCounts::new(12, 3));
        assert_eq!(cost.total_duration_ms, Some(90_000));
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(Payload::parse("").is_err());
        assert!(Payload::parse("{\"session_id\":").is_err());
    }

    #[test]
    fn non_object_is_error() {
        assert!(matches!(
            Payload::parse("[1, 2]"),
            Err(PayloadError::NotAnObject)
        ));
        assert!(matches!(
            Payload::parse("null"),
            Err(PayloadError::NotAnObject)
        ));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let payload = Payload::parse("\n  {\"session_id\": \"x\"}\n\n").unwrap();
        assert_eq!(payload.session_id(), "x");
    }

    #[test]
    fn output_style_object_prefers_name() {
        let payload =
            Payload::parse(r#"{"output_style": {"name": "Learning", "display_name": "Learn"}}"#)
                .unwrap();
        assert_eq!(payload.output_style(), "Learning");

        let payload = Payload::parse(r#"{"output_style": {"display_name": "Learn"}}"#).unwrap();
        assert_eq!(payload.output_style(), "Learn");

        let payload = Payload::parse(r#"{"output_style": {}}"#).unwrap();
        assert_eq!(payload.output_style(), "default");
    }

    #[test]
    fn empty_strings_fall_back() {
        let payload = Payload::parse(
            r#"{"session_id": "", "model": {"display_name": ""}, "output_style": ""}"#,
        )
        .unwrap();
        assert_eq!(payload.session_id(), "default");
        assert_eq!(payload.model_name(), "Claude");
        assert_eq!(payload.output_style(), "default");
    }

    #[test]
    fn null_cost_means_no_cost_data() {
        let payload = Payload::parse(r#"{"cost": null}"#).unwrap();
        assert!(payload.cost().is_none());
    }

    #[test]
    fn empty_cost_counts_as_zero() {
        let payload = Payload::parse(r#"{"cost": {}}"#).unwrap();
        assert_eq!(payload.cost().unwrap().line_totals(), LineCounts::default());
    }

    #[test]
    fn wrongly_typed_fields_are_ignored() {
        let payload = Payload::parse(
            r#"{"session_id": 42, "model": "Opus", "cost": {"total_lines_added": "many", "total_lines_removed": 4.9}}"#,
        )
        .unwrap();
        assert_eq!(payload.session_id(), "default");
        assert_eq!(payload.model_name(), "Claude");
        assert_eq!(payload.cost().unwrap().line_totals(), LineCounts::new(0, 4));
    }

    #[test]
    fn missing_workspace_uses_process_cwd() {
        let payload = Payload::parse("{}").unwrap();
        assert_eq!(payload.workspace_dir(), std::env::current_dir().unwrap());
    }
}
