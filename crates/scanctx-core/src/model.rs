//! Raw report model.
//!
//! Normalized evaluation records as produced by the format converters.
//! The contextualization layer only borrows these; nothing in this crate
//! mutates them after they are loaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One full scan execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Evaluation {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// A named bundle of controls, possibly overlaying a parent profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Name of the profile this one is applied on top of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_profile: Option<String>,

    /// Control ids are expected to be unique within a profile.
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_profile = Some(parent.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Declared parent, with empty names treated as absent.
    pub fn declared_parent(&self) -> Option<&str> {
        self.parent_profile.as_deref().filter(|p| !p.is_empty())
    }
}

/// One checkable rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Control {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Source of the check as written in this profile layer.
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub results: Vec<ControlResult>,
}

impl Control {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_result(mut self, result: ControlResult) -> Self {
        self.results.push(result);
        self
    }

    /// Whether this control was actually executed in the scan.
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Passed,
    Failed,
    Skipped,
    Error,
}

/// One recorded outcome of executing a control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlResult {
    pub status: ResultStatus,

    /// Free-text detail (code description, message, backtrace lines).
    #[serde(default)]
    pub segments: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

impl ControlResult {
    pub fn new(status: ResultStatus) -> Self {
        Self {
            status,
            segments: Vec::new(),
            start_time: None,
        }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn with_start_time(mut self, time: DateTime<Utc>) -> Self {
        self.start_time = Some(time);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_evaluation() {
        let json = r#"{
            "profiles": [
                {"name": "base", "controls": [{"id": "c1", "code": "describe x"}]},
                {"name": "overlay", "parent_profile": "base", "controls": [{"id": "c1"}]}
            ]
        }"#;
        let eval = Evaluation::from_json_str(json).unwrap();
        assert_eq!(eval.profiles.len(), 2);
        assert_eq!(eval.profiles[1].declared_parent(), Some("base"));
        assert_eq!(eval.profiles[1].controls[0].code, "");
        assert!(!eval.profiles[0].controls[0].has_results());
    }

    #[test]
    fn test_result_status_wire_format() {
        let json = r#"{"status": "failed", "segments": ["expected 1, got 2"], "start_time": "2024-03-01T10:00:00Z"}"#;
        let result: ControlResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status, ResultStatus::Failed);
        assert_eq!(result.segments, vec!["expected 1, got 2"]);
        assert!(result.start_time.is_some());

        let out = serde_json::to_value(ControlResult::new(ResultStatus::Skipped)).unwrap();
        assert_eq!(out["status"], "skipped");
        assert!(out.get("start_time").is_none());
    }

    #[test]
    fn test_empty_parent_is_not_declared() {
        let profile = Profile::new("p").with_parent("");
        assert_eq!(profile.declared_parent(), None);
    }
}
