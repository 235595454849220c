mod event_code;
mod one_or_many;
mod study;

pub use event_code::{EventCode, RawTag};
pub use one_or_many::one_or_many;
pub use study::{
    DataRecording, DerivedStudy, Level1Study, Level2Study, Modality, RecordingParameterSet,
    Session, StudyLevel, StudyLevelHierarchy, Subject, Task,
};

use crate::error::{HedError, Result};
use log::debug;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static JSONP_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*[A-Za-z_$][\w$]*\s*\((.*)\)\s*;?\s*$").expect("valid JSONP pattern")
});

/// The JSON body of a `callback({...});` wrapper. Plain JSON and scripts whose
/// call argument is not an object or array yield `None`.
fn unwrap_jsonp(text: &str) -> Option<&str> {
    if text.trim_start().starts_with(['{', '[']) {
        return None;
    }
    JSONP_WRAPPER
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str())
        .filter(|body| body.trim_start().starts_with(['{', '[']))
}

/// What an input file turned out to hold.
#[derive(Debug, Clone, PartialEq)]
pub enum EssDocument {
    /// A full container document with its study levels resolved.
    Container(StudyLevelHierarchy),
    /// A bare array of event-code records.
    EventCodes(Vec<EventCode>),
}

impl EssDocument {
    /// Parses plain JSON or a `receiveEssDocument({...});` style wrapper.
    pub fn parse(text: &str) -> Result<Self> {
        let json_text = match unwrap_jsonp(text) {
            Some(body) => {
                debug!("Unwrapping JSONP container document");
                body
            }
            None => text,
        };

        let value: Value = serde_json::from_str(json_text)?;
        Self::from_value(value)
    }

    /// True when `text` is a script wrapping a container document, as opposed
    /// to any other JavaScript.
    pub fn is_wrapped_container(text: &str) -> bool {
        unwrap_jsonp(text).is_some()
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(_) => Ok(EssDocument::EventCodes(serde_json::from_value(value)?)),
            Value::Object(_) => Ok(EssDocument::Container(StudyLevelHierarchy::resolve(
                &value,
            )?)),
            _ => Err(HedError::InvalidContainer(
                "expected a container object or an event code array".to_string(),
            )),
        }
    }

    /// The Level 1 event-code table the tag hierarchy is built from.
    pub fn event_codes(&self) -> &[EventCode] {
        match self {
            EssDocument::Container(hierarchy) => hierarchy
                .level1()
                .map(|study| study.event_codes.as_slice())
                .unwrap_or(&[]),
            EssDocument::EventCodes(codes) => codes,
        }
    }

    /// `None` for a bare event-code array, which has no study levels.
    pub fn highest_level(&self) -> Option<&StudyLevel> {
        match self {
            EssDocument::Container(hierarchy) => hierarchy.highest_populated(),
            EssDocument::EventCodes(_) => None,
        }
    }

    pub fn level1(&self) -> Option<&Level1Study> {
        match self {
            EssDocument::Container(hierarchy) => hierarchy.level1(),
            EssDocument::EventCodes(_) => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.level1().and_then(|study| study.title.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jsonp_manifest() {
        let text = r#"receiveEssDocument({
            "essVersion": "2.1",
            "title": "RSVP Study",
            "eventSpecificiationMethod": "Codes",
            "eventCodes": [
                {"code": "1", "tag": "Event/Category/Experimental stimulus", "numberOfInstances": 10},
                {"code": "2", "tag": "Attribute/Onset"}
            ]
        });
        "#;
        let document = EssDocument::parse(text).unwrap();
        assert_eq!(document.title(), Some("RSVP Study"));
        assert_eq!(document.event_codes().len(), 2);
        assert_eq!(document.highest_level().map(StudyLevel::kind), Some("level1"));
    }

    #[test]
    fn test_wrapped_container_detection() {
        assert!(EssDocument::is_wrapped_container("receiveEssDocument({\"a\": 1});"));
        assert!(EssDocument::is_wrapped_container("cb([1, 2])\n"));
        assert!(!EssDocument::is_wrapped_container("{\"a\": 1}"));
        assert!(!EssDocument::is_wrapped_container("init(window);"));
        assert!(!EssDocument::is_wrapped_container(
            "function draw(data) {\n  return data;\n}\n"
        ));
    }

    #[test]
    fn test_parse_bare_array() {
        let document =
            EssDocument::parse(r#"[{"tag": "A/B", "numberOfInstances": 10}]"#).unwrap();
        assert!(matches!(document, EssDocument::EventCodes(_)));
        assert!(document.highest_level().is_none());
        assert_eq!(document.event_codes()[0].tag_text(), Some("A/B"));
    }

    #[test]
    fn test_non_string_tag_does_not_reject_document() {
        let document = EssDocument::parse(
            r#"[{"tag": "A/B", "numberOfInstances": 10}, {"tag": ["x"], "numberOfInstances": 0}]"#,
        )
        .unwrap();
        assert_eq!(document.event_codes().len(), 2);
        assert_eq!(document.event_codes()[1].tag_text(), None);
    }

    #[test]
    fn test_parse_rejects_scalars() {
        assert!(matches!(
            EssDocument::parse("42"),
            Err(HedError::InvalidContainer(_))
        ));
        assert!(matches!(EssDocument::parse("{ nope"), Err(HedError::Json(_))));
    }
}
