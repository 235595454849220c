use crate::container::event_code::{EventCode, RawTag, lenient_number, lenient_string};
use crate::container::one_or_many::one_or_many;
use crate::error::{HedError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Link chains longer than this are treated as malformed (or cyclic after
/// inlining).
const MAX_LEVEL_DEPTH: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub task_label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag: Option<RawTag>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default, deserialize_with = "lenient_string")]
    pub lab_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub in_session_number: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataRecording {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub data_recording_uuid: Option<String>,
    #[serde(default)]
    pub recording_parameter_set_label: Option<String>,
    #[serde(default)]
    pub start_date_time: Option<String>,
}

/// One `sessionTaskInfo` entry: a task run by one or more subjects, stored in
/// one or more recordings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, alias = "sessionNumber", deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(default)]
    pub task_label: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lab_id: Option<String>,
    #[serde(default, alias = "subjects", deserialize_with = "one_or_many")]
    pub subject: Vec<Subject>,
    #[serde(default, alias = "dataRecordings", deserialize_with = "one_or_many")]
    pub data_recording: Vec<DataRecording>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Modality {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sampling_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub start_channel: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub end_channel: Option<f64>,
}

impl Modality {
    /// Inclusive channel range width, if both ends are given.
    pub fn channel_count(&self) -> Option<usize> {
        match (self.start_channel, self.end_channel) {
            (Some(start), Some(end)) if end >= start => Some((end - start) as usize + 1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordingParameterSet {
    #[serde(default)]
    pub recording_parameter_set_label: Option<String>,
    #[serde(default, alias = "modalities", deserialize_with = "one_or_many")]
    pub modality: Vec<Modality>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Level1Study {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "studyShortDescription")]
    pub short_description: Option<String>,
    #[serde(default, alias = "studyDescription")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub event_codes: Vec<EventCode>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub tasks: Vec<Task>,
    #[serde(default, alias = "sessionTaskInfo", deserialize_with = "one_or_many")]
    pub sessions: Vec<Session>,
    #[serde(
        default,
        alias = "recordingParameterSet",
        deserialize_with = "one_or_many"
    )]
    pub recording_parameter_sets: Vec<RecordingParameterSet>,
}

impl Level1Study {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.event_codes.is_empty() && self.sessions.is_empty()
    }

    pub fn data_recording_count(&self) -> usize {
        self.sessions.iter().map(|s| s.data_recording.len()).sum()
    }

    /// Distinct modality types across all recording parameter sets, sorted.
    pub fn modality_kinds(&self) -> Vec<&str> {
        let kinds: std::collections::BTreeSet<&str> = self
            .recording_parameter_sets
            .iter()
            .flat_map(|set| &set.modality)
            .filter_map(|modality| modality.kind.as_deref())
            .collect();
        kinds.into_iter().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Level2Study {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub study_level2_files: Vec<Value>,
}

impl Level2Study {
    pub fn is_empty(&self) -> bool {
        self.study_level2_files.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStudy {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub parent_study: Option<Value>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub study_level_derived_files: Vec<Value>,
}

impl DerivedStudy {
    pub fn is_empty(&self) -> bool {
        self.study_level_derived_files.is_empty()
    }
}

/// One processing level of an ESS container.
#[derive(Debug, Clone, PartialEq)]
pub enum StudyLevel {
    Level1(Level1Study),
    Level2(Level2Study),
    LevelDerived(DerivedStudy),
}

impl StudyLevel {
    pub fn is_empty(&self) -> bool {
        match self {
            StudyLevel::Level1(study) => study.is_empty(),
            StudyLevel::Level2(study) => study.is_empty(),
            StudyLevel::LevelDerived(study) => study.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StudyLevel::Level1(_) => "level1",
            StudyLevel::Level2(_) => "level2",
            StudyLevel::LevelDerived(_) => "level-derived",
        }
    }
}

/// The levels of one container, Level 1 first, each later level built on the
/// one before it.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyLevelHierarchy {
    levels: Vec<StudyLevel>,
}

impl StudyLevelHierarchy {
    /// Walks the `parentStudyObj` / `studyLevel1` links of `document` down to
    /// the Level 1 study.
    pub fn resolve(document: &Value) -> Result<Self> {
        let mut levels = Vec::new();
        let mut current = document;

        for _ in 0..MAX_LEVEL_DEPTH {
            let object = current.as_object().ok_or_else(|| {
                HedError::InvalidContainer("study level is not a JSON object".to_string())
            })?;

            if object.contains_key("parentStudy") || object.contains_key("parentStudyObj") {
                trace!("Found level-derived study");
                levels.push(StudyLevel::LevelDerived(DerivedStudy::deserialize(current)?));
                current = object.get("parentStudyObj").ok_or_else(|| {
                    HedError::InvalidContainer(
                        "level-derived study has no inlined parentStudyObj".to_string(),
                    )
                })?;
            } else if let Some(parent) = object
                .get("studyLevel1")
                .or_else(|| object.get("level1StudyObj"))
            {
                trace!("Found level 2 study");
                levels.push(StudyLevel::Level2(Level2Study::deserialize(current)?));
                current = parent;
            } else if is_level1(object) {
                trace!("Found level 1 study");
                levels.push(StudyLevel::Level1(Level1Study::deserialize(current)?));
                levels.reverse();
                debug!(
                    "Resolved study levels: {:?}",
                    levels.iter().map(StudyLevel::kind).collect::<Vec<_>>()
                );
                return Ok(StudyLevelHierarchy { levels });
            } else {
                return Err(HedError::InvalidContainer(
                    "no level 1 study reachable from document".to_string(),
                ));
            }
        }

        Err(HedError::InvalidContainer(format!(
            "study level chain deeper than {}",
            MAX_LEVEL_DEPTH
        )))
    }

    pub fn levels(&self) -> &[StudyLevel] {
        &self.levels
    }

    pub fn level1(&self) -> Option<&Level1Study> {
        self.levels.iter().find_map(|level| match level {
            StudyLevel::Level1(study) => Some(study),
            _ => None,
        })
    }

    /// The last level that carries data; a container whose later levels are
    /// empty is reported as the level below them.
    pub fn highest_populated(&self) -> Option<&StudyLevel> {
        self.levels
            .iter()
            .rev()
            .find(|level| !level.is_empty())
            .or_else(|| self.levels.first())
    }
}

fn is_level1(object: &serde_json::Map<String, Value>) -> bool {
    ["eventSpecificationMethod", "eventSpecificiationMethod", "eventCodes"]
        .iter()
        .any(|key| object.contains_key(*key))
}
