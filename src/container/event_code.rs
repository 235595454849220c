use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of an ESS `eventCodes` table. Only `tag` and
/// `numberOfInstances` feed the tag hierarchy; the rest is carried along for
/// logging and error messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventCode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default)]
    pub task_label: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag: Option<RawTag>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub number_of_instances: Option<f64>,
}

/// The `tag` column as written. Non-string values are kept rather than
/// rejected so a record without instances never fails the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawTag {
    Text(String),
    Other(Value),
}

impl RawTag {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawTag::Text(tag) => Some(tag),
            RawTag::Other(_) => None,
        }
    }
}

impl EventCode {
    pub fn new(tag: &str, number_of_instances: f64) -> Self {
        EventCode {
            tag: Some(RawTag::Text(tag.to_string())),
            number_of_instances: Some(number_of_instances),
            ..EventCode::default()
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn tag_text(&self) -> Option<&str> {
        self.tag.as_ref().and_then(RawTag::as_text)
    }

    /// The instance count if it can contribute to aggregation: present,
    /// finite and strictly positive.
    pub fn countable_instances(&self) -> Option<f64> {
        self.number_of_instances
            .filter(|n| n.is_finite() && *n > 0.0)
    }
}

/// Event codes are written as either `"1"` or `1` depending on the exporter.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a number or a numeric string; placeholders such as `"NA"` decode
/// to `None` and are later skipped like any other uncountable record.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    })
}
