use serde::{Deserialize, Serialize};

/// Aggregated occurrences of one tag across every record naming it or one of
/// its descendants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub count: f64,
    pub log_count: f64,
}

impl TagCount {
    pub fn new() -> Self {
        TagCount {
            count: 0.0,
            log_count: 0.0,
        }
    }

    /// Adds one record's contribution. Callers only pass positive, finite
    /// instance counts, so `ln` is always defined.
    pub fn add_instances(&mut self, number_of_instances: f64) {
        self.count += number_of_instances;
        self.log_count += number_of_instances.ln();
    }

    pub fn with_instances(mut self, number_of_instances: f64) -> Self {
        self.add_instances(number_of_instances);
        self
    }
}
