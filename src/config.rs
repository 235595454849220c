use crate::parsers::hed::normalize_tag;

/// Free-text label and description tags are unique per event code and only
/// add noise to a treemap.
pub const DEFAULT_IGNORE_TAGS: [&str; 2] = ["Event/Label", "Event/Description"];

#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Tags whose whole branch is left out of the counts.
    pub ignore_tags: Vec<String>,
    /// `None` picks the scale from the count distribution.
    pub use_log_count: Option<bool>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            ignore_tags: DEFAULT_IGNORE_TAGS.iter().map(|t| t.to_string()).collect(),
            use_log_count: None,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore_tags = tags
            .into_iter()
            .map(|tag| normalize_tag(tag.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }

    pub fn with_use_log_count(mut self, use_log_count: Option<bool>) -> Self {
        self.use_log_count = use_log_count;
        self
    }

    /// Parses the binary's `scale` argument.
    pub fn parse_scale(value: &str) -> Option<Option<bool>> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(None),
            "log" => Some(Some(true)),
            "linear" => Some(Some(false)),
            _ => None,
        }
    }
}
