mod hierarchy_node;
mod tag_count;

pub use hierarchy_node::{HierarchyNode, ROOT_NAME};
pub use tag_count::TagCount;

use crate::parsers::hed::is_tag_immediate_child;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Tag string to aggregated counts. Keys are kept sorted so child lookups are
/// range scans and every traversal is deterministic.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct TagCountMap {
    counts: BTreeMap<String, TagCount>,
}

impl TagCountMap {
    pub fn new() -> Self {
        TagCountMap {
            counts: BTreeMap::new(),
        }
    }

    pub fn add_contribution(&mut self, tag: &str, number_of_instances: f64) {
        match self.counts.get_mut(tag) {
            Some(entry) => entry.add_instances(number_of_instances),
            None => {
                self.counts.insert(
                    tag.to_string(),
                    TagCount::new().with_instances(number_of_instances),
                );
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<&TagCount> {
        self.counts.get(tag)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagCount)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), count))
    }

    pub fn counts(&self) -> Vec<f64> {
        self.counts.values().map(|c| c.count).collect()
    }

    pub fn tag_count(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tags exactly one level below `tag`, in sorted order.
    pub fn find_immediate_children(&self, tag: &str) -> Vec<&str> {
        let prefix = format!("{}/", tag);
        self.counts
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .map(|(candidate, _)| candidate.as_str())
            .take_while(|candidate| candidate.starts_with(&prefix))
            .filter(|candidate| is_tag_immediate_child(tag, candidate))
            .collect()
    }

    pub fn has_parent(&self, tag: &str) -> bool {
        tag.match_indices('/')
            .any(|(i, _)| self.counts.contains_key(&tag[..i]))
    }

    /// Tags with no ancestor in the map, in sorted order.
    pub fn find_topmost_tags(&self) -> Vec<&str> {
        self.all_tags().filter(|tag| !self.has_parent(tag)).collect()
    }
}
