use crate::tag_tree::{HierarchyNode, TagCountMap};
use log::{debug, info};

/// A single dominant tag above this multiple of the median count switches
/// the treemap to log sizes.
const LOG_SCALE_RATIO: f64 = 10.0;

/// Median of `values`; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let half = sorted.len() / 2;

    if sorted.len() % 2 == 1 {
        Some(sorted[half])
    } else {
        Some((sorted[half - 1] + sorted[half]) / 2.0)
    }
}

/// True when the largest count exceeds ten times the median count.
pub fn should_use_log_count(counts: &[f64]) -> bool {
    let Some(median) = median(counts) else {
        return false;
    };
    let max = counts.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    max > LOG_SCALE_RATIO * median
}

/// Builds the `"HED"`-rooted hierarchy. The scale is decided once for the
/// whole tree unless `use_log_count` is given.
pub fn convert_to_hierarchy(tag_counts: &TagCountMap, use_log_count: Option<bool>) -> HierarchyNode {
    let use_log_count =
        use_log_count.unwrap_or_else(|| should_use_log_count(&tag_counts.counts()));
    info!(
        "Assembling hierarchy of {} tags using {} sizes",
        tag_counts.tag_count(),
        if use_log_count { "log" } else { "linear" }
    );

    let topmost = tag_counts.find_topmost_tags();
    debug!("Found {} topmost tags", topmost.len());

    let children = topmost
        .into_iter()
        .map(|tag| build_node(tag, tag_counts, use_log_count))
        .collect();

    HierarchyNode::root().with_children(children)
}

fn build_node(tag: &str, tag_counts: &TagCountMap, use_log_count: bool) -> HierarchyNode {
    let count = tag_counts.get(tag).copied().unwrap_or_default();
    let size = if use_log_count {
        count.log_count
    } else {
        count.count
    };

    let children = tag_counts
        .find_immediate_children(tag)
        .into_iter()
        .map(|child| build_node(child, tag_counts, use_log_count))
        .collect();

    HierarchyNode::new(tag, count.count, size).with_children(children)
}
