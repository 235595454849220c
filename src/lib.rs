pub mod aggregation;
pub mod config;
pub mod container;
pub mod error;
pub mod parsers;
pub mod tag_tree;
pub mod utils;

pub use config::BuildOptions;
pub use container::{EssDocument, EventCode};
pub use error::{HedError, Result};
pub use tag_tree::{HierarchyNode, TagCount, TagCountMap};

use log::{debug, info};
use std::path::Path;

/// Builds the treemap hierarchy for one batch of event codes.
///
/// Pure: nothing is read or written, and a failed build returns no partial
/// result.
pub fn build_tag_hierarchy(records: &[EventCode], options: &BuildOptions) -> Result<HierarchyNode> {
    let tag_counts = aggregation::aggregate_tag_counts(records, options)?;
    Ok(aggregation::convert_to_hierarchy(
        &tag_counts,
        options.use_log_count,
    ))
}

pub fn analyze_container(
    input_path: &Path,
    output_path: &Path,
    options: &BuildOptions,
) -> Result<HierarchyNode> {
    info!("Starting HED tag analysis");
    debug!("Input path: {:?}, Output path: {:?}", input_path, output_path);

    let document = utils::io::read_document(input_path)?;
    if let Some(title) = document.title() {
        info!("Study: {}", title);
    }
    if let Some(level) = document.highest_level() {
        info!("Highest populated study level: {}", level.kind());
    }
    if let Some(study) = document.level1() {
        debug!(
            "{} sessions, {} data recordings, modalities {:?}",
            study.sessions.len(),
            study.data_recording_count(),
            study.modality_kinds()
        );
    }

    info!(
        "Building tag hierarchy from {} event codes",
        document.event_codes().len()
    );
    let tree = build_tag_hierarchy(document.event_codes(), options)?;

    info!("Exporting hierarchy to JSON at {:?}", output_path);
    utils::io::export_hierarchy_to_json(&tree, output_path)?;

    info!(
        "Analysis complete: {} tag nodes under {}",
        tree.descendant_count(),
        tree.name
    );

    Ok(tree)
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
