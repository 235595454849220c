use crate::config::BuildOptions;
use crate::container::{EventCode, RawTag};
use crate::error::{HedError, Result};
use crate::parsers::hed::{
    ancestor_chain_inclusive, is_ignored_by, normalize_tag, split_compound_tag,
};
use crate::tag_tree::TagCountMap;
use log::{debug, info, trace};
use std::collections::BTreeSet;

/// Builds the tag count map for one batch of event-code records.
///
/// Every tag named by a record, and every ancestor of those tags, receives the
/// record's `numberOfInstances` exactly once. Records without a positive
/// instance count are skipped; a countable record without a string tag fails
/// the whole batch and no map is returned.
pub fn aggregate_tag_counts(records: &[EventCode], options: &BuildOptions) -> Result<TagCountMap> {
    info!("Aggregating tag counts over {} event codes", records.len());
    let mut tag_counts = TagCountMap::new();
    let mut skipped = 0usize;

    for (index, record) in records.iter().enumerate() {
        let Some(number_of_instances) = record.countable_instances() else {
            trace!(
                "Skipping event code {:?}: no positive number of instances",
                record.code
            );
            skipped += 1;
            continue;
        };

        let raw_tag = match &record.tag {
            Some(RawTag::Text(tag)) => tag.as_str(),
            Some(RawTag::Other(_)) => {
                return Err(HedError::MalformedTag {
                    index,
                    code: record.code.clone(),
                });
            }
            None => {
                return Err(HedError::MissingTag {
                    index,
                    code: record.code.clone(),
                });
            }
        };

        let record_tags = collect_record_tags(raw_tag, &options.ignore_tags);
        if record_tags.is_empty() {
            debug!(
                "Event code {:?} has no countable tags after filtering",
                record.code
            );
            continue;
        }

        for tag in &record_tags {
            trace!("Adding {} instances to {}", number_of_instances, tag);
            tag_counts.add_contribution(tag, number_of_instances);
        }
    }

    info!(
        "Aggregated {} distinct tags ({} event codes skipped)",
        tag_counts.tag_count(),
        skipped
    );

    Ok(tag_counts)
}

/// The deduplicated set of tags and ancestors one compound tag string
/// contributes to.
pub fn collect_record_tags(raw_tag: &str, ignore_tags: &[String]) -> BTreeSet<String> {
    let mut record_tags = BTreeSet::new();

    for piece in split_compound_tag(raw_tag) {
        let tag = normalize_tag(&piece);
        if tag.is_empty() {
            continue;
        }

        if ignore_tags.iter().any(|ignored| is_ignored_by(&tag, ignored)) {
            trace!("Ignoring tag {}", tag);
            continue;
        }

        record_tags.extend(ancestor_chain_inclusive(&tag));
    }

    record_tags
}
