pub mod aggregator;
pub mod assembler;
pub mod processor;

pub use aggregator::{aggregate_tag_counts, collect_record_tags};
pub use assembler::{convert_to_hierarchy, median, should_use_log_count};
pub use processor::{BatchSummary, process_containers_parallel};
