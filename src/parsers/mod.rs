pub mod common;
pub mod hed;

pub use common::{is_script_input, is_supported_input};
pub use hed::{ancestor_chain_inclusive, normalize_tag, split_compound_tag};
