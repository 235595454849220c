//! HED tag string handling: splitting compound tag expressions, normalizing
//! individual tags and enumerating their ancestors.

/// Splits a raw compound HED string into its individual tag expressions.
///
/// Parentheses are dropped (every `(` and `)`, not just matching pairs), `~`
/// joins become plain `,` separators and legacy `\` separators become `/`.
/// Whitespace around each piece is left for [`normalize_tag`] to trim.
pub fn split_compound_tag(raw: &str) -> Vec<String> {
    let flattened = raw
        .trim()
        .replace(['(', ')'], "")
        .replace('~', ",")
        .replace('\\', "/");

    flattened.split(',').map(str::to_string).collect()
}

/// Canonical form of a single tag: trimmed, `/` separators only, and at most
/// one leading and one trailing slash removed. Case is preserved.
pub fn normalize_tag(raw: &str) -> String {
    let trimmed = raw.trim().replace('\\', "/");
    let without_leading = trimmed.strip_prefix('/').unwrap_or(&trimmed);
    let normalized = without_leading
        .strip_suffix('/')
        .unwrap_or(without_leading);

    normalized.to_string()
}

/// Every prefix of `tag` ending just before a `/`, followed by `tag` itself,
/// ordered from the topmost ancestor to the tag.
///
/// `"Event/Category/Experimental stimulus"` yields
/// `["Event", "Event/Category", "Event/Category/Experimental stimulus"]`.
/// Empty prefixes (from doubled separators) are not tags and are left out.
pub fn ancestor_chain_inclusive(tag: &str) -> Vec<String> {
    let mut chain: Vec<String> = tag
        .match_indices('/')
        .map(|(i, _)| &tag[..i])
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string)
        .collect();

    if !tag.is_empty() {
        chain.push(tag.to_string());
    }

    chain
}

/// True if `candidate` lies anywhere below `parent` in the hierarchy.
/// A tag is not its own child.
pub fn is_tag_child(parent: &str, candidate: &str) -> bool {
    candidate.len() > parent.len()
        && candidate.starts_with(parent)
        && candidate.as_bytes()[parent.len()] == b'/'
}

/// True if `candidate` is exactly one level below `parent`.
pub fn is_tag_immediate_child(parent: &str, candidate: &str) -> bool {
    is_tag_child(parent, candidate) && !candidate[parent.len() + 1..].contains('/')
}

/// True if `tag` is `ignored` itself or anything underneath it.
pub fn is_ignored_by(tag: &str, ignored: &str) -> bool {
    tag == ignored || is_tag_child(ignored, tag)
}
