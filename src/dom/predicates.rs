//! Shared element classification predicates.

/// Elements that never have children or an end tag.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Inline elements that only carry presentation and can be split, merged or
/// flattened without changing document structure.
///
/// Links, block containers and embedded content are not formatting: clearing
/// formatting keeps them.
pub fn is_formatting_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "b" | "strong"
            | "i"
            | "em"
            | "u"
            | "s"
            | "strike"
            | "del"
            | "ins"
            | "mark"
            | "small"
            | "big"
            | "sub"
            | "sup"
            | "span"
            | "font"
            | "code"
            | "tt"
    )
}

/// A usable element name: ASCII letters first, then letters, digits or `-`.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
