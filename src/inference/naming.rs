/// Appended to the derived name of a list's element composite.
pub const ELEMENT_SUFFIX: &str = "Elem";

/// Blank means nothing is left once control characters and ASCII spaces
/// (every code point up to U+0020) are stripped. Other Unicode whitespace
/// such as U+00A0 counts as content.
pub fn is_blank(s: &str) -> bool {
    s.trim_matches(|c: char| c <= ' ').is_empty()
}

/// Upper-case the first character, keep the rest unchanged.
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `address` → `Address`
pub fn composite_name(key: &str) -> String {
    capitalize(key)
}

/// `items` → `ItemsElem`
pub fn element_name(key: &str) -> String {
    format!("{}{ELEMENT_SUFFIX}", capitalize(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names() {
        assert_eq!(composite_name("address"), "Address");
        assert_eq!(composite_name("homeAddress"), "HomeAddress");
        assert_eq!(composite_name("Already"), "Already");
        assert_eq!(composite_name("x"), "X");
        assert_eq!(composite_name("_meta"), "_meta");
        assert_eq!(composite_name("élan"), "Élan");
        assert_eq!(element_name("items"), "ItemsElem");
        assert_eq!(element_name("ß"), "SSElem");
    }

    #[test]
    fn blank_is_control_and_ascii_space_only() {
        for s in ["", " ", "\t\n", "\u{1}", " \u{0} \u{1f}"] {
            assert!(is_blank(s), "{s:?}");
        }
        for s in ["\u{a0}", "\u{2003}", " x ", "\u{7f}"] {
            assert!(!is_blank(s), "{s:?}");
        }
    }
}
