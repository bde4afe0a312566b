//! Layer name sanitization

use crate::domain::{NamingConvention, NamingTransform};
use regex::{NoExpand, Regex};
use std::sync::OnceLock;

/// Upper bound on a sanitized name, in characters
pub const MAX_NAME_LENGTH: usize = 200;

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("static pattern is valid"))
}

/// Normalize a raw layer name into a file-safe token
///
/// Runs of characters outside `[A-Za-z0-9]` become the convention's separator
/// unless the transform preserves names as written. The result is lowercased
/// for [`NamingTransform::Lowercase`] and capped at [`MAX_NAME_LENGTH`] chars.
///
/// # Examples
///
/// ```
/// use webp_exporter::core::naming::sanitize;
/// use webp_exporter::domain::NamingConvention;
///
/// assert_eq!(sanitize("My Frame!!2", &NamingConvention::default()), "my_frame_2");
/// ```
pub fn sanitize(raw_name: &str, convention: &NamingConvention) -> String {
    let name = match convention.transform {
        NamingTransform::Preserve => raw_name.to_string(),
        NamingTransform::Lowercase | NamingTransform::CaseSensitive => separator_runs()
            .replace_all(raw_name, NoExpand(&convention.replacement))
            .into_owned(),
    };

    let name = if convention.transform == NamingTransform::Lowercase {
        name.to_lowercase()
    } else {
        name
    };

    name.chars().take(MAX_NAME_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn convention(transform: NamingTransform, replacement: &str) -> NamingConvention {
        NamingConvention {
            transform,
            replacement: replacement.to_string(),
        }
    }

    #[test_case("My Frame!!2", NamingTransform::Lowercase, "_", "my_frame_2" ; "lowercase")]
    #[test_case("My Frame!!2", NamingTransform::CaseSensitive, "-", "My-Frame-2" ; "case sensitive")]
    #[test_case("My Frame!!2", NamingTransform::Preserve, "_", "My Frame!!2" ; "preserve")]
    #[test_case("  Icon / Home  ", NamingTransform::Lowercase, "_", "_icon_home_" ; "edges")]
    #[test_case("a$b", NamingTransform::Lowercase, "$1", "a$1b" ; "literal replacement")]
    #[test_case("Über Icon", NamingTransform::Lowercase, "_", "_ber_icon" ; "non ascii")]
    fn test_sanitize(raw: &str, transform: NamingTransform, replacement: &str, expected: &str) {
        assert_eq!(sanitize(raw, &convention(transform, replacement)), expected);
    }

    #[test]
    fn test_sanitize_empty_separator() {
        let result = sanitize("Button / Primary", &convention(NamingTransform::Lowercase, ""));
        assert_eq!(result, "buttonprimary");
    }

    #[test]
    fn test_sanitize_is_idempotent_under_lowercase() {
        let conv = NamingConvention::default();
        for raw in ["My Frame!!2", "__A__b__", "日本語 frame", "", "x".repeat(300).as_str()] {
            let once = sanitize(raw, &conv);
            assert_eq!(sanitize(&once, &conv), once, "input: {raw}");
        }
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "Ab ".repeat(500);
        for transform in [
            NamingTransform::Preserve,
            NamingTransform::Lowercase,
            NamingTransform::CaseSensitive,
        ] {
            let result = sanitize(&long, &convention(transform, "___"));
            assert!(result.chars().count() <= MAX_NAME_LENGTH);
        }
    }

    #[test]
    fn test_sanitize_caps_by_characters_not_bytes() {
        let long = "é".repeat(250);
        let result = sanitize(&long, &convention(NamingTransform::Preserve, "_"));
        assert_eq!(result.chars().count(), MAX_NAME_LENGTH);
    }
}
