//! Parsing user-entered scale text and the editable scale field

use super::set::ScaleSet;
use crate::core::naming::{scale_from_label, scale_label};
use crate::domain::{ExportStructure, Scale};

/// Parse user text into a scale
///
/// Accepts platform labels (`hdpi`, `@2x`), an optional trailing `x` and any
/// float. The result is rounded to two decimals and must be positive.
///
/// # Examples
///
/// ```
/// use webp_exporter::core::scales::parse_scale_input;
/// use webp_exporter::domain::Scale;
///
/// assert_eq!(parse_scale_input("1.5x").unwrap(), Scale::new(1.5).unwrap());
/// assert_eq!(parse_scale_input("xhdpi").unwrap(), Scale::whole(2));
/// assert!(parse_scale_input("-2").is_err());
/// ```
pub fn parse_scale_input(text: &str) -> Result<Scale, String> {
    let trimmed = text.trim();
    if let Some(scale) = scale_from_label(trimmed) {
        return Ok(scale);
    }

    let lowered = trimmed.to_lowercase();
    let numeric = lowered.strip_suffix('x').unwrap_or(&lowered).trim();
    let value: f64 = numeric
        .parse()
        .map_err(|_| format!("'{text}' is not a valid scale"))?;
    Scale::new(value)
}

/// Text field bound to one member of a [`ScaleSet`]
///
/// The draft can hold anything the user types. Submitting either commits a
/// valid, non-colliding scale or reverts the draft to the last valid value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleField {
    value: Scale,
    draft: String,
}

impl ScaleField {
    pub fn new(value: Scale) -> Self {
        Self {
            value,
            draft: value.label(),
        }
    }

    /// Last committed scale
    pub fn value(&self) -> Scale {
        self.value
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Commit the draft into `set`
    ///
    /// Returns `true` if the field now holds the parsed value.
    pub fn submit(&mut self, set: &mut ScaleSet) -> bool {
        let parsed = match parse_scale_input(&self.draft) {
            Ok(scale) => scale,
            Err(reason) => {
                tracing::debug!(draft = %self.draft, reason = %reason, "Reverting scale input");
                self.revert();
                return false;
            }
        };

        if parsed != self.value && !set.rename(self.value, parsed) {
            self.revert();
            return false;
        }

        self.value = parsed;
        self.draft = parsed.label();
        true
    }

    fn revert(&mut self) {
        self.draft = self.value.label();
    }

    /// Text to show for the structure: platform label unless mid-edit
    pub fn display(&self, structure: ExportStructure) -> String {
        if self.draft == self.value.label() {
            scale_label(structure, self.value)
        } else {
            self.draft.clone()
        }
    }

    /// Warning shown when the structure will skip this scale
    pub fn warning(&self, structure: ExportStructure) -> Option<String> {
        if structure.supports(self.value) {
            None
        } else {
            Some(format!(
                "Scale not supported on {}; will be ignored",
                structure.platform_name()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn s(value: f64) -> Scale {
        Scale::new(value).unwrap()
    }

    #[test_case("2", 2.0 ; "bare integer")]
    #[test_case("2x", 2.0 ; "trailing x")]
    #[test_case(" 1.5X ", 1.5 ; "uppercase x with spaces")]
    #[test_case("0.333", 0.33 ; "rounded")]
    #[test_case("hdpi", 1.5 ; "android label")]
    #[test_case("xxxhdpi", 4.0 ; "android xxxhdpi")]
    #[test_case("@2x", 2.0 ; "ios label")]
    #[test_case("@1x", 1.0 ; "ios one")]
    fn test_parse_valid(input: &str, expected: f64) {
        assert_eq!(parse_scale_input(input).unwrap(), s(expected));
    }

    #[test_case("" ; "empty")]
    #[test_case("abc" ; "letters")]
    #[test_case("0" ; "zero")]
    #[test_case("-1.5x" ; "negative")]
    #[test_case("0.001" ; "rounds to zero")]
    #[test_case("2xx" ; "double suffix")]
    fn test_parse_invalid(input: &str) {
        assert!(parse_scale_input(input).is_err());
    }

    #[test]
    fn test_field_commits_valid_rename() {
        let mut set: ScaleSet = vec![s(1.0), s(2.0)].into();
        let mut field = ScaleField::new(s(2.0));
        field.set_draft("xxhdpi");
        assert!(field.submit(&mut set));
        assert_eq!(field.value(), s(3.0));
        assert_eq!(field.draft(), "3x");
        assert_eq!(set.as_slice(), &[s(1.0), s(3.0)]);
    }

    #[test]
    fn test_field_reverts_invalid_input() {
        let mut set: ScaleSet = vec![s(1.0), s(2.0)].into();
        let mut field = ScaleField::new(s(2.0));
        field.set_draft("nope");
        assert!(!field.submit(&mut set));
        assert_eq!(field.draft(), "2x");
        assert_eq!(set.as_slice(), &[s(1.0), s(2.0)]);
    }

    #[test]
    fn test_field_reverts_on_collision() {
        let mut set: ScaleSet = vec![s(1.0), s(2.0)].into();
        let mut field = ScaleField::new(s(2.0));
        field.set_draft("1x");
        assert!(!field.submit(&mut set));
        assert_eq!(field.value(), s(2.0));
        assert_eq!(field.draft(), "2x");
        assert_eq!(set.as_slice(), &[s(1.0), s(2.0)]);
    }

    #[test]
    fn test_field_resubmitting_same_value_is_accepted() {
        let mut set: ScaleSet = vec![s(2.0)].into();
        let mut field = ScaleField::new(s(2.0));
        field.set_draft("2.00");
        assert!(field.submit(&mut set));
        assert_eq!(field.draft(), "2x");
    }

    #[test]
    fn test_field_display_and_warning() {
        let field = ScaleField::new(s(1.5));
        assert_eq!(field.display(ExportStructure::Android), "hdpi");
        assert_eq!(field.display(ExportStructure::Web), "1.5x");
        assert_eq!(field.warning(ExportStructure::Android), None);
        assert_eq!(
            field.warning(ExportStructure::Ios).as_deref(),
            Some("Scale not supported on iOS; will be ignored")
        );

        let mut editing = ScaleField::new(s(1.5));
        editing.set_draft("2.");
        assert_eq!(editing.display(ExportStructure::Android), "2.");
    }
}
