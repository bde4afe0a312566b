//! Per-structure file naming rules
//!
//! Each rule maps a scale and a sanitized base name to the path of the exported
//! file, without extension. Android and iOS only know a fixed set of scales;
//! anything else yields `None` and the caller drops that entry.

use crate::domain::{ExportStructure, Scale};

/// Android density buckets keyed by scale in hundredths
const ANDROID_BUCKETS: [(i64, &str); 5] = [
    (100, "mdpi"),
    (150, "hdpi"),
    (200, "xhdpi"),
    (300, "xxhdpi"),
    (400, "xxxhdpi"),
];

/// iOS file suffixes keyed by scale in hundredths
const IOS_SUFFIXES: [(i64, &str); 3] = [(100, ""), (200, "@2x"), (300, "@3x")];

/// Android density bucket for a scale, e.g. `xhdpi` for 2
pub fn android_bucket(scale: Scale) -> Option<&'static str> {
    ANDROID_BUCKETS
        .iter()
        .find(|(hundredths, _)| *hundredths == scale.hundredths())
        .map(|(_, bucket)| *bucket)
}

/// iOS file suffix for a scale, e.g. `@2x` for 2 and the empty string for 1
pub fn ios_suffix(scale: Scale) -> Option<&'static str> {
    IOS_SUFFIXES
        .iter()
        .find(|(hundredths, _)| *hundredths == scale.hundredths())
        .map(|(_, suffix)| *suffix)
}

/// Derive the output path (without extension) for one exported file
///
/// # Arguments
///
/// * `structure` - Export structure selecting the rule
/// * `scale` - Scale the file was rendered at
/// * `base_name` - Sanitized node name
/// * `separator` - Naming convention separator (web and flat only)
///
/// # Returns
///
/// `None` if the structure does not support the scale.
///
/// # Examples
///
/// ```
/// use webp_exporter::core::naming::name_for;
/// use webp_exporter::domain::{ExportStructure, Scale};
///
/// let scale = Scale::new(1.5).unwrap();
/// assert_eq!(
///     name_for(ExportStructure::Android, scale, "icon", "_").as_deref(),
///     Some("drawable-hdpi/icon")
/// );
/// assert_eq!(
///     name_for(ExportStructure::Web, scale, "icon", "-").as_deref(),
///     Some("icon/icon-1_5x")
/// );
/// assert_eq!(name_for(ExportStructure::Ios, scale, "icon", "_"), None);
/// ```
pub fn name_for(
    structure: ExportStructure,
    scale: Scale,
    base_name: &str,
    separator: &str,
) -> Option<String> {
    match structure {
        ExportStructure::Android => {
            android_bucket(scale).map(|bucket| format!("drawable-{bucket}/{base_name}"))
        }
        ExportStructure::Ios => {
            ios_suffix(scale).map(|suffix| format!("{base_name}/{base_name}{suffix}"))
        }
        ExportStructure::Web => Some(format!(
            "{base_name}/{base_name}{separator}{}",
            scale.file_token()
        )),
        ExportStructure::Flat => Some(format!("{base_name}{separator}{}", scale.file_token())),
    }
}

impl ExportStructure {
    /// Whether files at this scale are produced for the structure
    pub fn supports(&self, scale: Scale) -> bool {
        match self {
            ExportStructure::Android => android_bucket(scale).is_some(),
            ExportStructure::Ios => ios_suffix(scale).is_some(),
            ExportStructure::Web | ExportStructure::Flat => true,
        }
    }

    /// Scales with a platform-specific name, empty when every scale is accepted
    pub fn known_scales(&self) -> Vec<Scale> {
        let table: &[(i64, &str)] = match self {
            ExportStructure::Android => &ANDROID_BUCKETS,
            ExportStructure::Ios => &IOS_SUFFIXES,
            ExportStructure::Web | ExportStructure::Flat => &[],
        };
        table
            .iter()
            .filter_map(|(hundredths, _)| Scale::new(*hundredths as f64 / 100.0).ok())
            .collect()
    }
}

/// Label shown next to a scale for the given structure
///
/// Android shows the density bucket, iOS the `@Nx` form, everything else `Nx`.
pub fn scale_label(structure: ExportStructure, scale: Scale) -> String {
    match structure {
        ExportStructure::Android => android_bucket(scale)
            .map(str::to_string)
            .unwrap_or_else(|| scale.label()),
        ExportStructure::Ios if ios_suffix(scale).is_some() => format!("@{}", scale.label()),
        _ => scale.label(),
    }
}

/// Reverse lookup of a platform label (`hdpi`, `@2x`) to its scale
pub fn scale_from_label(label: &str) -> Option<Scale> {
    let label = label.trim();
    if let Some((hundredths, _)) = ANDROID_BUCKETS.iter().find(|(_, b)| *b == label) {
        return Scale::new(*hundredths as f64 / 100.0).ok();
    }
    IOS_SUFFIXES
        .iter()
        .find(|(hundredths, _)| format!("@{}x", hundredths / 100) == label)
        .and_then(|(hundredths, _)| Scale::new(*hundredths as f64 / 100.0).ok())
}
