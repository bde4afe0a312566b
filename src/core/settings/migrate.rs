//! Settings schema migration
//!
//! Persisted settings grew one field at a time and never carried a version
//! tag, so the version of a record is implied by which fields it has. The
//! migrator is an ordered table of [`MigrationStep`]s. Each step is guarded
//! by the absence of the field(s) it writes and may read fields that earlier
//! steps guarantee, so running the table over its own output changes nothing.
//!
//! | # | step                 | reads                                  | writes                   |
//! |---|----------------------|----------------------------------------|--------------------------|
//! | 1 | android-flag         |                                        | `useAndroidExport`       |
//! | 2 | legacy-scale-flags   | `useAndroidExport`                     | `selectedExportScales`   |
//! | 3 | optimized-size-flag  |                                        | `useOptimizedSize`       |
//! | 4 | naming-convention    |                                        | `namingConvention`       |
//! | 5 | export-quality       | `useOptimizedSize`                     | `exportQuality`          |
//! | 6 | export-structure     | `useAndroidExport`                     | `exportStructure`        |
//! | 7 | scale-set            | `selectedExportScales`                 | `selectedExportScalesV2` |
//! | 8 | window-size          |                                        | `pluginWindowSize`       |
//!
//! Steps 2, 5, 6 and 7 derive new fields from legacy ones and must stay ahead
//! of anything that would default those legacy fields away.

use super::schema::{ExportQuality, PartialSettings, Settings, WindowSize};
use crate::core::scales::ScaleSet;
use crate::domain::{ExportStructure, NamingConvention, Scale};
use std::fmt;

/// Quality used when the optimized-size flag is on
pub const OPTIMIZED_QUALITY: i64 = 90;

/// Quality used when the optimized-size flag is off
pub const FULL_QUALITY: i64 = 100;

/// One transition in the settings schema history
pub struct MigrationStep {
    /// Short identifier used in logs
    pub name: &'static str,

    /// Persisted fields the step derives its value from
    pub reads: &'static [&'static str],

    /// Persisted fields the step fills in
    pub writes: &'static [&'static str],

    is_applied: fn(&PartialSettings) -> bool,
    apply: fn(&mut PartialSettings),
}

impl MigrationStep {
    /// Whether the record already contains what this step writes
    pub fn is_applied(&self, record: &PartialSettings) -> bool {
        (self.is_applied)(record)
    }

    fn run(&self, record: &mut PartialSettings) -> bool {
        if self.is_applied(record) {
            return false;
        }
        (self.apply)(record);
        true
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("name", &self.name)
            .field("reads", &self.reads)
            .field("writes", &self.writes)
            .finish()
    }
}

/// Legacy per-scale flags: every historical scale, 1.5 only for Android
fn legacy_scale_flags(use_android_export: bool) -> Vec<(Scale, bool)> {
    [(1.0, true), (1.5, use_android_export), (2.0, true), (3.0, true), (4.0, true)]
        .into_iter()
        .filter_map(|(value, enabled)| Scale::new(value).ok().map(|scale| (scale, enabled)))
        .collect()
}

fn enabled_scales(flags: &[(Scale, bool)]) -> ScaleSet {
    flags
        .iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(scale, _)| *scale)
        .collect()
}

/// Number of transitions in the schema history
pub const STEP_COUNT: usize = 8;

/// The schema history, oldest transition first
pub static STEPS: [MigrationStep; STEP_COUNT] = [
    MigrationStep {
        name: "android-flag",
        reads: &[],
        writes: &["useAndroidExport"],
        is_applied: |r| r.use_android_export.is_some(),
        apply: |r| r.use_android_export = Some(false),
    },
    MigrationStep {
        name: "legacy-scale-flags",
        reads: &["useAndroidExport"],
        writes: &["selectedExportScales"],
        is_applied: |r| r.selected_export_scales.is_some(),
        apply: |r| {
            r.selected_export_scales =
                Some(legacy_scale_flags(r.use_android_export.unwrap_or(false)))
        },
    },
    MigrationStep {
        name: "optimized-size-flag",
        reads: &[],
        writes: &["useOptimizedSize"],
        is_applied: |r| r.use_optimized_size.is_some(),
        apply: |r| r.use_optimized_size = Some(true),
    },
    MigrationStep {
        name: "naming-convention",
        reads: &[],
        writes: &["namingConvention"],
        is_applied: |r| r.naming_convention.is_some(),
        apply: |r| r.naming_convention = Some(NamingConvention::default()),
    },
    MigrationStep {
        name: "export-quality",
        reads: &["useOptimizedSize"],
        writes: &["exportQuality"],
        is_applied: |r| r.export_quality.is_some(),
        apply: |r| {
            r.export_quality = Some(if r.use_optimized_size.unwrap_or(true) {
                OPTIMIZED_QUALITY
            } else {
                FULL_QUALITY
            })
        },
    },
    MigrationStep {
        name: "export-structure",
        reads: &["useAndroidExport"],
        writes: &["exportStructure"],
        is_applied: |r| r.export_structure.is_some(),
        apply: |r| {
            r.export_structure = Some(if r.use_android_export.unwrap_or(false) {
                ExportStructure::Android
            } else {
                ExportStructure::Web
            })
        },
    },
    MigrationStep {
        name: "scale-set",
        reads: &["selectedExportScales"],
        writes: &["selectedExportScalesV2"],
        is_applied: |r| r.selected_export_scales_v2.is_some(),
        apply: |r| {
            r.selected_export_scales_v2 = Some(
                r.selected_export_scales
                    .as_deref()
                    .map(enabled_scales)
                    .unwrap_or_default(),
            )
        },
    },
    MigrationStep {
        name: "window-size",
        reads: &[],
        writes: &["pluginWindowSize"],
        is_applied: |r| r.plugin_window_size.is_some(),
        apply: |r| r.plugin_window_size = Some(WindowSize::default()),
    },
];

/// Schema version implied by a record's fields
///
/// The number of leading steps that had already been applied. Steps are
/// still checked individually, since hand-edited or partially written records
/// can have gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaVersion(pub usize);

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion(STEP_COUNT);

    pub fn detect(record: &PartialSettings) -> Self {
        Self(STEPS.iter().take_while(|step| step.is_applied(record)).count())
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Upgrade a persisted record to the current settings shape
///
/// Total: absent input migrates from the empty record. Running it on its own
/// output is a no-op.
///
/// # Examples
///
/// ```
/// use webp_exporter::core::settings::migrate;
/// use webp_exporter::domain::ExportStructure;
///
/// let settings = migrate(None);
/// assert_eq!(settings.export_structure, ExportStructure::Web);
/// assert_eq!(settings.export_quality.percent(), 90);
/// assert_eq!(settings.scales().len(), 4);
/// ```
pub fn migrate(persisted: Option<PartialSettings>) -> Settings {
    let mut record = persisted.unwrap_or_default();
    let version = SchemaVersion::detect(&record);

    let applied: Vec<&str> = STEPS
        .iter()
        .filter_map(|step| step.run(&mut record).then_some(step.name))
        .collect();

    if !applied.is_empty() {
        tracing::info!(
            from_version = %version,
            to_version = %SchemaVersion::CURRENT,
            steps = ?applied,
            "Migrated settings"
        );
    }

    complete(record)
}

/// Upgrade a raw JSON value read from the store
///
/// Fields that do not fit are migrated as if absent and the rest are kept.
/// A value that is not an object at all is treated like a missing record.
pub fn migrate_value(value: Option<serde_json::Value>) -> Settings {
    let partial = value.and_then(|v| match serde_json::from_value::<PartialSettings>(v) {
        Ok(partial) => Some(partial),
        Err(e) => {
            tracing::warn!(error = %e, "Stored settings are unreadable, using defaults");
            None
        }
    });
    migrate(partial)
}

/// Seal a fully migrated record
fn complete(record: PartialSettings) -> Settings {
    let raw_quality = record.export_quality.unwrap_or(OPTIMIZED_QUALITY);
    let export_quality = ExportQuality::clamped(raw_quality);
    if i64::from(export_quality.percent()) != raw_quality {
        tracing::warn!(
            stored = raw_quality,
            clamped = export_quality.percent(),
            "Stored export quality out of range"
        );
    }

    let use_android_export = record.use_android_export.unwrap_or(false);
    Settings {
        use_android_export,
        selected_export_scales: record
            .selected_export_scales
            .unwrap_or_else(|| legacy_scale_flags(use_android_export)),
        use_optimized_size: record.use_optimized_size.unwrap_or(true),
        naming_convention: record.naming_convention.unwrap_or_default(),
        export_quality,
        export_structure: record.export_structure.unwrap_or(ExportStructure::Web),
        selected_export_scales_v2: record.selected_export_scales_v2.unwrap_or_default(),
        plugin_window_size: record.plugin_window_size.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NamingTransform;

    fn s(value: f64) -> Scale {
        Scale::new(value).unwrap()
    }

    fn from_json(json: &str) -> Settings {
        migrate(Some(serde_json::from_str(json).unwrap()))
    }

    #[test]
    fn test_migrate_empty_record() {
        let settings = migrate(Some(PartialSettings::default()));

        assert!(!settings.use_android_export);
        assert_eq!(
            settings.selected_export_scales,
            vec![
                (s(1.0), true),
                (s(1.5), false),
                (s(2.0), true),
                (s(3.0), true),
                (s(4.0), true)
            ]
        );
        assert!(settings.use_optimized_size);
        assert_eq!(settings.export_quality.percent(), 90);
        assert_eq!(settings.export_structure, ExportStructure::Web);
        assert_eq!(
            settings.naming_convention,
            NamingConvention {
                transform: NamingTransform::Lowercase,
                replacement: "_".to_string()
            }
        );
        assert_eq!(
            settings.scales().as_slice(),
            &[s(1.0), s(2.0), s(3.0), s(4.0)]
        );
        assert_eq!(
            settings.plugin_window_size,
            WindowSize {
                width: 320,
                height: 680
            }
        );
    }

    #[test]
    fn test_migrate_absent_equals_empty() {
        assert_eq!(migrate(None), migrate(Some(PartialSettings::default())));
    }

    #[test]
    fn test_migrate_first_release_android_user() {
        let settings = from_json(r#"{"useAndroidExport": true}"#);

        assert_eq!(settings.export_structure, ExportStructure::Android);
        assert_eq!(
            settings.scales().as_slice(),
            &[s(1.0), s(1.5), s(2.0), s(3.0), s(4.0)]
        );
        assert_eq!(settings.export_quality.percent(), 90);
    }

    #[test]
    fn test_migrate_unoptimized_user_gets_full_quality() {
        let settings = from_json(r#"{"useOptimizedSize": false}"#);
        assert_eq!(settings.export_quality.percent(), 100);
    }

    #[test]
    fn test_migrate_keeps_legacy_scale_choices() {
        let settings = from_json(
            r#"{
                "useAndroidExport": false,
                "selectedExportScales": [[1, false], [1.5, true], [2, true], [3, false], [4, true]]
            }"#,
        );
        assert_eq!(settings.scales().as_slice(), &[s(1.5), s(2.0), s(4.0)]);
        assert_eq!(settings.export_structure, ExportStructure::Web);
    }

    #[test]
    fn test_migrate_collapses_duplicate_legacy_scales() {
        let settings =
            from_json(r#"{"selectedExportScales": [[2, true], [2, true], [1, true]]}"#);
        assert_eq!(settings.scales().as_slice(), &[s(2.0), s(1.0)]);
    }

    #[test]
    fn test_migrate_current_record_untouched() {
        let json = r#"{
            "useAndroidExport": true,
            "selectedExportScales": [[1, true]],
            "useOptimizedSize": false,
            "namingConvention": {"transform": "case-sensitive", "replacement": "-"},
            "exportQuality": 40,
            "exportStructure": "ios",
            "selectedExportScalesV2": [3, 0.5],
            "pluginWindowSize": {"width": 320, "height": 900}
        }"#;
        let partial: PartialSettings = serde_json::from_str(json).unwrap();
        assert_eq!(SchemaVersion::detect(&partial), SchemaVersion::CURRENT);

        let settings = migrate(Some(partial));
        assert_eq!(settings.export_structure, ExportStructure::Ios);
        assert_eq!(settings.export_quality.percent(), 40);
        assert_eq!(settings.scales().as_slice(), &[s(3.0), s(0.5)]);
        assert_eq!(settings.plugin_window_size.height, 900);
        assert_eq!(settings.naming_convention.replacement, "-");
    }

    #[test]
    fn test_migrate_clamps_out_of_range_quality() {
        assert_eq!(from_json(r#"{"exportQuality": 400}"#).export_quality.percent(), 100);
        assert_eq!(from_json(r#"{"exportQuality": 0}"#).export_quality.percent(), 10);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let inputs = [
            "{}",
            r#"{"useAndroidExport": true}"#,
            r#"{"useOptimizedSize": false, "exportStructure": "flat"}"#,
            r#"{"selectedExportScales": [[1.5, true]], "exportQuality": 5}"#,
            r#"{"selectedExportScalesV2": []}"#,
        ];
        for json in inputs {
            let once = from_json(json);
            let twice = migrate(Some(once.clone().into()));
            assert_eq!(once, twice, "input: {json}");

            let reparsed: PartialSettings =
                serde_json::from_value(serde_json::to_value(&once).unwrap()).unwrap();
            assert_eq!(migrate(Some(reparsed)), once, "json round trip: {json}");
        }
    }

    #[test]
    fn test_detect_version() {
        assert_eq!(SchemaVersion::detect(&PartialSettings::default()), SchemaVersion(0));
        let partial: PartialSettings = serde_json::from_str(
            r#"{"useAndroidExport": false, "selectedExportScales": [], "exportQuality": 50}"#,
        )
        .unwrap();
        assert_eq!(SchemaVersion::detect(&partial), SchemaVersion(2));
        assert_eq!(SchemaVersion::CURRENT.to_string(), "v8");
    }

    #[test]
    fn test_migrate_value_keeps_readable_fields() {
        let settings = migrate_value(Some(serde_json::json!({
            "useAndroidExport": true,
            "exportQuality": 75,
            "exportStructure": 17,
            "pluginWindowSize": {"w": 320, "h": 700}
        })));
        assert_eq!(settings.export_structure, ExportStructure::Android);
        assert_eq!(settings.export_quality.percent(), 75);
        assert_eq!(settings.plugin_window_size.height, 700);
    }

    #[test]
    fn test_migrate_value_non_object_yields_defaults() {
        let settings = migrate_value(Some(serde_json::json!("not an object")));
        assert_eq!(settings, migrate(None));
    }

    #[test]
    fn test_steps_are_ordered_after_their_inputs() {
        for (index, step) in STEPS.iter().enumerate() {
            for read in step.reads {
                let writer = STEPS
                    .iter()
                    .position(|s| s.writes.contains(read))
                    .expect("every read field is written by some step");
                assert!(writer < index, "{} reads {} too early", step.name, read);
            }
        }
    }
}
