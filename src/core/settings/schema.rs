//! Persisted settings record
//!
//! [`PartialSettings`] is what comes back from the store: any field may be
//! missing, depending on which plugin version last wrote it.
//! [`Settings`] is the fully populated record produced by the migrator.
//! Both serialize to the same camelCase JSON shape.

use crate::core::scales::ScaleSet;
use crate::domain::{ExportStructure, NamingConvention, Scale};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Lowest accepted export quality, in percent
pub const MIN_EXPORT_QUALITY: u8 = 10;

/// Highest accepted export quality, in percent
pub const MAX_EXPORT_QUALITY: u8 = 100;

/// WebP export quality as an integer percentage in 10..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ExportQuality(u8);

impl ExportQuality {
    pub fn new(percent: i64) -> Result<Self, String> {
        if percent < i64::from(MIN_EXPORT_QUALITY) || percent > i64::from(MAX_EXPORT_QUALITY) {
            return Err(format!(
                "Export quality must be between {MIN_EXPORT_QUALITY} and {MAX_EXPORT_QUALITY}, got {percent}"
            ));
        }
        Ok(Self(percent as u8))
    }

    /// Nearest valid quality
    pub fn clamped(percent: i64) -> Self {
        Self(percent.clamp(i64::from(MIN_EXPORT_QUALITY), i64::from(MAX_EXPORT_QUALITY)) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Quality as the 0.0–1.0 factor the compressor expects
    pub fn factor(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl TryFrom<i64> for ExportQuality {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExportQuality> for u8 {
    fn from(quality: ExportQuality) -> Self {
        quality.0
    }
}

impl fmt::Display for ExportQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Fixed plugin window width
pub const WINDOW_WIDTH: u32 = 320;

/// Smallest height the resize handle allows
pub const MIN_WINDOW_HEIGHT: u32 = 580;

/// Plugin window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    #[serde(alias = "w")]
    pub width: u32,
    #[serde(alias = "h")]
    pub height: u32,
}

impl WindowSize {
    /// Size after dragging the resize handle to `pointer_y`
    ///
    /// Width stays fixed; height follows the pointer plus the handle's own
    /// size and never drops below [`MIN_WINDOW_HEIGHT`].
    pub fn resized(pointer_y: f64, handle_size: u32) -> Self {
        let target = (pointer_y + f64::from(handle_size)).floor();
        let height = if target.is_finite() && target > f64::from(MIN_WINDOW_HEIGHT) {
            target.min(f64::from(u32::MAX)) as u32
        } else {
            MIN_WINDOW_HEIGHT
        };
        Self {
            width: WINDOW_WIDTH,
            height,
        }
    }

    /// The same size with the fixed width and minimum height applied
    pub fn normalized(self) -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: self.height.max(MIN_WINDOW_HEIGHT),
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: 680,
        }
    }
}

/// Settings as read back from the store
///
/// Every field is optional; the migrator fills in the gaps. Each field is
/// read on its own: a value that does not fit is dropped with a warning and
/// migrated like a missing field, so one bad field never costs the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSettings {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub use_android_export: Option<bool>,

    /// Legacy per-scale enable flags
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub selected_export_scales: Option<Vec<(Scale, bool)>>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub use_optimized_size: Option<bool>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub naming_convention: Option<NamingConvention>,

    /// Raw percentage; out-of-range values are clamped during migration
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub export_quality: Option<i64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub export_structure: Option<ExportStructure>,

    #[serde(default, deserialize_with = "lenient_scale_set", skip_serializing_if = "Option::is_none")]
    pub selected_export_scales_v2: Option<ScaleSet>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plugin_window_size: Option<WindowSize>,
}

/// Read one field, turning a value of the wrong shape into `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!(error = %e, %value, "Ignoring unreadable settings field");
            Ok(None)
        }
    }
}

/// Read a list field, dropping only the elements that do not fit
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(items) = lenient::<D, Vec<Value>>(deserializer)? else {
        return Ok(None);
    };
    let parsed = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, value = %item, "Ignoring unreadable settings entry");
                None
            }
        })
        .collect();
    Ok(Some(parsed))
}

fn lenient_scale_set<'de, D>(deserializer: D) -> Result<Option<ScaleSet>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_list::<D, Scale>(deserializer)?.map(ScaleSet::from))
}

/// Fully populated, current-version settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Legacy structure flag, kept for older readers
    pub use_android_export: bool,

    /// Legacy per-scale enable flags, kept for older readers
    pub selected_export_scales: Vec<(Scale, bool)>,

    pub use_optimized_size: bool,

    pub naming_convention: NamingConvention,

    pub export_quality: ExportQuality,

    pub export_structure: ExportStructure,

    /// Scales exported, the current representation
    pub selected_export_scales_v2: ScaleSet,

    pub plugin_window_size: WindowSize,
}

impl Settings {
    /// Scales to export
    pub fn scales(&self) -> &ScaleSet {
        &self.selected_export_scales_v2
    }

    pub fn scales_mut(&mut self) -> &mut ScaleSet {
        &mut self.selected_export_scales_v2
    }
}

impl From<Settings> for PartialSettings {
    fn from(settings: Settings) -> Self {
        Self {
            use_android_export: Some(settings.use_android_export),
            selected_export_scales: Some(settings.selected_export_scales),
            use_optimized_size: Some(settings.use_optimized_size),
            naming_convention: Some(settings.naming_convention),
            export_quality: Some(i64::from(settings.export_quality.percent())),
            export_structure: Some(settings.export_structure),
            selected_export_scales_v2: Some(settings.selected_export_scales_v2),
            plugin_window_size: Some(settings.plugin_window_size),
        }
    }
}
