//! Naming vocabulary: export structures and naming conventions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Folder/naming convention family applied to exported files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStructure {
    /// `drawable-<density>/<name>`
    Android,
    /// `<name>/<name>@<n>x`
    Ios,
    /// `<name>/<name>_<n>x`
    Web,
    /// `<name>_<n>x`
    Flat,
}

impl ExportStructure {
    /// All structures, in display order
    pub const ALL: [ExportStructure; 4] = [
        ExportStructure::Android,
        ExportStructure::Ios,
        ExportStructure::Web,
        ExportStructure::Flat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStructure::Android => "android",
            ExportStructure::Ios => "ios",
            ExportStructure::Web => "web",
            ExportStructure::Flat => "flat",
        }
    }

    /// Human-readable platform name, empty for structures that accept any scale
    pub fn platform_name(&self) -> &'static str {
        match self {
            ExportStructure::Android => "Android",
            ExportStructure::Ios => "iOS",
            ExportStructure::Web | ExportStructure::Flat => "",
        }
    }
}

impl fmt::Display for ExportStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportStructure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "android" => Ok(ExportStructure::Android),
            "ios" => Ok(ExportStructure::Ios),
            "web" => Ok(ExportStructure::Web),
            "flat" => Ok(ExportStructure::Flat),
            other => Err(format!(
                "Invalid export structure '{other}'. Must be one of: android, ios, web, flat"
            )),
        }
    }
}

/// Case transform applied to layer names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingTransform {
    /// Keep the layer name exactly as written
    #[serde(rename = "no-transform")]
    Preserve,
    /// Replace separators and lowercase
    #[serde(rename = "lowercase")]
    Lowercase,
    /// Replace separators, keep case
    #[serde(rename = "case-sensitive")]
    CaseSensitive,
}

impl FromStr for NamingTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "no-transform" | "preserve" => Ok(NamingTransform::Preserve),
            "lowercase" => Ok(NamingTransform::Lowercase),
            "case-sensitive" => Ok(NamingTransform::CaseSensitive),
            other => Err(format!(
                "Invalid naming transform '{other}'. Must be one of: no-transform, lowercase, case-sensitive"
            )),
        }
    }
}

/// User-configurable name sanitization policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    pub transform: NamingTransform,

    /// Separator substituted for runs of non-alphanumeric characters
    pub replacement: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            transform: NamingTransform::Lowercase,
            replacement: "_".to_string(),
        }
    }
}
