//! iOS asset catalog manifests
//!
//! Every iOS image set folder in an archive gets a `Contents.json` that lists
//! the universal images it holds.

use crate::core::naming::ios_suffix;
use crate::domain::Scale;
use serde::Serialize;

/// File name of the manifest inside an image set folder
pub const MANIFEST_FILE_NAME: &str = "Contents.json";

const MANIFEST_AUTHOR: &str = "WebP Exporter";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSetManifest {
    pub images: Vec<ImageSetEntry>,
    pub info: ManifestInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSetEntry {
    pub idiom: &'static str,
    pub scale: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestInfo {
    pub version: u32,
    pub author: &'static str,
}

impl ImageSetManifest {
    /// Build the manifest for `base_name` exported at `scales`
    ///
    /// Scales iOS has no suffix for are left out.
    pub fn new(base_name: &str, scales: &[Scale], extension: &str) -> Self {
        let images = scales
            .iter()
            .filter_map(|scale| {
                ios_suffix(*scale).map(|suffix| ImageSetEntry {
                    idiom: "universal",
                    scale: scale.label(),
                    filename: format!("{base_name}{suffix}.{extension}"),
                })
            })
            .collect();

        Self {
            images,
            info: ManifestInfo {
                version: 1,
                author: MANIFEST_AUTHOR,
            },
        }
    }

    /// Archive path of the manifest for `base_name`
    pub fn path(base_name: &str) -> String {
        format!("{base_name}/{MANIFEST_FILE_NAME}")
    }

    pub fn to_bytes(&self) -> crate::domain::Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manifest_lists_ios_scales_only() {
        let scales = [
            Scale::whole(1),
            Scale::new(1.5).unwrap(),
            Scale::whole(2),
            Scale::whole(3),
            Scale::whole(4),
        ];
        let manifest = ImageSetManifest::new("icon", &scales, "webp");

        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            value,
            json!({
                "images": [
                    {"idiom": "universal", "scale": "1x", "filename": "icon.webp"},
                    {"idiom": "universal", "scale": "2x", "filename": "icon@2x.webp"},
                    {"idiom": "universal", "scale": "3x", "filename": "icon@3x.webp"}
                ],
                "info": {"version": 1, "author": "WebP Exporter"}
            })
        );
    }

    #[test]
    fn test_manifest_path() {
        assert_eq!(ImageSetManifest::path("icon"), "icon/Contents.json");
    }
}
