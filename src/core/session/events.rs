//! Events exchanged between the plugin UI and its controller

use crate::core::settings::WindowSize;
use crate::domain::{RenderedImage, Scale, SelectedNode};
use serde::{Deserialize, Serialize};

/// Images produced for one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeImages {
    /// Sanitized base name the files were written under
    pub name: String,
    pub images: Vec<RenderedImage>,
}

/// UI-facing event, tagged by its `name`
///
/// ```
/// use webp_exporter::core::session::PluginEvent;
///
/// let event: PluginEvent =
///     serde_json::from_str(r#"{"name":"RENDER_REQUEST","payload":{"scales":[1,2]}}"#).unwrap();
/// assert!(matches!(event, PluginEvent::RenderRequest { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginEvent {
    /// The user selected a different set of nodes
    #[serde(rename_all = "camelCase")]
    SelectionChanged {
        /// Sum of width × height over the selection at scale 1
        total_pixel_size: u64,
        nodes: Vec<SelectedNode>,
        #[serde(default)]
        preview_images: Vec<Vec<u8>>,
    },

    /// Export the current selection at these scales
    ///
    /// An empty list means the scales from the current settings.
    #[serde(rename_all = "camelCase")]
    RenderRequest {
        scales: Vec<Scale>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
    },

    /// Compressed images of a finished export
    RenderResult { nodes: Vec<NodeImages> },

    /// Replace the settings; the document is migrated before it is stored
    SaveSettings { settings: serde_json::Value },

    /// The plugin window was resized
    Resize { size: WindowSize },
}

impl PluginEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            PluginEvent::SelectionChanged { .. } => "SELECTION_CHANGED",
            PluginEvent::RenderRequest { .. } => "RENDER_REQUEST",
            PluginEvent::RenderResult { .. } => "RENDER_RESULT",
            PluginEvent::SaveSettings { .. } => "SAVE_SETTINGS",
            PluginEvent::Resize { .. } => "RESIZE",
        }
    }
}
