//! Selected nodes and their rendered images

use super::scale::Scale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node selected in the design document
///
/// Transient: recreated on every selection change and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedNode {
    /// Opaque identifier understood by the render collaborator
    pub id: String,

    /// Display (layer) name, not yet sanitized
    pub name: String,
}

impl SelectedNode {
    /// Creates a new selected node
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SelectedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Raw raster output of one node at one scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedImage {
    pub scale: Scale,
    pub image: Vec<u8>,
}

impl RenderedImage {
    pub fn new(scale: Scale, image: Vec<u8>) -> Self {
        Self { scale, image }
    }
}
