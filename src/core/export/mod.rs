//! Export orchestration
//!
//! This module provides the export workflow:
//! - Planning, rendering, compression and packaging
//! - iOS asset catalog manifests
//! - Summary and reporting

pub mod coordinator;
pub mod manifest;
pub mod summary;

pub use coordinator::{
    Artifact, ExportCoordinator, ExportOptions, ExportOutcome, ExportPhase, ExportedNode,
    DEFAULT_ARCHIVE_PREFIX,
};
pub use manifest::ImageSetManifest;
pub use summary::{ExportSummary, SkippedEntry};
