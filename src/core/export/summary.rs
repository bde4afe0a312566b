//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{ExportStructure, Scale};
use std::time::Duration;

/// A (node, scale) pair the export structure has no file name for
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// Display name of the node
    pub node: String,

    pub scale: Scale,

    pub structure: ExportStructure,
}

impl SkippedEntry {
    pub fn new(node: impl Into<String>, scale: Scale, structure: ExportStructure) -> Self {
        Self {
            node: node.into(),
            scale,
            structure,
        }
    }
}

/// Summary of an export operation
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of nodes selected
    pub total_nodes: usize,

    /// Number of (node, scale) pairs requested
    pub requested_entries: usize,

    /// Number of image files produced
    pub files_written: usize,

    /// Pairs dropped because the structure does not support the scale
    pub skipped: Vec<SkippedEntry>,

    /// Total size of the rendered rasters
    pub raw_bytes: usize,

    /// Total size of the compressed images
    pub compressed_bytes: usize,

    /// File name of the delivered artifact, if any
    pub artifact_name: Option<String>,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a dropped pair
    pub fn add_skipped(&mut self, entry: SkippedEntry) {
        self.skipped.push(entry);
    }

    /// Whether every requested pair produced a file
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.files_written == self.requested_entries
    }

    /// Size saved by compression as a percentage of the raw size
    pub fn size_reduction(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_bytes as f64 / self.raw_bytes as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            nodes = self.total_nodes,
            requested = self.requested_entries,
            files = self.files_written,
            skipped = self.skipped.len(),
            raw_bytes = self.raw_bytes,
            compressed_bytes = self.compressed_bytes,
            size_reduction = format!("{:.2}%", self.size_reduction()),
            artifact = self.artifact_name.as_deref().unwrap_or("-"),
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if !self.skipped.is_empty() {
            tracing::warn!(
                skipped = self.skipped.len(),
                "Export skipped scales the structure does not support"
            );
            for entry in &self.skipped {
                tracing::warn!(
                    node = %entry.node,
                    scale = %entry.scale,
                    structure = %entry.structure,
                    "Scale ignored"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.total_nodes, 0);
        assert_eq!(summary.requested_entries, 0);
        assert_eq!(summary.files_written, 0);
        assert!(summary.skipped.is_empty());
        assert!(summary.artifact_name.is_none());
        assert_eq!(summary.duration, Duration::from_secs(0));
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(3));

        assert_eq!(summary.duration, Duration::from_secs(3));
    }

    #[test]
    fn test_export_summary_is_complete() {
        let mut summary = ExportSummary::new();
        summary.requested_entries = 2;
        summary.files_written = 2;
        assert!(summary.is_complete());

        summary.add_skipped(SkippedEntry::new(
            "icon",
            Scale::new(1.5).unwrap(),
            ExportStructure::Ios,
        ));
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_export_summary_size_reduction() {
        let mut summary = ExportSummary::new();
        assert_eq!(summary.size_reduction(), 0.0);

        summary.raw_bytes = 1000;
        summary.compressed_bytes = 250;
        assert_eq!(summary.size_reduction(), 75.0);
    }
}
