//! Export coordinator - main orchestrator for the export process
//!
//! This module coordinates one export: planning file names for every selected
//! node at every selected scale, rendering, compressing and delivering either
//! a single file or an archive.

use crate::adapters::traits::{ArchiveFactory, Compressor, Renderer};
use crate::core::export::manifest::ImageSetManifest;
use crate::core::export::summary::{ExportSummary, SkippedEntry};
use crate::core::naming::{name_for, sanitize};
use crate::core::settings::{ExportQuality, Settings};
use crate::domain::{
    ExportStructure, ExporterError, NamingConvention, RenderedImage, Result, Scale, SelectedNode,
};
use futures::future::try_join_all;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Default prefix of timestamp-named archives
pub const DEFAULT_ARCHIVE_PREFIX: &str = "webp-export";

/// Base name used when a node name sanitizes to nothing
const FALLBACK_BASE_NAME: &str = "untitled";

/// Where an export currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Requested,
    Rendering,
    Compressing,
    Packaging,
}

/// Per-export parameters, usually taken from [`Settings`]
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub structure: ExportStructure,
    pub naming: NamingConvention,
    pub quality: ExportQuality,
    pub scales: Vec<Scale>,
    /// Replaces the node name when exactly one node is exported
    pub file_name: Option<String>,
}

impl ExportOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            structure: settings.export_structure,
            naming: settings.naming_convention.clone(),
            quality: settings.export_quality,
            scales: settings.scales().as_slice().to_vec(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Compressed images of one exported node
#[derive(Debug, Clone)]
pub struct ExportedNode {
    pub node: SelectedNode,
    /// Sanitized, de-duplicated base name
    pub base_name: String,
    pub images: Vec<RenderedImage>,
}

/// What an export delivers
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// A single compressed image
    File { name: String, bytes: Vec<u8> },
    /// An archive of every compressed image
    Archive {
        name: String,
        bytes: Vec<u8>,
        entries: Vec<String>,
    },
}

impl Artifact {
    pub fn name(&self) -> &str {
        match self {
            Artifact::File { name, .. } | Artifact::Archive { name, .. } => name,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Artifact::File { bytes, .. } | Artifact::Archive { bytes, .. } => bytes,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Artifact::Archive { .. })
    }

    /// Write the artifact into `dir`, creating it if needed
    ///
    /// # Returns
    ///
    /// The path of the written file.
    ///
    /// # Errors
    ///
    /// Rejects a name that is not a single plain file name, so an artifact
    /// can never land outside `dir`.
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let mut components = Path::new(self.name()).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(ExporterError::Validation(format!(
                "Artifact name '{}' is not a plain file name",
                self.name()
            )));
        }

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.name());
        tokio::fs::write(&path, self.bytes()).await?;
        tracing::info!(path = %path.display(), bytes = self.bytes().len(), "Wrote artifact");
        Ok(path)
    }
}

/// Result of one export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// `None` when nothing was selected or every scale was unsupported
    pub artifact: Option<Artifact>,
    pub nodes: Vec<ExportedNode>,
    pub summary: ExportSummary,
}

/// One node with the file paths planned for it
#[derive(Debug, Clone)]
struct PlannedNode {
    node: SelectedNode,
    base_name: String,
    entries: Vec<(Scale, String)>,
}

struct CompressedEntry {
    node_index: usize,
    scale: Scale,
    path: String,
    bytes: Vec<u8>,
}

/// Export coordinator
pub struct ExportCoordinator {
    renderer: Arc<dyn Renderer>,
    compressor: Arc<dyn Compressor>,
    archives: Arc<dyn ArchiveFactory>,
    archive_prefix: String,
    phase: watch::Sender<ExportPhase>,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(
        renderer: Arc<dyn Renderer>,
        compressor: Arc<dyn Compressor>,
        archives: Arc<dyn ArchiveFactory>,
    ) -> Self {
        let (phase, _) = watch::channel(ExportPhase::Idle);
        Self {
            renderer,
            compressor,
            archives,
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            phase,
        }
    }

    /// Prefix of archives named after the export time
    pub fn with_archive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archive_prefix = prefix.into();
        self
    }

    /// Watch phase transitions
    pub fn subscribe(&self) -> watch::Receiver<ExportPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> ExportPhase {
        *self.phase.borrow()
    }

    fn set_phase(&self, phase: ExportPhase) {
        let previous = self.phase.send_replace(phase);
        if previous != phase {
            tracing::debug!(from = ?previous, to = ?phase, "Export phase changed");
        }
    }

    /// Execute an export
    ///
    /// This is the main entry point. It:
    /// 1. Plans a file path for every supported (node, scale) pair
    /// 2. Renders every planned pair concurrently
    /// 3. Compresses every render concurrently
    /// 4. Delivers a bare file for one node at one scale, an archive otherwise
    ///
    /// # Errors
    ///
    /// Any render, compression or archive failure aborts the export. The
    /// phase returns to [`ExportPhase::Idle`] and nothing is delivered.
    pub async fn export(
        &self,
        nodes: &[SelectedNode],
        options: &ExportOptions,
    ) -> Result<ExportOutcome> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.total_nodes = nodes.len();

        if nodes.is_empty() {
            tracing::info!("Nothing selected, export skipped");
            self.set_phase(ExportPhase::Idle);
            return Ok(ExportOutcome {
                artifact: None,
                nodes: Vec::new(),
                summary: summary.with_duration(start_time.elapsed()),
            });
        }

        self.set_phase(ExportPhase::Requested);
        tracing::info!(
            nodes = nodes.len(),
            scales = options.scales.len(),
            structure = %options.structure,
            quality = %options.quality,
            "Starting export"
        );

        let planned = plan(nodes, options, self.compressor.extension(), &mut summary);
        summary.requested_entries = nodes.len() * options.scales.len();

        let file_count: usize = planned.iter().map(|p| p.entries.len()).sum();
        if file_count == 0 {
            tracing::warn!("No selected scale is supported, nothing to export");
            self.set_phase(ExportPhase::Idle);
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(ExportOutcome {
                artifact: None,
                nodes: Vec::new(),
                summary,
            });
        }

        let result = self.run(&planned, options, &mut summary).await;
        self.set_phase(ExportPhase::Idle);

        match result {
            Ok((artifact, exported)) => {
                summary.artifact_name = Some(artifact.name().to_string());
                let summary = summary.with_duration(start_time.elapsed());
                summary.log_summary();
                Ok(ExportOutcome {
                    artifact: Some(artifact),
                    nodes: exported,
                    summary,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Export aborted");
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        planned: &[PlannedNode],
        options: &ExportOptions,
        summary: &mut ExportSummary,
    ) -> Result<(Artifact, Vec<ExportedNode>)> {
        self.set_phase(ExportPhase::Rendering);
        let renderer = &self.renderer;
        let renders = try_join_all(planned.iter().enumerate().flat_map(|(node_index, p)| {
            p.entries.iter().map(move |(scale, path)| async move {
                let bytes = renderer.render(&p.node, *scale).await?;
                Ok::<_, ExporterError>((node_index, *scale, path.clone(), bytes))
            })
        }))
        .await?;
        summary.raw_bytes = renders.iter().map(|(_, _, _, bytes)| bytes.len()).sum();

        self.set_phase(ExportPhase::Compressing);
        let compressor = &self.compressor;
        let factor = options.quality.factor();
        let compressed = try_join_all(renders.into_iter().map(
            |(node_index, scale, path, raw)| async move {
                let bytes = compressor.compress(&raw, factor).await?;
                Ok::<_, ExporterError>(CompressedEntry {
                    node_index,
                    scale,
                    path,
                    bytes,
                })
            },
        ))
        .await?;
        summary.compressed_bytes = compressed.iter().map(|c| c.bytes.len()).sum();
        summary.files_written = compressed.len();

        let exported = group_by_node(planned, &compressed);
        let extension = self.compressor.extension();

        if planned.len() == 1 && compressed.len() == 1 {
            let entry = &compressed[0];
            let artifact = Artifact::File {
                name: format!("{}.{extension}", last_component(&entry.path)),
                bytes: entry.bytes.clone(),
            };
            return Ok((artifact, exported));
        }

        self.set_phase(ExportPhase::Packaging);
        let mut archive = self.archives.new_archive();
        let mut entries = Vec::with_capacity(compressed.len());
        for entry in &compressed {
            let path = format!("{}.{extension}", entry.path);
            archive.add_entry(&path, &entry.bytes)?;
            entries.push(path);
        }

        if options.structure == ExportStructure::Ios {
            for node in &exported {
                let scales: Vec<Scale> = node.images.iter().map(|i| i.scale).collect();
                let manifest = ImageSetManifest::new(&node.base_name, &scales, extension);
                let path = ImageSetManifest::path(&node.base_name);
                archive.add_entry(&path, &manifest.to_bytes()?)?;
                entries.push(path);
            }
        }

        let bytes = archive.finalize().await?;
        let name = if planned.len() == 1 {
            format!(
                "{}.{}",
                last_component(&planned[0].base_name),
                self.archives.extension()
            )
        } else {
            format!(
                "{}-{}.{}",
                self.archive_prefix,
                chrono::Local::now().format("%Y%m%d-%H%M%S"),
                self.archives.extension()
            )
        };

        tracing::debug!(archive = %name, entries = entries.len(), "Packaged export");
        Ok((
            Artifact::Archive {
                name,
                bytes,
                entries,
            },
            exported,
        ))
    }
}

/// Assign base names and file paths, dropping unsupported scales
fn plan(
    nodes: &[SelectedNode],
    options: &ExportOptions,
    extension: &str,
    summary: &mut ExportSummary,
) -> Vec<PlannedNode> {
    let separator = options.naming.replacement.as_str();
    let mut claims = PathClaims::default();

    nodes
        .iter()
        .map(|node| {
            let raw_name = match (&options.file_name, nodes.len()) {
                (Some(file_name), 1) => file_name.as_str(),
                _ => node.name.as_str(),
            };
            let base_name = claims.claim(raw_name, options, extension);

            let entries = options
                .scales
                .iter()
                .filter_map(|scale| {
                    let path = name_for(options.structure, *scale, &base_name, separator);
                    if path.is_none() {
                        tracing::warn!(
                            node = %node.name,
                            scale = %scale,
                            structure = %options.structure,
                            "Scale not supported, skipping"
                        );
                        summary.add_skipped(SkippedEntry::new(
                            node.name.clone(),
                            *scale,
                            options.structure,
                        ));
                    }
                    path.map(|path| (*scale, path))
                })
                .collect();

            PlannedNode {
                node: node.clone(),
                base_name,
                entries,
            }
        })
        .collect()
}

/// Base names and archive paths already handed out in one export
#[derive(Debug, Default)]
struct PathClaims {
    base_names: HashSet<String>,
    paths: HashSet<String>,
}

impl PathClaims {
    /// Sanitize a node name and pick the first variant whose base name and
    /// archive paths are all still free
    ///
    /// Variants append `<separator>2`, `<separator>3`, ... to the name.
    fn claim(&mut self, raw_name: &str, options: &ExportOptions, extension: &str) -> String {
        let mut base_name = relative_path(&sanitize(raw_name, &options.naming));
        if base_name.is_empty() {
            base_name = FALLBACK_BASE_NAME.to_string();
        }

        let mut candidate = base_name.clone();
        let mut count = 1;
        loop {
            let paths = archive_paths(options, &candidate, extension);
            if !self.base_names.contains(&candidate)
                && paths.iter().all(|path| !self.paths.contains(path))
            {
                self.base_names.insert(candidate.clone());
                self.paths.extend(paths);
                return candidate;
            }
            count += 1;
            candidate = format!("{base_name}{}{count}", options.naming.replacement);
        }
    }
}

/// Every archive entry a node with this base name would produce
fn archive_paths(options: &ExportOptions, base_name: &str, extension: &str) -> Vec<String> {
    let separator = options.naming.replacement.as_str();
    let mut paths: Vec<String> = options
        .scales
        .iter()
        .filter_map(|scale| name_for(options.structure, *scale, base_name, separator))
        .map(|path| format!("{path}.{extension}"))
        .collect();
    if options.structure == ExportStructure::Ios {
        paths.push(ImageSetManifest::path(base_name));
    }
    paths
}

/// Normalize a name to a relative `/`-separated path
///
/// Untransformed layer names may contain `/`, `\`, `.` or `..`; nesting is
/// kept but nothing can climb out of the archive root.
fn relative_path(name: &str) -> String {
    name.split(['/', '\\'])
        .filter(|part| !matches!(*part, "" | "." | ".."))
        .collect::<Vec<_>>()
        .join("/")
}

fn last_component(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn group_by_node(planned: &[PlannedNode], compressed: &[CompressedEntry]) -> Vec<ExportedNode> {
    let mut exported: Vec<ExportedNode> = planned
        .iter()
        .map(|p| ExportedNode {
            node: p.node.clone(),
            base_name: p.base_name.clone(),
            images: Vec::with_capacity(p.entries.len()),
        })
        .collect();
    for entry in compressed {
        if let Some(node) = exported.get_mut(entry.node_index) {
            node.images
                .push(RenderedImage::new(entry.scale, entry.bytes.clone()));
        }
    }
    exported
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::traits::ArchiveBuilder;
    use crate::domain::{NamingTransform, RenderError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct EchoRenderer;

    #[async_trait]
    impl Renderer for EchoRenderer {
        async fn render(&self, node: &SelectedNode, scale: Scale) -> Result<Vec<u8>> {
            Ok(format!("{}@{}", node.id, scale).into_bytes())
        }
    }

    struct FailingRenderer;

    #[async_trait]
    impl Renderer for FailingRenderer {
        async fn render(&self, node: &SelectedNode, _scale: Scale) -> Result<Vec<u8>> {
            Err(RenderError::NodeNotFound(node.id.clone()).into())
        }
    }

    struct TagCompressor;

    #[async_trait]
    impl Compressor for TagCompressor {
        async fn compress(&self, raw_image: &[u8], _quality: f32) -> Result<Vec<u8>> {
            Ok([b"webp:".as_slice(), raw_image].concat())
        }
    }

    #[derive(Default, Clone)]
    struct RecordingArchives {
        created: Arc<AtomicUsize>,
        entries: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingArchive {
        entries: Arc<Mutex<Vec<String>>>,
        count: usize,
    }

    #[async_trait]
    impl ArchiveBuilder for RecordingArchive {
        fn add_entry(&mut self, path: &str, _bytes: &[u8]) -> Result<()> {
            self.entries.lock().unwrap().push(path.to_string());
            self.count += 1;
            Ok(())
        }

        fn entry_count(&self) -> usize {
            self.count
        }

        async fn finalize(self: Box<Self>) -> Result<Vec<u8>> {
            Ok(b"archive".to_vec())
        }
    }

    impl ArchiveFactory for RecordingArchives {
        fn new_archive(&self) -> Box<dyn ArchiveBuilder> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Box::new(RecordingArchive {
                entries: self.entries.clone(),
                count: 0,
            })
        }
    }

    fn coordinator(archives: &RecordingArchives) -> ExportCoordinator {
        ExportCoordinator::new(
            Arc::new(EchoRenderer),
            Arc::new(TagCompressor),
            Arc::new(archives.clone()),
        )
    }

    fn options(structure: ExportStructure, scales: &[f64]) -> ExportOptions {
        ExportOptions {
            structure,
            naming: NamingConvention::default(),
            quality: ExportQuality::clamped(90),
            scales: scales.iter().map(|s| Scale::new(*s).unwrap()).collect(),
            file_name: None,
        }
    }

    #[tokio::test]
    async fn test_single_node_single_scale_is_a_bare_file() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1:2", "My Frame!!2")],
                &options(ExportStructure::Android, &[2.0]),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome.artifact,
            Some(Artifact::File {
                name: "my_frame_2.webp".to_string(),
                bytes: b"webp:1:2@2".to_vec(),
            })
        );
        assert_eq!(archives.created.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.summary.files_written, 1);
    }

    #[tokio::test]
    async fn test_two_nodes_are_archived_under_timestamp_name() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[
                    SelectedNode::new("1", "Home"),
                    SelectedNode::new("2", "Settings"),
                ],
                &options(ExportStructure::Web, &[1.0, 2.0]),
            )
            .await
            .unwrap();

        let artifact = outcome.artifact.unwrap();
        assert!(artifact.is_archive());
        assert!(artifact.name().starts_with("webp-export-"));
        assert!(artifact.name().ends_with(".zip"));
        assert!(!artifact.name().contains("home"));

        let mut entries = archives.entries.lock().unwrap().clone();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                "home/home_1x.webp",
                "home/home_2x.webp",
                "settings/settings_1x.webp",
                "settings/settings_2x.webp",
            ]
        );
        assert_eq!(archives.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_node_many_scales_archive_named_after_node() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1", "Logo")],
                &options(ExportStructure::Flat, &[1.0, 1.5]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.artifact.unwrap().name(), "logo.zip");
    }

    #[tokio::test]
    async fn test_unsupported_scales_are_skipped() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1", "icon")],
                &options(ExportStructure::Ios, &[1.0, 1.5, 2.0, 4.0]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.summary.skipped.len(), 2);
        assert_eq!(outcome.summary.requested_entries, 4);
        assert_eq!(outcome.summary.files_written, 2);
        assert_eq!(
            *archives.entries.lock().unwrap(),
            vec!["icon/icon.webp", "icon/icon@2x.webp", "icon/Contents.json"]
        );
    }

    #[tokio::test]
    async fn test_only_unsupported_scales_delivers_nothing() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1", "icon")],
                &options(ExportStructure::Android, &[5.0]),
            )
            .await
            .unwrap();

        assert!(outcome.artifact.is_none());
        assert_eq!(outcome.summary.skipped.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_selection_stays_idle() {
        let archives = RecordingArchives::default();
        let coordinator = coordinator(&archives);
        let outcome = coordinator
            .export(&[], &options(ExportStructure::Web, &[1.0]))
            .await
            .unwrap();

        assert!(outcome.artifact.is_none());
        assert_eq!(coordinator.phase(), ExportPhase::Idle);
    }

    #[tokio::test]
    async fn test_render_failure_aborts_and_returns_to_idle() {
        let archives = RecordingArchives::default();
        let coordinator = ExportCoordinator::new(
            Arc::new(FailingRenderer),
            Arc::new(TagCompressor),
            Arc::new(archives.clone()),
        );
        let phases = coordinator.subscribe();

        let err = coordinator
            .export(
                &[SelectedNode::new("1", "a"), SelectedNode::new("2", "b")],
                &options(ExportStructure::Web, &[1.0]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExporterError::Render(_)));
        assert_eq!(*phases.borrow(), ExportPhase::Idle);
        assert_eq!(archives.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_file_name_override_applies_to_single_node() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1", "Frame 12")],
                &options(ExportStructure::Web, &[3.0]).with_file_name("Hero Banner"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.artifact.unwrap().name(), "hero_banner_3x.webp");
    }

    fn preserving(mut options: ExportOptions) -> ExportOptions {
        options.naming = NamingConvention {
            transform: NamingTransform::Preserve,
            replacement: "_".to_string(),
        };
        options
    }

    #[test]
    fn test_duplicate_names_get_suffixes() {
        let options = options(ExportStructure::Web, &[1.0]);
        let mut claims = PathClaims::default();

        assert_eq!(claims.claim("Icon", &options, "webp"), "icon");
        assert_eq!(claims.claim("icon", &options, "webp"), "icon_2");
        assert_eq!(claims.claim("ICON", &options, "webp"), "icon_3");
        assert_eq!(claims.claim("icon 2", &options, "webp"), "icon_2_2");
    }

    #[test]
    fn test_empty_name_falls_back() {
        let options = preserving(options(ExportStructure::Flat, &[1.0]));
        let mut claims = PathClaims::default();
        assert_eq!(claims.claim("", &options, "webp"), "untitled");
        assert_eq!(claims.claim("../..", &options, "webp"), "untitled_2");
    }

    #[test]
    fn test_entry_paths_from_different_names_do_not_collide() {
        let options = options(ExportStructure::Flat, &[1.5, 5.0]);
        let mut claims = PathClaims::default();

        assert_eq!(claims.claim("a", &options, "webp"), "a");
        // "a_1" at 5x would repeat "a" at 1.5x
        assert_eq!(claims.claim("a 1", &options, "webp"), "a_1_2");
    }

    #[tokio::test]
    async fn test_colliding_entry_paths_still_export() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1", "a"), SelectedNode::new("2", "a 1")],
                &options(ExportStructure::Flat, &[1.5, 5.0]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.summary.files_written, 4);
        let entries = archives.entries.lock().unwrap().clone();
        let distinct: HashSet<&String> = entries.iter().collect();
        assert_eq!(distinct.len(), entries.len());
        assert!(entries.contains(&"a_1_5x.webp".to_string()));
        assert!(entries.contains(&"a_1_2_5x.webp".to_string()));
    }

    #[tokio::test]
    async fn test_layer_paths_stay_inside_the_archive() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1", "../evil")],
                &preserving(options(ExportStructure::Flat, &[1.0, 2.0])),
            )
            .await
            .unwrap();

        assert_eq!(outcome.artifact.unwrap().name(), "evil.zip");
        assert_eq!(
            *archives.entries.lock().unwrap(),
            vec!["evil_1x.webp", "evil_2x.webp"]
        );
    }

    #[tokio::test]
    async fn test_nested_layer_name_archive_is_named_after_leaf() {
        let archives = RecordingArchives::default();
        let outcome = coordinator(&archives)
            .export(
                &[SelectedNode::new("1", "Icons/Home")],
                &preserving(options(ExportStructure::Web, &[1.0, 2.0])),
            )
            .await
            .unwrap();

        assert_eq!(outcome.artifact.unwrap().name(), "Home.zip");
        assert_eq!(
            *archives.entries.lock().unwrap(),
            vec!["Icons/Home/Icons/Home_1x.webp", "Icons/Home/Icons/Home_2x.webp"]
        );
    }

    #[tokio::test]
    async fn test_write_to_rejects_names_with_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out");

        for name in ["../evil.zip", "Icons/Home.zip", "..", ""] {
            let artifact = Artifact::File {
                name: name.to_string(),
                bytes: b"x".to_vec(),
            };
            let err = artifact.write_to(&out).await.unwrap_err();
            assert!(matches!(err, ExporterError::Validation(_)), "{name}");
        }
        assert!(!dir.path().join("evil.zip").exists());

        let artifact = Artifact::File {
            name: "home.webp".to_string(),
            bytes: b"x".to_vec(),
        };
        assert_eq!(artifact.write_to(&out).await.unwrap(), out.join("home.webp"));
    }
}
