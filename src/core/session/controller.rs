//! Plugin session
//!
//! Owns the migrated settings and the current selection and reacts to
//! [`PluginEvent`]s. Settings are persisted on every change; store failures
//! are logged and never surface to the caller.

use super::events::{NodeImages, PluginEvent};
use crate::core::export::{ExportCoordinator, ExportOptions, ExportOutcome};
use crate::core::settings::{migrate_value, Settings, SettingsManager};
use crate::domain::{ExporterError, Result, SelectedNode};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the result channel
const RESULT_CHANNEL_CAPACITY: usize = 16;

/// Event-driven controller for one plugin session
pub struct PluginSession {
    settings: Settings,
    selection: Vec<SelectedNode>,
    manager: SettingsManager,
    coordinator: Arc<ExportCoordinator>,
    results: broadcast::Sender<PluginEvent>,
}

impl PluginSession {
    /// Start a session
    ///
    /// Loads the stored settings, migrates them and saves the migrated record
    /// back. A store failure falls back to defaults.
    pub async fn start(manager: SettingsManager, coordinator: Arc<ExportCoordinator>) -> Self {
        let settings = manager.load_and_upgrade().await;
        let (results, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);

        tracing::info!(
            structure = %settings.export_structure,
            quality = %settings.export_quality,
            scales = settings.scales().len(),
            "Session started"
        );

        Self {
            settings,
            selection: Vec::new(),
            manager,
            coordinator,
            results,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selection(&self) -> &[SelectedNode] {
        &self.selection
    }

    pub fn coordinator(&self) -> &ExportCoordinator {
        &self.coordinator
    }

    /// Receive every `RENDER_RESULT` published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PluginEvent> {
        self.results.subscribe()
    }

    /// Handle one event
    ///
    /// # Returns
    ///
    /// The export outcome for `RENDER_REQUEST`, `None` for every other event.
    ///
    /// # Errors
    ///
    /// Only a failed export is reported; settings persistence failures are
    /// logged. `RENDER_RESULT` is outbound only and is rejected.
    pub async fn handle(&mut self, event: PluginEvent) -> Result<Option<ExportOutcome>> {
        tracing::debug!(event = event.name(), "Handling event");

        match event {
            PluginEvent::SelectionChanged {
                total_pixel_size,
                nodes,
                ..
            } => {
                tracing::info!(nodes = nodes.len(), total_pixel_size, "Selection changed");
                self.selection = nodes;
                Ok(None)
            }
            PluginEvent::RenderRequest { scales, file_name } => {
                let mut options = ExportOptions::from_settings(&self.settings);
                if !scales.is_empty() {
                    options.scales = scales;
                }
                options.file_name = file_name;
                self.export(&options).await.map(Some)
            }
            PluginEvent::SaveSettings { settings } => {
                self.settings = migrate_value(Some(settings));
                self.persist().await;
                Ok(None)
            }
            PluginEvent::Resize { size } => {
                self.settings.plugin_window_size = size.normalized();
                self.persist().await;
                Ok(None)
            }
            PluginEvent::RenderResult { .. } => Err(ExporterError::Validation(
                "RENDER_RESULT is published by the session, not handled".to_string(),
            )),
        }
    }

    /// Change the settings for this session only, without persisting
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Change the settings in place and persist them
    pub async fn update_settings(&mut self, update: impl FnOnce(&mut Settings)) {
        update(&mut self.settings);
        self.persist().await;
    }

    async fn export(&self, options: &ExportOptions) -> Result<ExportOutcome> {
        // The selection is captured here; a later selection change does not
        // cancel this export.
        let selection = self.selection.clone();
        let outcome = self.coordinator.export(&selection, options).await?;

        if outcome.artifact.is_some() {
            let nodes = outcome
                .nodes
                .iter()
                .map(|n| NodeImages {
                    name: n.base_name.clone(),
                    images: n.images.clone(),
                })
                .collect();
            // No subscribers is fine
            let _ = self.results.send(PluginEvent::RenderResult { nodes });
        }

        Ok(outcome)
    }

    async fn persist(&self) {
        if let Err(e) = self.manager.save(&self.settings).await {
            tracing::warn!(error = %e, "Failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MemoryStore;
    use crate::adapters::traits::{Compressor, Renderer, SettingsStore};
    use crate::adapters::ZipArchiveFactory;
    use crate::core::settings::{WindowSize, SETTINGS_KEY};
    use crate::domain::{ExportStructure, Scale};
    use async_trait::async_trait;
    use serde_json::json;

    struct StubRenderer;

    #[async_trait]
    impl Renderer for StubRenderer {
        async fn render(&self, node: &SelectedNode, scale: Scale) -> Result<Vec<u8>> {
            Ok(format!("{}:{}", node.id, scale).into_bytes())
        }
    }

    struct StubCompressor;

    #[async_trait]
    impl Compressor for StubCompressor {
        async fn compress(&self, raw_image: &[u8], _quality: f32) -> Result<Vec<u8>> {
            Ok(raw_image.to_vec())
        }
    }

    async fn session(store: Arc<MemoryStore>) -> PluginSession {
        let coordinator = ExportCoordinator::new(
            Arc::new(StubRenderer),
            Arc::new(StubCompressor),
            Arc::new(ZipArchiveFactory::new()),
        );
        PluginSession::start(SettingsManager::new(store), Arc::new(coordinator)).await
    }

    #[tokio::test]
    async fn test_start_migrates_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let session = session(store.clone()).await;

        assert_eq!(session.settings().export_structure, ExportStructure::Web);
        let stored = store.get(SETTINGS_KEY).await.unwrap().unwrap();
        assert_eq!(stored["selectedExportScalesV2"], json!([1.0, 2.0, 3.0, 4.0]));
    }

    #[tokio::test]
    async fn test_render_request_publishes_result() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(store).await;
        let mut results = session.subscribe();

        session
            .handle(PluginEvent::SelectionChanged {
                total_pixel_size: 100,
                nodes: vec![SelectedNode::new("7", "Badge")],
                preview_images: Vec::new(),
            })
            .await
            .unwrap();

        let outcome = session
            .handle(PluginEvent::RenderRequest {
                scales: vec![Scale::whole(2)],
                file_name: None,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.artifact.unwrap().name(), "badge_2x.webp");

        match results.recv().await.unwrap() {
            PluginEvent::RenderResult { nodes } => {
                assert_eq!(nodes.len(), 1);
                assert_eq!(nodes[0].name, "badge");
                assert_eq!(nodes[0].images[0].image, b"7:2".to_vec());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_settings_migrates_before_storing() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(store.clone()).await;

        session
            .handle(PluginEvent::SaveSettings {
                settings: json!({"useAndroidExport": true}),
            })
            .await
            .unwrap();

        assert_eq!(
            session.settings().export_structure,
            ExportStructure::Android
        );
        let stored = store.get(SETTINGS_KEY).await.unwrap().unwrap();
        assert_eq!(stored["exportStructure"], json!("android"));
    }

    #[tokio::test]
    async fn test_save_settings_keeps_fields_next_to_a_bad_one() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(store).await;

        session
            .handle(PluginEvent::SaveSettings {
                settings: json!({"exportStructure": "ios", "exportQuality": "max"}),
            })
            .await
            .unwrap();

        assert_eq!(session.settings().export_structure, ExportStructure::Ios);
        assert_eq!(session.settings().export_quality.percent(), 90);
    }

    #[tokio::test]
    async fn test_resize_clamps_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(store.clone()).await;

        session
            .handle(PluginEvent::Resize {
                size: WindowSize {
                    width: 500,
                    height: 100,
                },
            })
            .await
            .unwrap();

        assert_eq!(
            session.settings().plugin_window_size,
            WindowSize {
                width: 320,
                height: 580
            }
        );
        let stored = store.get(SETTINGS_KEY).await.unwrap().unwrap();
        assert_eq!(stored["pluginWindowSize"]["height"], json!(580));
    }

    #[tokio::test]
    async fn test_render_result_is_not_accepted() {
        let mut session = session(Arc::new(MemoryStore::new())).await;
        let result = session
            .handle(PluginEvent::RenderResult { nodes: Vec::new() })
            .await;
        assert!(result.is_err());
    }
}
