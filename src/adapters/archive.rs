//! ZIP archive assembly

use super::traits::{ArchiveBuilder, ArchiveFactory};
use crate::domain::Result;
use async_trait::async_trait;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Creates in-memory ZIP archives
#[derive(Debug, Clone, Default)]
pub struct ZipArchiveFactory;

impl ZipArchiveFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveFactory for ZipArchiveFactory {
    fn new_archive(&self) -> Box<dyn ArchiveBuilder> {
        Box::new(ZipArchive::new())
    }
}

/// In-memory ZIP archive
pub struct ZipArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl ZipArchive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            // WebP is already compressed; deflate only helps the JSON manifests
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        }
    }
}

impl Default for ZipArchive {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveBuilder for ZipArchive {
    fn add_entry(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        self.writer.start_file(path, self.options)?;
        self.writer.write_all(bytes)?;
        self.entries += 1;
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.entries
    }

    async fn finalize(self: Box<Self>) -> Result<Vec<u8>> {
        let entries = self.entries;
        let cursor = self.writer.finish()?;
        let bytes = cursor.into_inner();
        tracing::debug!(entries, bytes = bytes.len(), "Finalized archive");
        Ok(bytes)
    }
}
