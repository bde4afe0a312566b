//! Domain models and types for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Value types** ([`Scale`], [`SelectedNode`], [`RenderedImage`])
//! - **Naming vocabulary** ([`ExportStructure`], [`NamingConvention`], [`NamingTransform`])
//! - **Error types** ([`ExporterError`], [`RenderError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ExporterError>`]:
//!
//! ```rust
//! use webp_exporter::domain::{ExporterError, Result, Scale};
//!
//! fn parse(value: f64) -> Result<Scale> {
//!     Scale::new(value).map_err(ExporterError::Validation)
//! }
//! # assert!(parse(2.0).is_ok());
//! ```

pub mod errors;
pub mod naming;
pub mod node;
pub mod result;
pub mod scale;

// Re-export commonly used types for convenience
pub use errors::{ExporterError, RenderError};
pub use naming::{ExportStructure, NamingConvention, NamingTransform};
pub use node::{RenderedImage, SelectedNode};
pub use result::Result;
pub use scale::{Scale, MAX_SCALE};
