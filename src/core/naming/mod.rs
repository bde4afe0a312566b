//! File naming: sanitizing node names and deriving per-platform paths
//!
//! - [`sanitize`] turns a layer name into a file-safe base name
//! - [`name_for`] applies the Android/iOS/web/flat rule to a base name and scale

pub mod rules;
pub mod sanitize;

pub use rules::{android_bucket, ios_suffix, name_for, scale_from_label, scale_label};
pub use sanitize::{sanitize, MAX_NAME_LENGTH};
