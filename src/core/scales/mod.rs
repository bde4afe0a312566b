//! Scale set management
//!
//! This module provides:
//! - [`ScaleSet`] - distinct export scales with add/remove/rename-in-place
//! - [`parse_scale_input`] - user text (`1.5x`, `hdpi`, `@2x`) to [`Scale`](crate::domain::Scale)
//! - [`ScaleField`] - an editable scale that reverts on invalid input

pub mod input;
pub mod set;

pub use input::{parse_scale_input, ScaleField};
pub use set::ScaleSet;
