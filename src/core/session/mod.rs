//! Event-driven plugin session
//!
//! - [`events`] - UI-facing events and their wire shape
//! - [`controller`] - the session that owns settings and selection

pub mod controller;
pub mod events;

pub use controller::PluginSession;
pub use events::{NodeImages, PluginEvent};
