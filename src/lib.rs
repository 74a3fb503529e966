//! timeline-rs: an endless vertical day timeline.
//!
//! The crate keeps a small window of days materialized and slides it one day
//! at a time as the user scrolls, compensating the scroll offset so the
//! content under the pointer never jumps. Rendering goes through the
//! backend-agnostic `RenderFrame`; a Cairo backend and a GTK4 adapter are
//! available behind features.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{TimelineEngine, TimelineEngineConfig, TimelineInput};
pub use error::{TimelineError, TimelineResult};
