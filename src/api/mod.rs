mod engine;
mod engine_config;
mod engine_init;
mod input;
mod interaction_controller;
pub mod label_format;
mod render_frame_builder;
mod render_style;
mod sticky_header;
mod time_selection;
mod title_clock;
mod update_guard;
mod window_manager;

pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use input::{InputOutcome, PointerButton, TimelineInput};
pub use render_frame_builder::{FrameInputs, build_render_frame, build_render_frame_with_headers};
pub use render_style::TimelineStyle;
pub use sticky_header::{DayHeaderPlacement, StickyHeaderState, StickyHeaderTracker};
pub use time_selection::TimeSelection;
pub use title_clock::TitleClock;
pub use update_guard::{DerivedUpdateGuard, SuppressionToken};
pub use window_manager::{JumpToNow, ShiftDirection, SlidingWindowManager, WindowShift};
