use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Viewport;
use crate::error::TimelineResult;
use crate::render::Renderer;

use super::{TimelineEngine, WindowShift};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Every event a host toolkit can feed into the engine.
///
/// Timestamps are event times in milliseconds from any monotonic origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineInput {
    PointerPressed {
        y: f64,
        button: PointerButton,
        timestamp_ms: u64,
    },
    PointerMoved {
        y: f64,
        timestamp_ms: u64,
    },
    PointerReleased {
        button: PointerButton,
    },
    /// The primary button was held still long enough to pick a time.
    LongPressed {
        y: f64,
    },
    /// Wheel/touchpad scroll in pixels; positive moves later in time.
    Wheel {
        delta_px: f64,
    },
    ViewportResized(Viewport),
    /// 1 Hz now-marker refresh.
    RepaintTick,
    /// 100 ms title clock refresh.
    TitleClockTick,
    /// 16 ms inertia step.
    InertiaTick,
    JumpToNow,
}

/// What the host has to do after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputOutcome {
    /// The canvas content changed and should be queued for drawing.
    pub redraw: bool,
    pub window_shift: Option<WindowShift>,
    /// The title clock text changed.
    pub title_changed: bool,
    /// Time picked by a long press, reported once when the press ends.
    pub selected_time: Option<NaiveDateTime>,
}

impl InputOutcome {
    fn redraw_with(window_shift: Option<WindowShift>) -> Self {
        Self {
            redraw: true,
            window_shift,
            ..Self::default()
        }
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Single dispatch point for toolkit events.
    pub fn handle_input(&mut self, input: TimelineInput) -> TimelineResult<InputOutcome> {
        trace!(?input, "timeline input");
        let outcome = match input {
            TimelineInput::PointerPressed {
                y,
                button,
                timestamp_ms,
            } => {
                self.pointer_pressed(y, button, timestamp_ms)?;
                InputOutcome::default()
            }
            TimelineInput::PointerMoved { y, timestamp_ms } => {
                let before = (self.scroll_value(), self.selection());
                let shift = self.pointer_moved(y, timestamp_ms)?;
                InputOutcome {
                    redraw: shift.is_some() || (self.scroll_value(), self.selection()) != before,
                    window_shift: shift,
                    ..InputOutcome::default()
                }
            }
            TimelineInput::PointerReleased { button } => {
                let selected_time = if button == PointerButton::Primary {
                    self.finish_selection()
                } else {
                    None
                };
                self.pointer_released(button);
                InputOutcome {
                    redraw: selected_time.is_some(),
                    selected_time,
                    ..InputOutcome::default()
                }
            }
            TimelineInput::LongPressed { y } => {
                self.begin_selection(y)?;
                InputOutcome::redraw_with(None)
            }
            TimelineInput::Wheel { delta_px } => {
                InputOutcome::redraw_with(self.scroll_by(delta_px)?)
            }
            TimelineInput::ViewportResized(viewport) => {
                InputOutcome::redraw_with(self.set_viewport(viewport)?)
            }
            TimelineInput::RepaintTick => InputOutcome {
                redraw: self.refresh_clock(),
                ..InputOutcome::default()
            },
            TimelineInput::TitleClockTick => InputOutcome {
                title_changed: self.refresh_title_clock(),
                ..InputOutcome::default()
            },
            TimelineInput::InertiaTick => {
                let (step, shift) = self.step_inertia();
                InputOutcome {
                    redraw: step.moved(),
                    window_shift: shift,
                    ..InputOutcome::default()
                }
            }
            TimelineInput::JumpToNow => {
                self.jump_to_now();
                InputOutcome {
                    redraw: true,
                    title_changed: true,
                    ..InputOutcome::default()
                }
            }
        };
        Ok(outcome)
    }
}
