use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::core::{ScrollPort, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{CoastStep, InteractionMode};
use crate::render::Renderer;

use super::{JumpToNow, PointerButton, TimeSelection, TimelineEngine, TitleClock, WindowShift};

impl<R: Renderer> TimelineEngine<R> {
    /// Starts a drag gesture. Only the primary button drags.
    ///
    /// Returns `true` when a drag began; any running coast or stale
    /// selection is cancelled.
    pub fn pointer_pressed(
        &mut self,
        pointer_y: f64,
        button: PointerButton,
        timestamp_ms: u64,
    ) -> TimelineResult<bool> {
        validate_finite("pointer y", pointer_y)?;
        if button != PointerButton::Primary {
            return Ok(false);
        }
        self.selection = None;
        self.inertia
            .pointer_down(pointer_y, timestamp_ms, &self.scroll);
        Ok(true)
    }

    /// Applies a drag move, then lets the window manager react to the new
    /// scroll position. While a selection is live the move adjusts the
    /// selected time instead.
    pub fn pointer_moved(
        &mut self,
        pointer_y: f64,
        timestamp_ms: u64,
    ) -> TimelineResult<Option<WindowShift>> {
        validate_finite("pointer y", pointer_y)?;
        if let Some(selection) = self.selection.as_mut() {
            let minute_height = self.windows.mapper().scale().minute_height;
            let selected = selection.drag_to(pointer_y, minute_height);
            trace!(%selected, "selection adjusted");
            return Ok(None);
        }
        if self
            .inertia
            .pointer_move(pointer_y, timestamp_ms, &mut self.scroll)
            .is_none()
        {
            return Ok(None);
        }
        Ok(self.evaluate_window())
    }

    /// Ends the gesture. A primary release also ends a live selection; use
    /// `finish_selection` first to read the picked time.
    pub fn pointer_released(&mut self, button: PointerButton) -> InteractionMode {
        if button != PointerButton::Primary {
            return self.interaction_mode();
        }
        self.selection = None;
        self.inertia.pointer_up()
    }

    /// Turns a held press at `viewport_y` into a time selection.
    ///
    /// The drag in progress is dropped so later moves adjust the selection
    /// rather than scroll. Returns the time under the pointer.
    pub fn begin_selection(&mut self, viewport_y: f64) -> TimelineResult<NaiveDateTime> {
        validate_finite("selection y", viewport_y)?;
        self.inertia.cancel();
        let anchor = self.datetime_at_viewport_y(viewport_y);
        self.selection = Some(TimeSelection::begin(anchor, viewport_y));
        debug!(%anchor, "time selection started");
        Ok(anchor)
    }

    /// Ends a live selection and returns the picked time.
    pub fn finish_selection(&mut self) -> Option<NaiveDateTime> {
        let selected = self.selection.take()?.selected();
        debug!(%selected, "time selection finished");
        Some(selected)
    }

    /// Drops a live selection without reporting it.
    ///
    /// Returns `true` when there was one to drop.
    pub fn cancel_selection(&mut self) -> bool {
        self.selection.take().is_some()
    }

    /// Wheel or touchpad scroll by a pixel delta; cancels any coast.
    pub fn scroll_by(&mut self, delta_px: f64) -> TimelineResult<Option<WindowShift>> {
        validate_finite("scroll delta", delta_px)?;
        if self.inertia.mode() == InteractionMode::Coasting {
            self.inertia.cancel();
        }
        let target = self.scroll.value() + delta_px;
        self.scroll.set_value(target);
        Ok(self.evaluate_window())
    }

    /// Writes an absolute scroll value, as a native scrollbar would.
    pub fn set_scroll_value(&mut self, value: f64) -> TimelineResult<Option<WindowShift>> {
        validate_finite("scroll value", value)?;
        self.scroll.set_value(value);
        Ok(self.evaluate_window())
    }

    /// Resizes the viewport, updates the scroll extent and re-evaluates the
    /// window when the re-clamp moved the scroll value.
    pub fn set_viewport(&mut self, viewport: Viewport) -> TimelineResult<Option<WindowShift>> {
        if !viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.config.viewport = viewport;

        let before = self.scroll.value();
        let content_height = self.windows.mapper().content_height();
        self.scroll
            .set_extent(content_height, f64::from(viewport.height));
        debug!(
            width = viewport.width,
            height = viewport.height,
            scroll_before = before,
            scroll_after = self.scroll.value(),
            "viewport resized"
        );

        if self.scroll.value() == before {
            return Ok(None);
        }
        Ok(self.evaluate_window())
    }

    /// Moves the pinned header band `offset` pixels below the viewport top.
    ///
    /// The day tracking point moves with it, so the window is re-evaluated.
    pub fn set_sticky_offset(&mut self, offset: f64) -> TimelineResult<Option<WindowShift>> {
        if !offset.is_finite() || offset < 0.0 {
            return Err(TimelineError::InvalidData(
                "sticky offset must be finite and >= 0".to_owned(),
            ));
        }
        self.config.sticky_offset = offset;
        self.windows.set_sticky_offset(offset);
        debug!(offset, "sticky offset changed");
        Ok(self.evaluate_window())
    }

    /// Advances one inertia tick.
    pub fn step_inertia(&mut self) -> (CoastStep, Option<WindowShift>) {
        let step = self.inertia.tick(&mut self.scroll);
        if !step.moved() {
            return (step, None);
        }
        (step, self.evaluate_window())
    }

    /// Samples the clock, recenters if today left the window, and scrolls
    /// the current minute under the pinned header.
    pub fn jump_to_now(&mut self) -> JumpToNow {
        self.inertia.cancel();
        self.now = self.clock.now();
        let jump = self
            .windows
            .jump_to_now(&mut self.scroll, &self.guard, self.now);
        self.recompose_title(self.now);
        jump
    }

    /// Re-samples the clock for the now-marker.
    ///
    /// Returns `true` when the displayed second changed.
    pub fn refresh_clock(&mut self) -> bool {
        let previous = self.now;
        self.now = self.clock.now();
        let changed = previous.and_utc().timestamp() != self.now.and_utc().timestamp();
        trace!(now = %self.now, changed, "clock sampled");
        changed
    }

    /// Recomposes the title text from a fresh clock sample.
    ///
    /// The now-marker keeps its own sample, so this does not move it.
    /// Returns `true` when the text differs from the previous update.
    pub fn refresh_title_clock(&mut self) -> bool {
        let now = self.clock.now();
        self.recompose_title(now)
    }

    fn recompose_title(&mut self, now: NaiveDateTime) -> bool {
        let title = TitleClock::compose(now, self.current_date(), self.config.weekday_locale);
        if title == self.title {
            return false;
        }
        self.title = title;
        true
    }

    /// Runs the window manager after a user-visible scroll write.
    ///
    /// A shift in the middle of a drag rebases the gesture so the next move
    /// keeps the compensation.
    fn evaluate_window(&mut self) -> Option<WindowShift> {
        let shift = self.windows.on_scroll_changed(&mut self.scroll, &self.guard)?;
        self.inertia.rebase(shift.scroll_delta());
        Some(shift)
    }
}

fn validate_finite(name: &str, value: f64) -> TimelineResult<()> {
    if !value.is_finite() {
        return Err(TimelineError::InvalidData(format!("{name} must be finite")));
    }
    Ok(())
}
