use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use crate::core::{ClockSource, CoordinateMapper, ScrollPort, ScrollState, TimelineWindow, Viewport};
use crate::error::TimelineResult;
use crate::interaction::{InertialScroll, InteractionMode};
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::{FrameInputs, build_render_frame_with_headers};
use super::{
    DerivedUpdateGuard, SlidingWindowManager, StickyHeaderState, StickyHeaderTracker,
    TimeSelection, TimelineEngineConfig, TimelineStyle, TitleClock,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the scroll position, the sliding day window, drag
/// inertia and the clock sample used for the now-marker, and turns them into
/// render frames for the configured renderer.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineEngineConfig,
    pub(super) viewport: Viewport,
    pub(super) scroll: ScrollState,
    pub(super) windows: SlidingWindowManager,
    pub(super) inertia: InertialScroll,
    pub(super) guard: DerivedUpdateGuard,
    pub(super) clock: Box<dyn ClockSource>,
    pub(super) now: NaiveDateTime,
    pub(super) title: TitleClock,
    pub(super) selection: Option<TimeSelection>,
}

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn config(&self) -> TimelineEngineConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn style(&self) -> TimelineStyle {
        self.config.style
    }

    #[must_use]
    pub fn window(&self) -> TimelineWindow {
        self.windows.window()
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.windows.mapper()
    }

    #[must_use]
    pub fn window_manager(&self) -> &SlidingWindowManager {
        &self.windows
    }

    #[must_use]
    pub fn scroll_value(&self) -> f64 {
        self.scroll.value()
    }

    /// Scroll range as `(minimum, maximum)`.
    #[must_use]
    pub fn scroll_bounds(&self) -> (f64, f64) {
        (self.scroll.minimum(), self.scroll.maximum())
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        if self.selection.is_some() {
            InteractionMode::Selecting
        } else {
            self.inertia.mode()
        }
    }

    /// Live long-press selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TimeSelection> {
        self.selection
    }

    #[must_use]
    pub fn inertia(&self) -> &InertialScroll {
        &self.inertia
    }

    /// Clock sample used by the last frame and title update.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Day under the sticky header.
    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.windows.current_date(self.scroll.value())
    }

    #[must_use]
    pub fn title_clock(&self) -> &TitleClock {
        &self.title
    }

    #[must_use]
    pub fn sticky_headers(&self) -> StickyHeaderState {
        StickyHeaderTracker::track(&self.windows, self.scroll.value())
    }

    /// Maps a viewport-relative `y` to the wall-clock moment drawn there.
    #[must_use]
    pub fn datetime_at_viewport_y(&self, viewport_y: f64) -> NaiveDateTime {
        let mapper = self.windows.mapper();
        let minutes = mapper.minutes_for_y(self.scroll.value() + viewport_y);
        self.windows.window().datetime_at(mapper.split_minutes(minutes))
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let scroll_top = self.scroll.value();
        let headers = StickyHeaderTracker::track(&self.windows, scroll_top);
        let inputs = FrameInputs {
            viewport: self.viewport,
            scroll_top,
            manager: &self.windows,
            style: self.config.style,
            locale: self.config.weekday_locale,
            now: self.now,
            selection: self.selection.map(|selection| selection.selected()),
        };
        build_render_frame_with_headers(&inputs, &headers)
    }

    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.build_render_frame();
        trace!(
            scroll = self.scroll.value(),
            layers = frame.layers.len(),
            "render frame"
        );
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> TimelineResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
