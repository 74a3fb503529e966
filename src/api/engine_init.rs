use tracing::debug;

use crate::core::{ClockSource, CoordinateMapper, LocalClock, ScrollState, TimelineWindow};
use crate::error::TimelineResult;
use crate::interaction::InertialScroll;
use crate::render::Renderer;

use super::{
    DerivedUpdateGuard, SlidingWindowManager, TimelineEngine, TimelineEngineConfig, TitleClock,
};

impl<R: Renderer> TimelineEngine<R> {
    /// Creates an engine reading the local wall clock.
    pub fn new(renderer: R, config: TimelineEngineConfig) -> TimelineResult<Self> {
        Self::with_clock(renderer, config, LocalClock)
    }

    /// Creates an engine with an explicit clock source.
    ///
    /// The window is centered on the clock's current day and scrolled so the
    /// current minute sits just below the pinned header.
    pub fn with_clock(
        renderer: R,
        config: TimelineEngineConfig,
        clock: impl ClockSource + 'static,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        let now = clock.now();

        let window = TimelineWindow::centered_on(now.date(), config.days_before, config.days_after);
        let mapper = CoordinateMapper::new(config.scale, window.total_days());
        let scroll = ScrollState::new(mapper.content_height(), f64::from(config.viewport.height));
        let windows =
            SlidingWindowManager::new(window, mapper, config.sticky_offset, config.now_clearance);

        let mut engine = Self {
            renderer,
            config,
            viewport: config.viewport,
            scroll,
            windows,
            inertia: InertialScroll::new(config.inertia),
            guard: DerivedUpdateGuard::new(),
            clock: Box::new(clock),
            now,
            title: TitleClock::default(),
            selection: None,
        };
        engine
            .windows
            .jump_to_now(&mut engine.scroll, &engine.guard, now);
        engine.title = TitleClock::compose(now, engine.current_date(), config.weekday_locale);

        debug!(
            anchor = %engine.windows.window().anchor_start_date(),
            total_days = window.total_days(),
            content_height = mapper.content_height(),
            scroll = engine.scroll_value(),
            "timeline engine initialized"
        );
        Ok(engine)
    }
}
