use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use chrono::NaiveDateTime;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::{debug, warn};

use crate::api::{InputOutcome, PointerButton, TimelineEngine, TimelineInput, TitleClock};
use crate::core::Viewport;
use crate::interaction::InteractionMode;
use crate::render::{CairoContextRenderer, Renderer};

const REPAINT_INTERVAL: Duration = Duration::from_millis(1000);
const TITLE_CLOCK_INTERVAL: Duration = Duration::from_millis(100);
/// Pixels scrolled per wheel notch.
const WHEEL_STEP_PX: f64 = 48.0;
/// Scales GTK's long-press time (500 ms by default) down to a 300 ms hold.
const LONG_PRESS_DELAY_FACTOR: f64 = 0.6;

pub type SharedEngine<R> = Rc<RefCell<TimelineEngine<R>>>;
type SharedHooks = Rc<AdapterHooks>;

#[derive(Default)]
struct AdapterHooks {
    title: RefCell<Option<Box<dyn Fn(&TitleClock)>>>,
    selection: RefCell<Option<Box<dyn Fn(NaiveDateTime)>>>,
}

/// Binds a `TimelineEngine` to a GTK4 `DrawingArea`.
///
/// The adapter translates draw, drag, long-press, scroll and resize callbacks into
/// `TimelineInput` values and drives the periodic triggers with
/// `glib::timeout_add_local`. Timers hold weak references and stop once the
/// widget or engine is gone.
pub struct GtkTimelineAdapter<R: Renderer + CairoContextRenderer + 'static> {
    engine: SharedEngine<R>,
    drawing_area: gtk::DrawingArea,
    hooks: SharedHooks,
}

impl<R: Renderer + CairoContextRenderer + 'static> Clone for GtkTimelineAdapter<R> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            drawing_area: self.drawing_area.clone(),
            hooks: Rc::clone(&self.hooks),
        }
    }
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkTimelineAdapter<R> {
    #[must_use]
    pub fn new(engine: TimelineEngine<R>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        let adapter = Self {
            engine,
            drawing_area,
            hooks: Rc::new(AdapterHooks::default()),
        };
        adapter.attach_draw_func();
        adapter.attach_drag_gesture();
        adapter.attach_long_press_gesture();
        adapter.attach_scroll_controller();
        adapter.start_periodic_timers();
        adapter
    }

    #[must_use]
    pub fn engine(&self) -> SharedEngine<R> {
        Rc::clone(&self.engine)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Registers a callback fired whenever the title clock text changes.
    ///
    /// The hook is called once immediately with the current text.
    pub fn set_title_clock_hook<F>(&self, hook: F)
    where
        F: Fn(&TitleClock) + 'static,
    {
        if let Ok(engine) = self.engine.try_borrow() {
            hook(engine.title_clock());
        }
        *self.hooks.title.borrow_mut() = Some(Box::new(hook));
    }

    /// Registers a callback fired with the time picked by a long press once
    /// the press is released.
    pub fn set_selection_hook<F>(&self, hook: F)
    where
        F: Fn(NaiveDateTime) + 'static,
    {
        *self.hooks.selection.borrow_mut() = Some(Box::new(hook));
    }

    /// Scrolls back to the current time, e.g. from a "back to today" label.
    pub fn jump_to_now(&self) {
        dispatch(
            &self.engine,
            &self.drawing_area,
            &self.hooks,
            TimelineInput::JumpToNow,
        );
    }

    fn attach_draw_func(&self) {
        let engine = Rc::clone(&self.engine);
        self.drawing_area
            .set_draw_func(move |_widget, context, width, height| {
                if width <= 0 || height <= 0 {
                    return;
                }
                let Ok(mut timeline) = engine.try_borrow_mut() else {
                    return;
                };
                let viewport = Viewport::new(width as u32, height as u32);
                if timeline.viewport() != viewport {
                    if let Err(err) = timeline.handle_input(TimelineInput::ViewportResized(viewport))
                    {
                        warn!(error = %err, width, height, "viewport resize rejected");
                    }
                }
                if let Err(err) = timeline.render_on_cairo_context(context) {
                    warn!(error = %err, "timeline render failed");
                }
            });
    }

    fn attach_drag_gesture(&self) {
        let drag = gtk::GestureDrag::new();
        drag.set_button(0);

        {
            let engine = Rc::clone(&self.engine);
            let area = self.drawing_area.clone();
            let hooks = Rc::clone(&self.hooks);
            drag.connect_drag_begin(move |gesture, _x, y| {
                let input = TimelineInput::PointerPressed {
                    y,
                    button: pointer_button(gesture.current_button()),
                    timestamp_ms: u64::from(gesture.current_event_time()),
                };
                dispatch(&engine, &area, &hooks, input);
            });
        }

        {
            let engine = Rc::clone(&self.engine);
            let area = self.drawing_area.clone();
            let hooks = Rc::clone(&self.hooks);
            drag.connect_drag_update(move |gesture, _offset_x, offset_y| {
                let Some((_start_x, start_y)) = gesture.start_point() else {
                    return;
                };
                let input = TimelineInput::PointerMoved {
                    y: start_y + offset_y,
                    timestamp_ms: u64::from(gesture.current_event_time()),
                };
                dispatch(&engine, &area, &hooks, input);
            });
        }

        {
            let engine = Rc::clone(&self.engine);
            let area = self.drawing_area.clone();
            let hooks = Rc::clone(&self.hooks);
            let coasting = Rc::new(Cell::new(false));
            drag.connect_drag_end(move |gesture, _offset_x, _offset_y| {
                let input = TimelineInput::PointerReleased {
                    button: pointer_button(gesture.current_button()),
                };
                dispatch(&engine, &area, &hooks, input);

                let mode = engine
                    .try_borrow()
                    .map(|timeline| timeline.interaction_mode())
                    .unwrap_or(InteractionMode::Idle);
                if mode == InteractionMode::Coasting && !coasting.get() {
                    start_inertia_timer(
                        Rc::downgrade(&engine),
                        area.downgrade(),
                        Rc::clone(&hooks),
                        Rc::clone(&coasting),
                    );
                }
            });
        }

        self.drawing_area.add_controller(drag);
    }

    fn attach_long_press_gesture(&self) {
        let long_press = gtk::GestureLongPress::new();
        long_press.set_delay_factor(LONG_PRESS_DELAY_FACTOR);

        let engine = Rc::clone(&self.engine);
        let area = self.drawing_area.clone();
        let hooks = Rc::clone(&self.hooks);
        long_press.connect_pressed(move |_, _x, y| {
            dispatch(&engine, &area, &hooks, TimelineInput::LongPressed { y });
        });
        self.drawing_area.add_controller(long_press);
    }

    fn attach_scroll_controller(&self) {
        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        let engine = Rc::clone(&self.engine);
        let area = self.drawing_area.clone();
        let hooks = Rc::clone(&self.hooks);
        scroll.connect_scroll(move |_, _dx, dy| {
            if dy.abs() > f64::EPSILON {
                let input = TimelineInput::Wheel {
                    delta_px: dy * WHEEL_STEP_PX,
                };
                dispatch(&engine, &area, &hooks, input);
            }
            glib::Propagation::Stop
        });
        self.drawing_area.add_controller(scroll);
    }

    fn start_periodic_timers(&self) {
        for (interval, input) in [
            (REPAINT_INTERVAL, TimelineInput::RepaintTick),
            (TITLE_CLOCK_INTERVAL, TimelineInput::TitleClockTick),
        ] {
            let engine = Rc::downgrade(&self.engine);
            let area = self.drawing_area.downgrade();
            let hooks = Rc::clone(&self.hooks);
            glib::timeout_add_local(interval, move || {
                let (Some(engine), Some(area)) = (engine.upgrade(), area.upgrade()) else {
                    debug!(?input, "timer stopped after teardown");
                    return glib::ControlFlow::Break;
                };
                dispatch(&engine, &area, &hooks, input);
                glib::ControlFlow::Continue
            });
        }
    }
}

fn start_inertia_timer<R: Renderer + CairoContextRenderer + 'static>(
    engine: Weak<RefCell<TimelineEngine<R>>>,
    area: glib::WeakRef<gtk::DrawingArea>,
    hooks: SharedHooks,
    coasting: Rc<Cell<bool>>,
) {
    let interval_ms = engine
        .upgrade()
        .and_then(|engine| {
            engine
                .try_borrow()
                .map(|timeline| timeline.config().inertia.tick_interval_ms)
                .ok()
        })
        .unwrap_or(16.0);
    coasting.set(true);

    glib::timeout_add_local(Duration::from_millis(interval_ms.round() as u64), move || {
        let (Some(engine), Some(area)) = (engine.upgrade(), area.upgrade()) else {
            coasting.set(false);
            return glib::ControlFlow::Break;
        };
        dispatch(&engine, &area, &hooks, TimelineInput::InertiaTick);

        let still_coasting = engine
            .try_borrow()
            .map(|timeline| timeline.interaction_mode() == InteractionMode::Coasting)
            .unwrap_or(false);
        if still_coasting {
            glib::ControlFlow::Continue
        } else {
            coasting.set(false);
            glib::ControlFlow::Break
        }
    });
}

fn dispatch<R: Renderer + CairoContextRenderer + 'static>(
    engine: &SharedEngine<R>,
    area: &gtk::DrawingArea,
    hooks: &SharedHooks,
    input: TimelineInput,
) {
    let outcome = {
        let Ok(mut timeline) = engine.try_borrow_mut() else {
            return;
        };
        match timeline.handle_input(input) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, ?input, "timeline input rejected");
                return;
            }
        }
    };
    apply_outcome(engine, area, hooks, outcome);
}

fn apply_outcome<R: Renderer + CairoContextRenderer + 'static>(
    engine: &SharedEngine<R>,
    area: &gtk::DrawingArea,
    hooks: &SharedHooks,
    outcome: InputOutcome,
) {
    if outcome.redraw || outcome.window_shift.is_some() {
        area.queue_draw();
    }
    if let Some(selected) = outcome.selected_time {
        if let Some(hook) = hooks.selection.borrow().as_ref() {
            hook(selected);
        }
    }
    if !outcome.title_changed {
        return;
    }
    let Ok(timeline) = engine.try_borrow() else {
        return;
    };
    if let Some(hook) = hooks.title.borrow().as_ref() {
        hook(timeline.title_clock());
    }
}

fn pointer_button(button: u32) -> PointerButton {
    match button {
        2 => PointerButton::Middle,
        3 => PointerButton::Secondary,
        _ => PointerButton::Primary,
    }
}
