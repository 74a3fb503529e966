use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use timeline_rs::api::{
    PointerButton, ShiftDirection, TimelineEngine, TimelineEngineConfig, TimelineInput,
};
use timeline_rs::core::{FixedClock, Viewport};
use timeline_rs::interaction::InteractionMode;
use timeline_rs::render::{CanvasLayerKind, NullRenderer};
use timeline_rs::TimelineError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn afternoon() -> NaiveDateTime {
    date(2026, 10, 16).and_hms_opt(14, 30, 0).expect("valid time")
}

fn engine_with_clock(clock: Rc<FixedClock>) -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(Viewport::new(480, 720));
    TimelineEngine::with_clock(NullRenderer::default(), config, clock).expect("engine init")
}

fn engine() -> TimelineEngine<NullRenderer> {
    engine_with_clock(Rc::new(FixedClock::new(afternoon())))
}

fn engine_with_viewport(viewport: Viewport) -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(viewport);
    TimelineEngine::with_clock(NullRenderer::default(), config, FixedClock::new(afternoon()))
        .expect("engine init")
}

fn press(engine: &mut TimelineEngine<NullRenderer>, y: f64) {
    engine
        .handle_input(TimelineInput::PointerPressed {
            y,
            button: PointerButton::Primary,
            timestamp_ms: 0,
        })
        .expect("press");
}

#[test]
fn engine_starts_centered_on_now() {
    let engine = engine();

    assert_eq!(engine.window().anchor_start_date(), date(2026, 10, 15));
    assert_eq!(engine.scroll_value(), 1162.0);
    assert_eq!(engine.scroll_bounds(), (0.0, 1520.0));
    assert_eq!(engine.current_date(), date(2026, 10, 16));
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);

    let title = engine.title_clock();
    assert_eq!(title.time_text, "PM 2:30");
    assert!(title.date_text.is_empty());
    assert!(!title.shows_back_to_today());
}

#[test]
fn render_hands_a_valid_frame_to_the_renderer() {
    let mut engine = engine();
    engine.render().expect("render should succeed");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_line_count > 0);
    assert!(renderer.last_text_count > 0);
    assert!(renderer.last_frame.is_some());
}

#[test]
fn viewport_y_maps_back_to_wall_clock() {
    let engine = engine();
    assert_eq!(engine.datetime_at_viewport_y(41.0), afternoon());
    assert_eq!(
        engine.datetime_at_viewport_y(41.0 + 15.0),
        afternoon() + Duration::minutes(30)
    );
}

#[test]
fn drag_through_first_day_shifts_once_and_rebases() {
    let mut engine = engine();

    engine
        .handle_input(TimelineInput::PointerPressed {
            y: 100.0,
            button: PointerButton::Primary,
            timestamp_ms: 0,
        })
        .expect("press");
    let outcome = engine
        .handle_input(TimelineInput::PointerMoved {
            y: 600.0,
            timestamp_ms: 16,
        })
        .expect("move");

    let shift = outcome.window_shift.expect("day 0 reached");
    assert!(outcome.redraw);
    assert_eq!(shift.direction, ShiftDirection::Back);
    assert_eq!(shift.scroll_before, 662.0);
    assert_eq!(shift.scroll_after, 1406.0);
    assert_eq!(engine.window().anchor_start_date(), date(2026, 10, 14));

    let outcome = engine
        .handle_input(TimelineInput::PointerMoved {
            y: 610.0,
            timestamp_ms: 32,
        })
        .expect("move");
    assert_eq!(outcome.window_shift, None);
    assert_eq!(engine.scroll_value(), 1396.0);
    assert_eq!(engine.window().anchor_start_date(), date(2026, 10, 14));
    assert_eq!(engine.current_date(), date(2026, 10, 15));
}

#[test]
fn secondary_button_does_not_drag() {
    let mut engine = engine();
    engine
        .handle_input(TimelineInput::PointerPressed {
            y: 100.0,
            button: PointerButton::Secondary,
            timestamp_ms: 0,
        })
        .expect("press");
    let outcome = engine
        .handle_input(TimelineInput::PointerMoved {
            y: 300.0,
            timestamp_ms: 16,
        })
        .expect("move");

    assert!(!outcome.redraw);
    assert_eq!(engine.scroll_value(), 1162.0);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn fling_coasts_until_settled() {
    let mut engine = engine();
    engine
        .pointer_pressed(400.0, PointerButton::Primary, 0)
        .expect("press");
    for step in 1..=6_u64 {
        engine
            .pointer_moved(400.0 - step as f64 * 16.0, step * 16)
            .expect("move");
    }
    assert_eq!(
        engine.pointer_released(PointerButton::Primary),
        InteractionMode::Coasting
    );

    let mut redraws = Vec::new();
    while engine.interaction_mode() == InteractionMode::Coasting {
        let outcome = engine
            .handle_input(TimelineInput::InertiaTick)
            .expect("tick");
        redraws.push(outcome.redraw);
        assert!(redraws.len() < 1_000, "coast never settled");
    }
    // every tick moves except the one that finds the speed under threshold
    assert!(redraws.len() > 2);
    let (settling, moving) = redraws.split_last().expect("at least one tick");
    assert!(!settling);
    assert!(moving.iter().all(|redraw| *redraw));

    let idle = engine
        .handle_input(TimelineInput::InertiaTick)
        .expect("tick");
    assert!(!idle.redraw);
}

#[test]
fn wheel_scrolls_by_pixel_delta() {
    let mut engine = engine();
    let before = engine.scroll_value();

    let outcome = engine
        .handle_input(TimelineInput::Wheel { delta_px: 48.0 })
        .expect("wheel");
    assert!(outcome.redraw);
    assert_eq!(engine.scroll_value(), before + 48.0);
}

#[test]
fn tall_viewport_keeps_anchor_and_scroll_in_step() {
    let mut engine = engine_with_viewport(Viewport::new(480, 1600));
    assert_eq!(engine.scroll_bounds(), (0.0, 640.0));
    assert_eq!(engine.scroll_value(), 640.0);

    for _ in 0..4 {
        let shift = engine.scroll_by(30.0).expect("scroll");
        assert_eq!(shift, None);
        assert_eq!(engine.window().anchor_start_date(), date(2026, 10, 15));
        assert_eq!(engine.scroll_value(), 640.0);
    }

    let shift = engine.scroll_by(-30.0).expect("scroll");
    assert_eq!(shift, None);
    assert_eq!(engine.scroll_value(), 610.0);
    assert_eq!(engine.window().anchor_start_date(), date(2026, 10, 15));
    assert_eq!(engine.current_date(), date(2026, 10, 15));
}

#[test]
fn sticky_offset_change_moves_pinned_header_and_tracking_point() {
    let mut engine = engine();
    engine.set_scroll_value(1460.0).expect("scroll");
    assert_eq!(engine.window().anchor_start_date(), date(2026, 10, 15));

    let shift = engine
        .set_sticky_offset(30.0)
        .expect("offset")
        .expect("tracking point 1491 reaches the last day");
    assert_eq!(shift.direction, ShiftDirection::Forward);
    assert_eq!(engine.scroll_value(), 716.0);
    assert_eq!(engine.current_date(), date(2026, 10, 17));
    assert_eq!(engine.config().sticky_offset, 30.0);

    let pinned = engine.sticky_headers().pinned().expect("pinned header");
    assert_eq!(pinned.date, date(2026, 10, 17));
    assert_eq!(pinned.y, 746.0);

    for bad in [-1.0, f64::NAN] {
        let err = engine.set_sticky_offset(bad).expect_err("invalid offset");
        assert!(matches!(err, TimelineError::InvalidData(_)));
    }
    assert_eq!(engine.window_manager().sticky_offset(), 30.0);
}

#[test]
fn long_press_selects_and_drag_adjusts_time() {
    let mut engine = engine();
    press(&mut engine, 41.0);

    let outcome = engine
        .handle_input(TimelineInput::LongPressed { y: 41.0 })
        .expect("long press");
    assert!(outcome.redraw);
    assert_eq!(engine.interaction_mode(), InteractionMode::Selecting);
    let selection = engine.selection().expect("selection is live");
    assert_eq!(selection.anchor(), afternoon());

    // 15 px at 0.5 px/min is half an hour; scroll stays put
    let outcome = engine
        .handle_input(TimelineInput::PointerMoved {
            y: 56.0,
            timestamp_ms: 400,
        })
        .expect("move");
    assert!(outcome.redraw);
    assert_eq!(outcome.window_shift, None);
    assert_eq!(engine.scroll_value(), 1162.0);
    assert_eq!(
        engine.selection().map(|selection| selection.selected()),
        Some(afternoon() + Duration::minutes(30))
    );

    let frame = engine.build_render_frame();
    let marker = frame
        .layers_of(CanvasLayerKind::Selection)
        .next()
        .expect("selection layer");
    assert_eq!(marker.texts[0].text(), "15시 00분");
    frame.validate().expect("layers stay in paint order");

    let outcome = engine
        .handle_input(TimelineInput::PointerReleased {
            button: PointerButton::Primary,
        })
        .expect("release");
    assert_eq!(
        outcome.selected_time,
        Some(afternoon() + Duration::minutes(30))
    );
    assert_eq!(engine.selection(), None);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(
        engine
            .build_render_frame()
            .layers_of(CanvasLayerKind::Selection)
            .count(),
        0
    );
}

#[test]
fn plain_drag_reports_no_selected_time() {
    let mut engine = engine();
    press(&mut engine, 300.0);
    engine
        .handle_input(TimelineInput::PointerMoved {
            y: 299.0,
            timestamp_ms: 100,
        })
        .expect("move");
    let outcome = engine
        .handle_input(TimelineInput::PointerReleased {
            button: PointerButton::Primary,
        })
        .expect("release");

    assert_eq!(outcome.selected_time, None);
    assert!(!engine.cancel_selection());
    assert!(matches!(
        engine.begin_selection(f64::NAN),
        Err(TimelineError::InvalidData(_))
    ));
}

#[test]
fn non_finite_input_is_rejected() {
    let mut engine = engine();

    let err = engine
        .handle_input(TimelineInput::Wheel {
            delta_px: f64::NAN,
        })
        .expect_err("nan delta");
    assert!(matches!(err, TimelineError::InvalidData(_)));

    let err = engine
        .handle_input(TimelineInput::PointerPressed {
            y: f64::INFINITY,
            button: PointerButton::Primary,
            timestamp_ms: 0,
        })
        .expect_err("infinite pointer");
    assert!(matches!(err, TimelineError::InvalidData(_)));
    assert_eq!(engine.scroll_value(), 1162.0);
}

#[test]
fn resize_updates_extent_and_reclamps() {
    let mut engine = engine();

    let outcome = engine
        .handle_input(TimelineInput::ViewportResized(Viewport::new(480, 1000)))
        .expect("resize");
    assert!(outcome.redraw);
    assert_eq!(engine.scroll_bounds(), (0.0, 1240.0));
    assert_eq!(engine.scroll_value(), 1162.0);

    engine
        .set_viewport(Viewport::new(480, 1200))
        .expect("resize");
    assert_eq!(engine.scroll_value(), 1040.0);
    assert_eq!(engine.viewport(), Viewport::new(480, 1200));

    let err = engine
        .set_viewport(Viewport::new(0, 1200))
        .expect_err("empty viewport");
    assert!(matches!(
        err,
        TimelineError::InvalidViewport {
            width: 0,
            height: 1200
        }
    ));
}

#[test]
fn repaint_tick_redraws_only_when_the_second_changes() {
    let clock = Rc::new(FixedClock::new(afternoon()));
    let mut engine = engine_with_clock(Rc::clone(&clock));

    let idle = engine
        .handle_input(TimelineInput::RepaintTick)
        .expect("tick");
    assert!(!idle.redraw);

    clock.advance(Duration::seconds(1));
    let tick = engine
        .handle_input(TimelineInput::RepaintTick)
        .expect("tick");
    assert!(tick.redraw);
    assert_eq!(engine.now(), afternoon() + Duration::seconds(1));
}

#[test]
fn title_clock_offers_back_to_today_when_scrolled_away() {
    let mut engine = engine();

    let shift = engine
        .set_scroll_value(400.0)
        .expect("scroll")
        .expect("day 0 reached");
    assert_eq!(shift.scroll_after, 1144.0);
    assert_eq!(engine.current_date(), date(2026, 10, 15));

    let outcome = engine
        .handle_input(TimelineInput::TitleClockTick)
        .expect("tick");
    assert!(outcome.title_changed);
    assert!(!outcome.redraw);
    assert_eq!(engine.title_clock().date_text, "10-16 금");
    assert!(engine.title_clock().shows_back_to_today());

    let outcome = engine
        .handle_input(TimelineInput::JumpToNow)
        .expect("jump");
    assert!(outcome.title_changed);
    assert_eq!(engine.current_date(), date(2026, 10, 16));
    assert!(engine.title_clock().date_text.is_empty());
}

#[test]
fn jump_to_now_follows_the_clock_into_a_new_window() {
    let clock = Rc::new(FixedClock::new(afternoon()));
    let mut engine = engine_with_clock(Rc::clone(&clock));

    clock.advance(Duration::days(3));
    let jump = engine.jump_to_now();

    assert!(jump.anchor_reset);
    assert_eq!(jump.anchor_start_date, date(2026, 10, 18));
    assert_eq!(engine.scroll_value(), 1162.0);
    assert_eq!(engine.current_date(), date(2026, 10, 19));
    assert_abs_diff_eq!(jump.scroll_value, 1162.0);
}

#[test]
fn config_round_trips_through_json() {
    let config = TimelineEngineConfig::new(Viewport::new(480, 720))
        .with_window_days(2, 3)
        .with_sticky_offset(4.0);

    let json = config.to_json_string().expect("serialize");
    let restored = TimelineEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored.viewport, config.viewport);
    assert_eq!((restored.days_before, restored.days_after), (2, 3));
    assert_eq!(restored.sticky_offset, 4.0);
    assert_eq!(restored.scale, config.scale);
    assert_eq!(restored.weekday_locale, config.weekday_locale);
    assert_abs_diff_eq!(
        restored.style.now_color.red,
        config.style.now_color.red,
        epsilon = 1e-12
    );
}

#[test]
fn partial_json_config_uses_defaults() {
    let config = TimelineEngineConfig::from_json_str(
        r#"{ "viewport": { "width": 320, "height": 640 }, "scale": { "minute_height": 1.0 } }"#,
    )
    .expect("parse");

    assert_eq!(config.days_before, 1);
    assert_eq!(config.days_after, 1);
    assert_eq!(config.now_clearance, 17.0);
    assert_eq!(config.scale.minute_height, 1.0);
    assert_eq!(config.scale.day_bar_height, 24.0);
    assert_eq!(config.inertia.decel_rate, 0.0028);
}

#[test]
fn invalid_config_is_rejected_before_construction() {
    let err = TimelineEngineConfig::from_json_str(
        r#"{ "viewport": { "width": 320, "height": 640 }, "scale": { "minute_height": 0.0 } }"#,
    )
    .expect_err("zero minute height");
    assert!(matches!(err, TimelineError::InvalidConfig(_)));

    let err = TimelineEngineConfig::from_json_str("{ not json").expect_err("malformed");
    assert!(matches!(err, TimelineError::InvalidConfig(_)));

    let config = TimelineEngineConfig::new(Viewport::new(0, 720));
    let result = TimelineEngine::new(NullRenderer::default(), config);
    assert!(matches!(
        result,
        Err(TimelineError::InvalidViewport { width: 0, .. })
    ));
}
