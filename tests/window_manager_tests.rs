use chrono::{Days, NaiveDate, NaiveDateTime};
use timeline_rs::api::{DerivedUpdateGuard, ShiftDirection, SlidingWindowManager};
use timeline_rs::core::{
    CoordinateMapper, ScaleConfig, ScrollPort, ScrollState, TimelineWindow,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(date: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, s).expect("valid time")
}

fn setup(days_before: u32, days_after: u32) -> (SlidingWindowManager, ScrollState) {
    setup_with(days_before, days_after, 720.0, 0.0)
}

fn setup_with(
    days_before: u32,
    days_after: u32,
    viewport_height: f64,
    sticky_offset: f64,
) -> (SlidingWindowManager, ScrollState) {
    let window = TimelineWindow::centered_on(date(2026, 10, 16), days_before, days_after);
    let mapper = CoordinateMapper::new(ScaleConfig::default(), window.total_days());
    let scroll = ScrollState::new(mapper.content_height(), viewport_height);
    (
        SlidingWindowManager::new(window, mapper, sticky_offset, 17.0),
        scroll,
    )
}

#[test]
fn reaching_first_day_shifts_back_by_one_block() {
    let (mut manager, mut scroll) = setup(1, 1);
    let guard = DerivedUpdateGuard::new();
    scroll.set_value(0.0);

    let shift = manager
        .on_scroll_changed(&mut scroll, &guard)
        .expect("first day triggers a shift");

    assert_eq!(shift.direction, ShiftDirection::Back);
    assert_eq!(shift.anchor_start_date, date(2026, 10, 14));
    assert_eq!(shift.scroll_before, 0.0);
    assert_eq!(shift.scroll_after, 744.0);
    assert_eq!(scroll.value(), 744.0);
    // the day under the tracking point is still October 15th
    assert_eq!(manager.current_date(scroll.value()), date(2026, 10, 15));
    assert!(!guard.is_suppressed());
}

#[test]
fn reaching_last_day_shifts_forward_by_one_block() {
    let (mut manager, mut scroll) = setup(1, 1);
    let guard = DerivedUpdateGuard::new();
    scroll.set_value(1520.0);
    let before = manager.current_date(scroll.value());

    let shift = manager
        .on_scroll_changed(&mut scroll, &guard)
        .expect("last day triggers a shift");

    assert_eq!(shift.direction, ShiftDirection::Forward);
    assert_eq!(shift.anchor_start_date, date(2026, 10, 16));
    assert_eq!(shift.scroll_delta(), -744.0);
    assert_eq!(manager.current_date(scroll.value()), before);
}

#[test]
fn middle_day_does_not_shift() {
    let (mut manager, mut scroll) = setup(1, 1);
    let guard = DerivedUpdateGuard::new();
    scroll.set_value(1000.0);

    assert_eq!(manager.on_scroll_changed(&mut scroll, &guard), None);
    assert_eq!(scroll.value(), 1000.0);
    assert_eq!(manager.window().anchor_start_date(), date(2026, 10, 15));
}

#[test]
fn suppressed_evaluation_is_skipped() {
    let (mut manager, mut scroll) = setup(1, 1);
    let guard = DerivedUpdateGuard::new();
    scroll.set_value(0.0);

    let token = guard.suppress();
    assert_eq!(manager.on_scroll_changed(&mut scroll, &guard), None);
    drop(token);
    assert!(manager.on_scroll_changed(&mut scroll, &guard).is_some());
}

#[test]
fn two_day_window_never_shifts() {
    let (mut manager, mut scroll) = setup(0, 1);
    let guard = DerivedUpdateGuard::new();

    scroll.set_value(0.0);
    assert_eq!(manager.on_scroll_changed(&mut scroll, &guard), None);
    scroll.set_value(scroll.maximum());
    assert_eq!(manager.on_scroll_changed(&mut scroll, &guard), None);
    assert_eq!(manager.window().anchor_start_date(), date(2026, 10, 16));
}

#[test]
fn tall_viewport_skips_shift_it_cannot_compensate() {
    // 2240 px of content in a 1600 px viewport leaves a 640 px range
    let (mut manager, mut scroll) = setup_with(1, 1, 1600.0, 0.0);
    let guard = DerivedUpdateGuard::new();

    for value in [640.0, 600.0, 0.0] {
        scroll.set_value(value);
        assert_eq!(manager.current_day_offset(scroll.value()), 0);
        assert_eq!(manager.on_scroll_changed(&mut scroll, &guard), None);
        assert_eq!(scroll.value(), value);
        assert_eq!(manager.window().anchor_start_date(), date(2026, 10, 15));
    }
    assert!(!guard.is_suppressed());
}

#[test]
fn shift_needs_room_for_the_whole_block() {
    // range 1440: from 700 a back shift would need 1444
    let (mut manager, mut scroll) = setup_with(1, 1, 800.0, 0.0);
    let guard = DerivedUpdateGuard::new();

    scroll.set_value(700.0);
    assert_eq!(manager.on_scroll_changed(&mut scroll, &guard), None);
    assert_eq!(scroll.value(), 700.0);

    scroll.set_value(696.0);
    let shift = manager
        .on_scroll_changed(&mut scroll, &guard)
        .expect("696 + 744 fits the range");
    assert_eq!(shift.scroll_after, 1440.0);
    assert_eq!(shift.scroll_delta(), 744.0);
}

#[test]
fn sticky_offset_moves_the_tracking_point_below_the_pinned_header() {
    let guard = DerivedUpdateGuard::new();

    // tracking point 721 is still inside day 0
    let (mut flush, mut scroll) = setup_with(1, 1, 720.0, 0.0);
    scroll.set_value(720.0);
    assert_eq!(flush.current_date(scroll.value()), date(2026, 10, 15));
    assert!(flush.on_scroll_changed(&mut scroll, &guard).is_some());

    // tracking point 751 already sits in day 1
    let (mut offset, mut scroll) = setup_with(1, 1, 720.0, 30.0);
    scroll.set_value(720.0);
    assert_eq!(offset.tracking_y(scroll.value()), 751.0);
    assert_eq!(offset.current_date(scroll.value()), date(2026, 10, 16));
    assert_eq!(offset.on_scroll_changed(&mut scroll, &guard), None);

    scroll.set_value(700.0);
    let shift = offset
        .on_scroll_changed(&mut scroll, &guard)
        .expect("tracking point 731 is in day 0");
    assert_eq!(shift.direction, ShiftDirection::Back);
    assert_eq!(shift.scroll_after, 1444.0);
}

#[test]
fn sticky_offset_triggers_forward_shift_earlier() {
    let guard = DerivedUpdateGuard::new();

    // day 2 starts at content y 1488
    let (mut flush, mut scroll) = setup_with(1, 1, 720.0, 0.0);
    scroll.set_value(1460.0);
    assert_eq!(flush.on_scroll_changed(&mut scroll, &guard), None);

    let (mut offset, mut scroll) = setup_with(1, 1, 720.0, 30.0);
    scroll.set_value(1460.0);
    let before = offset.current_date(scroll.value());
    assert_eq!(before, date(2026, 10, 17));

    let shift = offset
        .on_scroll_changed(&mut scroll, &guard)
        .expect("tracking point 1491 is in the last day");
    assert_eq!(shift.direction, ShiftDirection::Forward);
    assert_eq!(shift.scroll_after, 716.0);
    assert_eq!(offset.current_date(scroll.value()), before);
}

#[test]
fn jump_to_now_places_current_minute_under_header() {
    let (mut manager, mut scroll) = setup(1, 1);
    let guard = DerivedUpdateGuard::new();

    let jump = manager.jump_to_now(&mut scroll, &guard, at(date(2026, 10, 16), 14, 30, 59));

    assert!(!jump.anchor_reset);
    // y(1440 + 870) = 1203, minus bar (24) and clearance (17)
    assert_eq!(jump.scroll_value, 1162.0);
    assert_eq!(scroll.value(), 1162.0);
    assert!(!guard.is_suppressed());
}

#[test]
fn jump_to_now_recenters_when_today_left_the_window() {
    let (mut manager, mut scroll) = setup(1, 1);
    let guard = DerivedUpdateGuard::new();
    let later = date(2026, 10, 16)
        .checked_add_days(Days::new(5))
        .expect("valid date");

    let jump = manager.jump_to_now(&mut scroll, &guard, at(later, 0, 5, 0));

    assert!(jump.anchor_reset);
    assert_eq!(jump.anchor_start_date, date(2026, 10, 20));
    // y(1440 + 5) = 722.5 + 48, minus 41, truncated to a whole pixel
    assert_eq!(jump.scroll_value, 729.0);
}

#[test]
fn early_morning_jump_clamps_to_top() {
    let (mut manager, mut scroll) = setup(0, 2);
    let guard = DerivedUpdateGuard::new();

    let jump = manager.jump_to_now(&mut scroll, &guard, at(date(2026, 10, 16), 0, 10, 0));
    assert_eq!(jump.scroll_value, 0.0);
}
