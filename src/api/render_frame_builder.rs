use chrono::NaiveDateTime;

use crate::core::{DAY_MINUTES, Viewport, WeekdayLocale, minutes_since_midnight};
use crate::render::{
    CanvasLayerKind, EllipsePrimitive, FontWeight, LinePrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, TextRun, TextVAlign,
};

use super::label_format::{day_header_parts, hour_label, now_marker_label, selection_label};
use super::{SlidingWindowManager, StickyHeaderState, StickyHeaderTracker, TimelineStyle};

/// Extra band above and below the viewport in which elements are still
/// emitted, so labels hanging off a gridline are not clipped early.
const CULL_MARGIN_PX: f64 = 24.0;
const NOW_LABEL_OFFSET_PX: f64 = 6.0;
const SELECTION_LABEL_GAP_PX: f64 = 4.0;

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub viewport: Viewport,
    pub scroll_top: f64,
    pub manager: &'a SlidingWindowManager,
    pub style: TimelineStyle,
    pub locale: WeekdayLocale,
    pub now: NaiveDateTime,
    /// Long-press selection to mark, if one is live.
    pub selection: Option<NaiveDateTime>,
}

/// Builds the layered frame in viewport coordinates.
#[must_use]
pub fn build_render_frame(inputs: &FrameInputs<'_>) -> RenderFrame {
    let headers = StickyHeaderTracker::track(inputs.manager, inputs.scroll_top);
    build_render_frame_with_headers(inputs, &headers)
}

#[must_use]
pub fn build_render_frame_with_headers(
    inputs: &FrameInputs<'_>,
    headers: &StickyHeaderState,
) -> RenderFrame {
    let mut frame = RenderFrame::new(inputs.viewport);
    let width = f64::from(inputs.viewport.width);
    let height = f64::from(inputs.viewport.height);
    let style = inputs.style;

    frame
        .push_layer(CanvasLayerKind::Background)
        .rects
        .push(RectPrimitive::new(0.0, 0.0, width, height, style.background_color));

    push_grid(&mut frame, inputs, width, height);
    push_now_marker(&mut frame, inputs, width, height);
    push_selection(&mut frame, inputs, width, height);
    push_day_headers(&mut frame, inputs, headers, width, height);

    frame
}

fn is_visible(view_y: f64, height: f64) -> bool {
    view_y >= -CULL_MARGIN_PX && view_y <= height + CULL_MARGIN_PX
}

fn push_grid(frame: &mut RenderFrame, inputs: &FrameInputs<'_>, width: f64, height: f64) {
    let mapper = inputs.manager.mapper();
    let scale = mapper.scale();
    let style = inputs.style;
    let line_end = width - style.right_inset_px;
    let total_hours = mapper.total_days() * 24;
    let layer = frame.push_layer(CanvasLayerKind::Grid);

    for hour in 0..=total_hours {
        let view_y = mapper.y_for_minutes(hour as f64 * 60.0) - inputs.scroll_top;

        if is_visible(view_y, height) {
            layer.lines.push(LinePrimitive::horizontal(
                view_y,
                scale.left_pad,
                line_end,
                style.grid_line_width,
                style.hour_line_color,
            ));
            layer.texts.push(TextPrimitive::new(
                hour_label(hour),
                style.label_inset_px,
                view_y + style.hour_label_baseline_offset_px,
                style.hour_label_font_size_px,
                style.hour_label_color,
                TextHAlign::Left,
            ));
        }

        if hour == 0 || hour == total_hours {
            continue;
        }
        let half_y = view_y + 30.0 * scale.minute_height;
        if is_visible(half_y, height) {
            layer.lines.push(LinePrimitive::horizontal(
                half_y,
                scale.left_pad + style.half_hour_indent_px,
                line_end,
                style.grid_line_width,
                style.half_hour_line_color,
            ));
        }
    }
}

fn push_now_marker(frame: &mut RenderFrame, inputs: &FrameInputs<'_>, width: f64, height: f64) {
    let window = inputs.manager.window();
    let Some(day_offset) = window.index_of(inputs.now.date()) else {
        return;
    };

    let mapper = inputs.manager.mapper();
    let scale = mapper.scale();
    let style = inputs.style;
    let minutes =
        day_offset as f64 * DAY_MINUTES + minutes_since_midnight(inputs.now.time(), true);
    let view_y = mapper.y_for_minutes(minutes) - inputs.scroll_top;
    if !is_visible(view_y, height) {
        return;
    }

    let layer = frame.push_layer(CanvasLayerKind::NowMarker);
    layer.lines.push(LinePrimitive::horizontal(
        view_y,
        scale.left_pad,
        width - style.right_inset_px,
        style.now_line_width,
        style.now_color,
    ));
    layer.ellipses.push(EllipsePrimitive::circle(
        scale.left_pad,
        view_y,
        style.now_dot_radius,
        style.now_color,
    ));
    layer.texts.push(TextPrimitive::new(
        now_marker_label(inputs.now.time()),
        scale.left_pad + NOW_LABEL_OFFSET_PX,
        view_y - NOW_LABEL_OFFSET_PX,
        style.now_label_font_size_px,
        style.now_color,
        TextHAlign::Left,
    ));
}

/// Hour-tall band centred on the selected time, a line at the exact moment
/// and an `HH시 MM분` label above the band.
fn push_selection(frame: &mut RenderFrame, inputs: &FrameInputs<'_>, width: f64, height: f64) {
    let Some(selected) = inputs.selection else {
        return;
    };
    let window = inputs.manager.window();
    let Some(day_offset) = window.index_of(selected.date()) else {
        return;
    };

    let mapper = inputs.manager.mapper();
    let scale = mapper.scale();
    let style = inputs.style;
    let hour_height = 60.0 * scale.minute_height;
    let minutes = day_offset as f64 * DAY_MINUTES + minutes_since_midnight(selected.time(), true);
    let content_y = mapper.y_for_minutes(minutes);
    let band_top = (content_y - hour_height / 2.0).max(0.0) - inputs.scroll_top;
    let view_y = content_y - inputs.scroll_top;
    if band_top + hour_height < -CULL_MARGIN_PX || band_top > height + CULL_MARGIN_PX {
        return;
    }

    let line_end = width - style.right_inset_px;
    let layer = frame.push_layer(CanvasLayerKind::Selection);
    layer.rects.push(RectPrimitive::new(
        scale.left_pad,
        band_top,
        (line_end - scale.left_pad).max(0.0),
        hour_height,
        style.selection_band_color,
    ));
    layer.lines.push(LinePrimitive::horizontal(
        view_y,
        scale.left_pad,
        line_end,
        style.selection_line_width,
        style.selection_color,
    ));
    layer.texts.push(TextPrimitive::new(
        selection_label(selected.time(), inputs.locale),
        scale.left_pad + style.label_inset_px,
        band_top - SELECTION_LABEL_GAP_PX,
        style.selection_label_font_size_px,
        style.selection_color,
        TextHAlign::Left,
    ));
}

fn push_day_headers(
    frame: &mut RenderFrame,
    inputs: &FrameInputs<'_>,
    headers: &StickyHeaderState,
    width: f64,
    height: f64,
) {
    let bar_height = inputs.manager.mapper().scale().day_bar_height;
    let style = inputs.style;

    for placement in &headers.placements {
        let view_y = placement.y - inputs.scroll_top;
        if view_y + bar_height < 0.0 || view_y > height {
            continue;
        }

        let (date_part, weekday_part) = day_header_parts(placement.date, inputs.locale);
        let layer = frame.push_layer(CanvasLayerKind::DayHeader);
        layer.rects.push(RectPrimitive::new(
            0.0,
            view_y,
            width,
            bar_height,
            style.header_fill_color,
        ));
        layer.texts.push(
            TextPrimitive::new(
                date_part,
                style.label_inset_px,
                view_y + bar_height / 2.0,
                style.header_font_size_px,
                style.header_text_color,
                TextHAlign::Left,
            )
            .with_weight(FontWeight::Bold)
            .with_run(TextRun::new(
                weekday_part,
                style.weekday_font_size_px(),
                FontWeight::Normal,
            ))
            .with_v_align(TextVAlign::Middle),
        );
    }
}
