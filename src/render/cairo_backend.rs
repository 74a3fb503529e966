use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{TimelineError, TimelineResult};
use crate::render::{
    Color, EllipsePrimitive, FontWeight, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TextRun, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub ellipses_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> TimelineResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    font_family: String,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> TimelineResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(TimelineError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::from_rgb8(18, 18, 18),
            font_family: "Sans".to_owned(),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> TimelineResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for layer in &frame.layers {
            for rect in &layer.rects {
                apply_color(context, rect.fill_color);
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                stats.rects_drawn += 1;
            }

            for line in &layer.lines {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                context.move_to(line.x1, line.y1);
                context.line_to(line.x2, line.y2);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }

            for ellipse in &layer.ellipses {
                fill_ellipse(context, *ellipse)?;
                stats.ellipses_drawn += 1;
            }

            for text in &layer.texts {
                self.draw_text(context, text);
                stats.texts_drawn += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }

    fn draw_text(&self, context: &Context, text: &TextPrimitive) {
        let layouts: Vec<pango::Layout> = text
            .runs
            .iter()
            .filter(|run| !run.text.is_empty())
            .map(|run| self.layout_run(context, run))
            .collect();

        let sizes: Vec<(f64, f64, f64)> = layouts
            .iter()
            .map(|layout| {
                let (width, height) = layout.pixel_size();
                let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
                (f64::from(width), f64::from(height), baseline)
            })
            .collect();

        let total_width: f64 = sizes.iter().map(|(width, _, _)| width).sum();
        let line_height = sizes.iter().map(|(_, height, _)| *height).fold(0.0, f64::max);
        let baseline = sizes.iter().map(|(_, _, baseline)| *baseline).fold(0.0, f64::max);

        let mut x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - total_width / 2.0,
            TextHAlign::Right => text.x - total_width,
        };
        let line_baseline = match text.v_align {
            TextVAlign::Top => text.y + baseline,
            TextVAlign::Middle => text.y - line_height / 2.0 + baseline,
            TextVAlign::Baseline => text.y,
        };

        apply_color(context, text.color);
        for (layout, (width, _, run_baseline)) in layouts.iter().zip(sizes.iter()) {
            context.move_to(x, line_baseline - run_baseline);
            pangocairo::functions::show_layout(context, layout);
            x += width;
        }
    }

    fn layout_run(&self, context: &Context, run: &TextRun) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(context);
        let mut font_description = FontDescription::new();
        font_description.set_family(&self.font_family);
        font_description.set_absolute_size(run.font_size_px * f64::from(pango::SCALE));
        font_description.set_weight(match run.weight {
            FontWeight::Normal => pango::Weight::Normal,
            FontWeight::Bold => pango::Weight::Bold,
        });
        layout.set_font_description(Some(&font_description));
        layout.set_text(&run.text);
        layout
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> TimelineResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill_ellipse(context: &Context, ellipse: EllipsePrimitive) -> TimelineResult<()> {
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(ellipse.center_x, ellipse.center_y);
    context.scale(ellipse.radius_x, ellipse.radius_y);
    context.new_sub_path();
    context.arc(0.0, 0.0, 1.0, 0.0, TAU);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
    apply_color(context, ellipse.fill_color);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill ellipse", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> TimelineError {
    TimelineError::Backend(format!("{prefix}: {err}"))
}
