use gtk4 as gtk;
use gtk4::prelude::*;

use timeline_rs::api::{TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::Viewport;
use timeline_rs::platform_gtk::GtkTimelineAdapter;
use timeline_rs::render::CairoRenderer;

const WINDOW_WIDTH: i32 = 480;
const WINDOW_HEIGHT: i32 = 720;

fn main() {
    let _ = timeline_rs::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.timeline.demos.gtk_day_timeline")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn build_ui(app: &gtk::Application) {
    let engine = match build_engine() {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("failed to initialize timeline engine: {err}");
            return;
        }
    };
    let adapter = GtkTimelineAdapter::new(engine);

    let clock_label = gtk::Label::new(None);
    clock_label.add_css_class("title");
    let today_button = gtk::Button::new();
    today_button.add_css_class("flat");
    today_button.set_visible(false);

    let title_box = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    title_box.append(&clock_label);
    title_box.append(&today_button);

    adapter.set_title_clock_hook({
        let clock_label = clock_label.clone();
        let today_button = today_button.clone();
        move |title| {
            clock_label.set_text(&title.time_text);
            today_button.set_label(&title.date_text);
            today_button.set_visible(title.shows_back_to_today());
        }
    });

    {
        let adapter = adapter.clone();
        today_button.connect_clicked(move |_| adapter.jump_to_now());
    }

    let picked_label = gtk::Label::new(None);
    picked_label.add_css_class("dim-label");
    adapter.set_selection_hook({
        let picked_label = picked_label.clone();
        move |picked| picked_label.set_text(&picked.format("%m-%d %H:%M").to_string())
    });
    let drawing_area = adapter.drawing_area().clone();

    let header_bar = gtk::HeaderBar::new();
    header_bar.set_title_widget(Some(&title_box));
    header_bar.pack_end(&picked_label);

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .default_width(WINDOW_WIDTH)
        .default_height(WINDOW_HEIGHT)
        .child(&drawing_area)
        .build();
    window.set_titlebar(Some(&header_bar));
    window.present();
}

fn build_engine() -> timeline_rs::TimelineResult<TimelineEngine<CairoRenderer>> {
    let config = TimelineEngineConfig::new(Viewport::new(
        WINDOW_WIDTH as u32,
        WINDOW_HEIGHT as u32,
    ));
    let renderer = CairoRenderer::new(WINDOW_WIDTH, WINDOW_HEIGHT)?;
    TimelineEngine::new(renderer, config)
}
