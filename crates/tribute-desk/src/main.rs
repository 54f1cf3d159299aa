//! Tribute Desk: memorial signup and admin support desk

use eframe::egui;

mod app;
mod bridge;
mod login_ui;
mod signup_ui;
mod state;
mod tickets_ui;
mod ui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Tribute Desk");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tribute Desk")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tribute Desk",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
}
