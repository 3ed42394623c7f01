mod app;
mod model;

use eframe::egui;

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting Planify Home");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Planify Home – UI"),
        ..Default::default()
    };
    eframe::run_native(
        "Planify Home",
        native_options,
        Box::new(|cc| Ok(Box::new(app::PlanApp::new(cc)))),
    )
}
