use churnscope::app::ChurnScopeApp;
use churnscope::state::DEFAULT_DATA_PATH;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Data path: CLI argument beats the environment beats the default.
    let data_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CHURNSCOPE_DATA").ok())
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ChurnScope – Retention Dashboard",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the prior-analysis pngs.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ChurnScopeApp::new(data_path)))
        }),
    )
}
