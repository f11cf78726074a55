use eframe::egui;
use tangocho::gui::TangochoApp;

fn main() -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 720.0])
            .with_title("Tangocho"),
        ..Default::default()
    };

    eframe::run_native(
        "tangocho",
        native_options,
        Box::new(|cc| Ok(Box::new(TangochoApp::new(cc)))),
    )
}
