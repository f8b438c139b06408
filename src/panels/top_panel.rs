use crate::MeasureApp;
use crate::render::format_significant;

pub fn top_panel(app: &mut MeasureApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("📂 Open image…").clicked() {
                if let Some(path) = app.files.pick_file() {
                    if let Some(image) = app.files.load_path(&path) {
                        app.load_image(image);
                    }
                }
            }

            ui.separator();

            let session = app.controller.session();
            ui.label(format!("Lines: {}", session.committed().len()));
            ui.label(format!(
                "1 px = {}",
                format_significant(session.scale_factor(), 4)
            ));
            if let Some(image) = session.background() {
                ui.label(format!("{}×{} px", image.width(), image.height()));
            }
        });
    });
}
