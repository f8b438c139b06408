use crate::MeasureApp;

/// Seconds the final help message takes to fade out
const HELP_FADE_SECS: f64 = 10.0;

pub fn help_panel(app: &mut MeasureApp, ctx: &egui::Context) {
    let Some(level) = app.surface.help else {
        return;
    };
    let now = ctx.input(|i| i.time);
    let since = *app.surface.help_since.get_or_insert(now);

    let opacity = if level.is_final() {
        (1.0 - (now - since) / HELP_FADE_SECS).clamp(0.0, 1.0) as f32
    } else {
        1.0
    };
    if opacity <= 0.0 {
        return;
    }
    if level.is_final() {
        ctx.request_repaint();
    }

    egui::TopBottomPanel::bottom("help_panel").show(ctx, |ui| {
        ui.set_opacity(opacity);
        ui.label(level.text());
    });
}
