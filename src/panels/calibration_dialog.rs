use egui::{Align2, Key};

use crate::MeasureApp;

/// Modal prompt for the real-world length of the selected line
pub fn calibration_dialog(app: &mut MeasureApp, ctx: &egui::Context) {
    let Some(dialog) = &mut app.dialog else {
        return;
    };

    // Outer None: still open. Inner None: dismissed without an answer.
    let mut answer: Option<Option<String>> = None;

    egui::Window::new("Calibrate")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(&dialog.request.prompt);
            let edit = ui.text_edit_singleline(&mut dialog.text);
            if !dialog.focused {
                edit.request_focus();
                dialog.focused = true;
            }
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() || submitted {
                    answer = Some(Some(dialog.text.clone()));
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(None);
                }
            });
        });

    if answer.is_none() && ctx.input(|i| i.key_pressed(Key::Escape)) {
        answer = Some(None);
    }

    if let Some(answer) = answer {
        app.dialog = None;
        app.controller
            .finish_calibration(answer.as_deref(), &mut app.surface);
    }
}
