use egui::{Color32, CursorIcon, Pos2, Rect, Sense};

use crate::MeasureApp;
use crate::render::painter;

pub fn central_panel(app: &mut MeasureApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let viewport = ui.clip_rect();
                let size = app.controller.session().canvas_size();
                let (response, canvas) = ui.allocate_painter(size, Sense::click());
                let rect = response.rect;

                match app.controller.session().background() {
                    Some(image) => {
                        let texture = app.textures.background_texture(ctx, image);
                        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                        canvas.image(texture, rect, uv, Color32::WHITE);
                    }
                    None => {
                        canvas.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);
                    }
                }

                // Input is paused while the calibration prompt is open
                if app.dialog.is_none() {
                    let now = ctx.input(|i| i.time);
                    for event in app.input.process_input(ctx, &response, viewport) {
                        app.dispatch(event, now);
                    }
                }

                painter::paint_commands(&canvas, rect.min, &app.surface.commands);

                if response.hovered() {
                    ctx.set_cursor_icon(CursorIcon::Crosshair);
                }

                show_loupe(app, ctx, viewport);
            });
    });
}

fn show_loupe(app: &mut MeasureApp, ctx: &egui::Context, viewport: Rect) {
    let Some(view) = app.surface.loupe else {
        return;
    };
    let Some(image) = app.controller.session().background() else {
        return;
    };

    if app.surface.loupe_dirty {
        let pixels = image.magnify(&view);
        app.textures.update_loupe(ctx, &pixels);
        app.surface.loupe_dirty = false;
    }
    let Some(texture) = app.textures.loupe_texture() else {
        return;
    };

    let pos = viewport.min + app.controller.loupe().anchor_offset();
    egui::Area::new(egui::Id::new("loupe"))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .interactable(false)
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(egui::Vec2::splat(view.size), Sense::hover());
            painter::paint_loupe(ui.painter(), rect, texture, &view);
        });
}
