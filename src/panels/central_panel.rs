use crate::app::CatSketchApp;
use crate::util::time::now_ms;

pub fn central_panel(app: &mut CatSketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.editor_mut().set_canvas_size(canvas_rect.size());
            app.handle_input(ctx, canvas_rect);

            // The editor draws in canvas coordinates.
            let origin = canvas_rect.min.to_vec2();
            let shapes = app.editor_mut().frame(now_ms());
            painter.extend(shapes.into_iter().map(|mut shape| {
                shape.translate(origin);
                shape
            }));
        });

    // Animations are frame-stepped, so keep the loop running.
    ctx.request_repaint();
}
