use egui::{Color32, Slider};

use crate::app::CatSketchApp;
use crate::eye::{ANCHOR_RATIO_RANGE, Corner, EYEBALL_RADIUS_RANGE, PUPIL_WIDTH_RANGE, SCALE_RATIO_RANGE};
use crate::state::{EditMode, PaletteReplace};

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Color32) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        egui::color_picker::color_edit_button_srgba(ui, color, egui::color_picker::Alpha::Opaque)
            .changed()
    })
    .inner
}

pub fn tools_panel(app: &mut CatSketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                mode_section(app, ui);
                ui.separator();
                eye_section(app, ui);
                ui.separator();
                animation_section(app, ui);
                if app.editor().assembly().has_fur() {
                    ui.separator();
                    texture_section(app, ui);
                }
                ui.separator();
                file_section(app, ui);
                if let Some(status) = app.status() {
                    ui.separator();
                    ui.label(status);
                }
            });
        });
}

fn mode_section(app: &mut CatSketchApp, ui: &mut egui::Ui) {
    ui.heading("Mode");
    if !app.editor().assembly().has_fur() {
        ui.label("Eye editing");
        return;
    }
    let current = app.editor().state().mode;
    ui.horizontal(|ui| {
        for mode in [EditMode::Eye, EditMode::Texture] {
            if ui.selectable_label(current == mode, mode.as_str()).clicked() {
                log::info!("Mode selected from UI: {}", mode.as_str());
                app.editor_mut().set_mode(mode);
            }
        }
    });
}

fn eye_section(app: &mut CatSketchApp, ui: &mut egui::Ui) {
    ui.heading("Eye");
    let state = app.editor_mut().state_mut();

    let mut scale = *state.eye.scale();
    let mut changed = false;
    changed |= ui
        .add(Slider::new(&mut scale.eyeball_radius, EYEBALL_RADIUS_RANGE).text("eyeball radius"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut scale.anchor_ratio, ANCHOR_RATIO_RANGE).text("anchor"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut scale.iris_movement_limit_ratio, SCALE_RATIO_RANGE).text("iris limit"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut scale.iris_scale_ratio, SCALE_RATIO_RANGE).text("iris size"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut scale.pupil_scale_ratio, SCALE_RATIO_RANGE).text("pupil size"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut scale.pupil_width_ratio, PUPIL_WIDTH_RANGE).text("pupil width"))
        .changed();
    if changed {
        state.eye.set_scale(scale);
    }

    let mut spacing = state.eye_spacing();
    if ui
        .add(Slider::new(&mut spacing, crate::face::EYE_SPACING_MIN..=crate::face::EYE_SPACING_MAX).text("eye spacing"))
        .changed()
    {
        state.set_eye_spacing(spacing);
    }

    let mut iris = state.eye.shape().iris.color;
    if color_row(ui, "Iris", &mut iris) {
        state.eye.set_iris_color(iris);
    }
    color_row(ui, "Eyeball", &mut state.eyeball_color);
    color_row(ui, "Nose", &mut state.nose.color);

    let mut linkage = state.eye.linkage();
    ui.horizontal(|ui| {
        ui.checkbox(&mut linkage.inner_linked, "link inner");
        ui.checkbox(&mut linkage.outer_linked, "link outer");
    });
    if linkage != state.eye.linkage() {
        state.eye.set_linkage(linkage);
        log::info!(
            "Linkage set from UI: {} {}, {} {}",
            Corner::Inner.as_str(),
            linkage.inner_linked,
            Corner::Outer.as_str(),
            linkage.outer_linked
        );
    }
}

fn animation_section(app: &mut CatSketchApp, ui: &mut egui::Ui) {
    ui.heading("Animation");
    let status = app.editor().blink_status();
    ui.horizontal(|ui| {
        if ui.button("Blink").clicked() {
            app.editor_mut().trigger_blink();
        }
        ui.label(format!("({})", status.as_str()));
    });
    let state = app.editor_mut().state_mut();
    ui.add(Slider::new(&mut state.blink_ratio, 0.0..=1.0).text("blink lid"));
    ui.checkbox(&mut state.pupil_tracking, "pupil tracking");
}

fn texture_section(app: &mut CatSketchApp, ui: &mut egui::Ui) {
    ui.heading("Fur");
    let state = app.editor_mut().state_mut();
    let mut params = state.texture().clone();
    let mut changed = false;
    changed |= ui.add(Slider::new(&mut params.density, 10..=200).text("density")).changed();
    changed |= ui
        .add(Slider::new(&mut params.stroke_length, 1.0..=60.0).text("stroke length"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut params.angle_noise_scale, 10.0..=600.0).text("flow scale"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut params.stroke_weight, 0.5..=12.0).text("stroke weight"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut params.brush_radius, 1.0..=120.0).text("brush radius"))
        .changed();
    changed |= color_row(ui, "Brush", &mut params.brush_color);
    changed |= color_row(ui, "Base", &mut params.base_color);
    changed |= color_row(ui, "Background", &mut params.background_color);
    if changed {
        state.set_texture(params.clone());
    }
    if ui.button("Reset paint").clicked() {
        state.fur_mut().reset();
    }

    ui.label("Palette (click to replace with brush color)");
    let palette = app.editor().palette().to_vec();
    ui.horizontal_wrapped(|ui| {
        for color in palette {
            let swatch = egui::Button::new("").fill(color).min_size(egui::vec2(18.0, 18.0));
            if ui.add(swatch).clicked() && color != params.brush_color {
                app.editor_mut().requests_mut().palette_replace.post(PaletteReplace {
                    from: color,
                    to: params.brush_color,
                });
            }
        }
    });
}

fn file_section(app: &mut CatSketchApp, ui: &mut egui::Ui) {
    ui.heading("File");
    ui.horizontal(|ui| {
        if ui.button("Export").clicked() {
            app.editor_mut().requests_mut().export.post(());
        }
        if let Some(bundle) = app.last_export() {
            ui.label(format!("{} bytes", bundle.record_json.len()));
        }
    });

    #[cfg(not(target_arch = "wasm32"))]
    {
        ui.text_edit_singleline(&mut app.file_path);
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                let path = app.file_path.clone();
                let result = crate::state::save_record(app.editor().state(), &path).and_then(|()| {
                    let svg = app.editor().export()?.svg;
                    std::fs::write(std::path::Path::new(&path).with_extension("svg"), svg)?;
                    Ok(())
                });
                match result {
                    Ok(()) => app.set_status(format!("Saved {path}")),
                    Err(e) => app.set_status(format!("Save failed: {e}")),
                }
            }
            if ui.button("Load").clicked() {
                match std::fs::read_to_string(&app.file_path) {
                    Ok(text) => {
                        app.editor_mut().requests_mut().import.post(text);
                    }
                    Err(e) => app.set_status(format!("Load failed: {e}")),
                }
            }
        });
    }
}
