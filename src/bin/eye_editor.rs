#![warn(clippy::all, rust_2018_idioms)]

//! Minimal front-end: eye shaping, blink and gaze, no fur.

use cat_sketch::{Assembly, CatSketchApp};

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Eye Editor",
        native_options,
        Box::new(|cc| Ok(Box::new(CatSketchApp::new(cc, Assembly::EyeOnly)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(canvas) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("the_canvas_id"))
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("the_canvas_id was not found or is not a canvas");
            return;
        };

        if let Err(e) = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(CatSketchApp::new(cc, Assembly::EyeOnly)))),
            )
            .await
        {
            log::error!("Failed to start eye editor: {e:?}");
        }
    });
}
