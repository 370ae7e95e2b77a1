#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use paint_it::PaintConfig;
    use paint_it::config::CONFIG_ENV_VAR;

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = if std::env::var_os(CONFIG_ENV_VAR).is_some() {
        match PaintConfig::from_env() {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("Ignoring config file: {err}");
                None
            }
        }
    } else {
        None
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "paint_it",
        native_options,
        Box::new(|cc| Ok(Box::new(paint_it::PaintApp::new(cc, config)))),
    )
}

// The web build embeds the library through its own entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
