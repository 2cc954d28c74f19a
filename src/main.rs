use config::Config;
use display::impl_console::DisplayConsole;
use display::impl_gui::DisplayGui;
use display::impl_multi::DisplayMulti;
use display::interface::Display;
use eframe::egui;
use identifier::main::Identifier;
use image_classifier::gateway::ModelGateway;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnxLoader;
use image_classifier::interface::ImageClassifierLoader;
use image_source::loader::ImageLoader;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use lookup::impl_wikipedia::LookupWikipedia;
use std::sync::{Arc, Mutex};

mod config;
mod display;
mod identifier;
mod image_classifier;
mod image_source;
mod library;
mod lookup;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let loader: Arc<dyn ImageClassifierLoader + Send + Sync> =
        Arc::new(ImageClassifierTractOnnxLoader::new(config.model.clone()));

    let model_gateway = Arc::new(ModelGateway::new(loader, logger.clone()));

    let image_loader = Arc::new(ImageLoader::new(&config, logger.clone())?);

    let lookup = Arc::new(LookupWikipedia::new(&config, logger.clone())?);

    let display = DisplayGui::new();

    let mut displays: Vec<Box<dyn Display + Send>> = vec![Box::new(display.clone())];
    if config.console_echo {
        displays.push(Box::new(DisplayConsole::new()));
    }

    let identifier = Identifier::new(
        logger.clone(),
        model_gateway,
        image_loader.clone(),
        lookup,
        Arc::new(Mutex::new(DisplayMulti::new(displays))),
    );

    let window = display.window(identifier.sender(), image_loader, logger.clone());

    let identifier_logger = logger.clone();
    std::thread::spawn(move || {
        if let Err(e) = identifier.run() {
            let _ = identifier_logger.error(&format!("Identifier stopped: {}", e));
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title("Image Identification"),
        ..Default::default()
    };

    // blocks until the window is closed
    eframe::run_native(
        "Image Identification",
        options,
        Box::new(|_cc| Box::new(window)),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
