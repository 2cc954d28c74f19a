use crate::display::interface::Display;
use crate::identifier::core::{Msg, Notice};
use crate::identifier::render::View;
use crate::image_source::core::{ImageId, ImageRef, Upload};
use crate::image_source::loader::ImageLoader;
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::collections::HashMap;
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];
const THUMBNAIL_SIZE: u32 = 400;
const IMAGE_WIDTH: f32 = 200.0;

#[derive(Default)]
struct Shared {
    view: Option<View>,
    ctx: Option<egui::Context>,
}

/// Publishes views to the window; the window itself lives on the main thread.
#[derive(Clone, Default)]
pub struct DisplayGui {
    shared: Arc<Mutex<Shared>>,
}

impl DisplayGui {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(
        &self,
        sender: Sender<Msg>,
        image_loader: Arc<ImageLoader>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> GuiWindow {
        GuiWindow {
            shared: self.shared.clone(),
            sender,
            image_loader,
            logger: logger.with_namespace("gui"),
            url_input: String::new(),
            thumbnails: HashMap::new(),
            decoded: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Display for DisplayGui {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut shared = self.shared.lock().map_err(|_| "gui view lock poisoned")?;
        shared.view = Some(view.clone());
        if let Some(ctx) = &shared.ctx {
            ctx.request_repaint();
        }
        Ok(())
    }
}

enum Thumbnail {
    Loading,
    Ready(egui::TextureHandle),
    Failed(String),
}

pub struct GuiWindow {
    shared: Arc<Mutex<Shared>>,
    sender: Sender<Msg>,
    image_loader: Arc<ImageLoader>,
    logger: Arc<dyn Logger + Send + Sync>,
    url_input: String,
    thumbnails: HashMap<ImageId, Thumbnail>,
    decoded: Arc<Mutex<HashMap<ImageId, Result<egui::ColorImage, String>>>>,
}

impl GuiWindow {
    fn send(&self, msg: Msg) {
        if self.sender.send(msg).is_err() {
            let _ = self.logger.error("Message loop is gone, dropping intent");
        }
    }

    fn pick_upload(&self) -> Option<Msg> {
        let picked = rfd::FileDialog::new()
            .set_title("Upload Image")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file();

        match picked {
            None => Some(Msg::UploadSelected(None)),
            Some(path) => match Upload::from_path(&path) {
                Ok(upload) => Some(Msg::UploadSelected(Some(upload))),
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("Failed to read {}: {}", path.display(), e));
                    None
                }
            },
        }
    }

    /// Decodes thumbnails off the UI thread, one request per image id.
    fn request_thumbnail(&mut self, ctx: &egui::Context, image: &ImageRef) {
        if self.thumbnails.contains_key(&image.id) {
            return;
        }
        self.thumbnails.insert(image.id, Thumbnail::Loading);

        let image = image.clone();
        let image_loader = self.image_loader.clone();
        let decoded = self.decoded.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let result = image_loader
                .load(&image)
                .map(|pixels| {
                    let rgba = pixels.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE).to_rgba8();
                    egui::ColorImage::from_rgba_unmultiplied(
                        [rgba.width() as usize, rgba.height() as usize],
                        rgba.as_raw(),
                    )
                })
                .map_err(|e| e.to_string());

            if let Ok(mut decoded) = decoded.lock() {
                decoded.insert(image.id, result);
            }
            ctx.request_repaint();
        });
    }

    fn collect_thumbnails(&mut self, ctx: &egui::Context) {
        let finished: Vec<(ImageId, Result<egui::ColorImage, String>)> = match self.decoded.lock()
        {
            Ok(mut decoded) => decoded.drain().collect(),
            Err(_) => return,
        };

        for (id, result) in finished {
            let thumbnail = match result {
                Ok(color_image) => Thumbnail::Ready(ctx.load_texture(
                    format!("image-{}", id.value()),
                    color_image,
                    egui::TextureOptions::default(),
                )),
                Err(message) => Thumbnail::Failed(message),
            };
            self.thumbnails.insert(id, thumbnail);
        }
    }

    fn show_image(&self, ui: &mut egui::Ui, image: &ImageRef, clickable: bool) -> bool {
        match self.thumbnails.get(&image.id) {
            Some(Thumbnail::Ready(texture)) => {
                let mut widget = egui::Image::new(texture).max_width(IMAGE_WIDTH);
                if clickable {
                    widget = widget.sense(egui::Sense::click());
                }
                ui.add(widget)
                    .on_hover_text(image.describe())
                    .clicked()
            }
            Some(Thumbnail::Failed(message)) => {
                ui.colored_label(
                    egui::Color32::RED,
                    format!("Could not load image: {}", message),
                );
                clickable && ui.link(image.describe()).clicked()
            }
            _ => {
                ui.spinner();
                false
            }
        }
    }

    fn show_history(&self, ui: &mut egui::Ui, view: &View, intents: &mut Vec<Msg>) {
        ui.heading("Recent Images");
        egui::ScrollArea::vertical()
            .id_source("recent_images")
            .show(ui, |ui| {
                for (index, image) in view.history.iter().enumerate() {
                    if self.show_image(ui, image, true) {
                        intents.push(Msg::HistoryPicked(index));
                    }
                    ui.add_space(8.0);
                }
            });
    }

    fn show_main(&mut self, ui: &mut egui::Ui, view: &View, intents: &mut Vec<Msg>) {
        ui.heading("Image Identification");

        if let Some(error) = &view.model_error {
            ui.horizontal(|ui| {
                ui.colored_label(
                    egui::Color32::RED,
                    format!("Model failed to load: {}", error),
                );
                if ui.button("Retry loading model").clicked() {
                    intents.push(Msg::ReloadModelRequested);
                }
            });
        }

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.url_input).hint_text("Paste image URL"),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                intents.push(Msg::UrlEntered(self.url_input.clone()));
            }
            if ui.button("Upload Image").clicked() {
                if let Some(msg) = self.pick_upload() {
                    intents.push(msg);
                }
            }
        });

        ui.separator();

        let Some(image) = &view.current else {
            return;
        };

        self.show_image(ui, image, false);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(view.can_identify, egui::Button::new("Identify Image"))
                .clicked()
            {
                self.url_input.clear();
                intents.push(Msg::IdentifyRequested);
            }
            if view.identifying {
                ui.spinner();
                ui.label("Identifying...");
            }
        });

        for row in &view.predictions {
            ui.horizontal(|ui| {
                ui.strong(&row.label);
                ui.label(format!("Confidence level: {}", row.confidence));
                if row.best_guess {
                    ui.colored_label(egui::Color32::from_rgb(0, 150, 70), "Best Guess");
                }
            });
        }

        match &view.notice {
            Some(Notice::Error(message)) => {
                ui.colored_label(egui::Color32::RED, message);
            }
            Some(Notice::Warning(message)) => {
                ui.colored_label(egui::Color32::from_rgb(200, 140, 0), message);
            }
            None => {}
        }

        if view.looking_up {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Searching Wikipedia...");
            });
        }

        ui.separator();

        egui::ScrollArea::vertical()
            .id_source("lookup_results")
            .show(ui, |ui| {
                for result in &view.lookup_results {
                    ui.hyperlink_to(egui::RichText::new(&result.title).heading(), &result.url);
                    ui.hyperlink(&result.url);
                    ui.label(&result.snippet);
                    ui.add_space(8.0);
                }
            });
    }
}

impl eframe::App for GuiWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = match self.shared.lock() {
            Ok(mut shared) => {
                if shared.ctx.is_none() {
                    shared.ctx = Some(ctx.clone());
                }
                shared.view.clone()
            }
            Err(_) => None,
        };

        let view = match view {
            Some(view) if !view.model_loading => view,
            _ => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading("Model Loading...");
                        ui.spinner();
                    });
                });
                return;
            }
        };

        self.collect_thumbnails(ctx);
        for image in view.current.iter().chain(view.history.iter()) {
            self.request_thumbnail(ctx, image);
        }

        let mut intents = vec![];

        if !view.history.is_empty() {
            egui::SidePanel::right("recent_images_panel")
                .min_width(IMAGE_WIDTH + 24.0)
                .show(ctx, |ui| self.show_history(ui, &view, &mut intents));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.show_main(ui, &view, &mut intents));

        for intent in intents {
            self.send(intent);
        }
    }
}
