use eframe::egui;
use tracing::info;

use super::Preview;
use crate::core::processing::RgbImage;
use crate::error::{Error, Result};

/// Native window showing the image scaled to fit. Blocks until closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowPreview;

struct PreviewApp {
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    caption: String,
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending.take() {
            self.texture = Some(ctx.load_texture("rgb-preview", image, egui::TextureOptions::LINEAR));
        }
        egui::TopBottomPanel::top("caption").show(ctx, |ui| {
            ui.label(&self.caption);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(texture).shrink_to_fit());
                });
            }
        });
    }
}

impl Preview for WindowPreview {
    fn show(&self, rgb: &RgbImage, title: &str) -> Result<()> {
        let (rows, cols, _) = rgb.dim();
        let data = rgb.as_standard_layout();
        let pixels = data
            .as_slice()
            .ok_or_else(|| Error::processing("RGB buffer is not contiguous"))?;
        let image = egui::ColorImage::from_rgb([cols, rows], pixels);

        let window_title = title.replace('\n', " - ");
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(window_title.clone())
                .with_inner_size([1200.0, 800.0]),
            ..Default::default()
        };

        info!("Opening preview window {:?}", window_title);
        let app = PreviewApp {
            pending: Some(image),
            texture: None,
            caption: title.to_string(),
        };
        eframe::run_native(&window_title, options, Box::new(|_cc| Ok(Box::new(app))))
            .map_err(Error::processing)
    }
}
