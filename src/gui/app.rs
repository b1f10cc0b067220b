//! Dashboard Viewer Window
//! Presents the rendered dashboard bitmap in a native eframe window.

use eframe::egui;
use egui::load::SizedTexture;
use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use image::RgbImage;
use thiserror::Error;
use tracing::info;

pub const WINDOW_TITLE: &str = "Behavioral Personality Dashboard";
const MIN_WINDOW: [f32; 2] = [640.0, 480.0];

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to open dashboard window: {0}")]
    Display(String),
}

/// Convert the rendered bitmap into an egui image.
pub fn to_color_image(image: &RgbImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgb(size, image.as_raw())
}

/// Main application window.
pub struct DashboardApp {
    texture: TextureHandle,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, image: &RgbImage) -> Self {
        let texture = cc
            .egui_ctx
            .load_texture("dashboard", to_color_image(image), TextureOptions::LINEAR);
        Self { texture }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Image::new(SizedTexture::from_handle(&self.texture))
                            .shrink_to_fit(),
                    );
                });
            });
    }
}

/// Open the dashboard window and block until it is closed.
pub fn show(image: RgbImage) -> Result<(), ViewerError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([image.width() as f32, image.height() as f32])
            .with_min_inner_size(MIN_WINDOW)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    info!("Opening dashboard window ({}x{})", image.width(), image.height());
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &image)))),
    )
    .map_err(|e| ViewerError::Display(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_to_color_image() {
        let mut image = RgbImage::from_pixel(4, 3, Rgb([255, 255, 255]));
        image.put_pixel(1, 2, Rgb([255, 153, 153]));

        let color = to_color_image(&image);
        assert_eq!(color.size, [4, 3]);
        assert_eq!(color.pixels.len(), 12);
        assert_eq!(color.pixels[2 * 4 + 1], Color32::from_rgb(255, 153, 153));
        assert_eq!(color.pixels[0], Color32::WHITE);
    }
}
