mod timer;

pub use timer::RepeatingTimer;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use image::RgbImage;

/// Expand an RGB frame into the RGBA layout egui textures use
pub fn to_color_image(frame: &RgbImage) -> ColorImage {
    let (width, height) = frame.dimensions();
    ColorImage::from_rgb([width as usize, height as usize], frame.as_raw())
}

/// The on-screen preview for one camera. Keeps the last frame it was given.
pub struct PreviewSurface {
    name: String,
    texture: Option<TextureHandle>,
}

impl PreviewSurface {
    pub fn new(camera: u32) -> Self {
        Self {
            name: format!("camera-{}-preview", camera),
            texture: None,
        }
    }

    pub fn push(&mut self, ctx: &egui::Context, frame: &RgbImage) {
        let image = to_color_image(frame);
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(&self.name, image, TextureOptions::LINEAR));
            }
        }
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }
}
