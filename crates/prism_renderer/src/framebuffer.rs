//! Framebuffer for render output.

use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};
use prism_math::Color;

/// Row-major pixel storage with the origin at the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pack to 8-bit RGB, three bytes per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(self.get(x, y).to_rgb8()))
    }

    /// Save to an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_image().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(Color::is_black));
    }

    #[test]
    fn test_set_get() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set(3, 2, Color::WHITE);
        assert_eq!(fb.get(3, 2), Color::WHITE);
        assert_eq!(fb.pixels()[11], Color::WHITE);
        assert!(fb.get(0, 0).is_black());
    }

    #[test]
    fn test_to_rgb8_layout() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set(1, 0, Color::new(1.0, 0.5, 2.0));

        assert_eq!(fb.to_rgb8(), vec![0, 0, 0, 255, 127, 255]);
    }

    #[test]
    fn test_to_image() {
        let mut fb = Framebuffer::new(3, 2);
        fb.set(0, 1, Color::WHITE);

        let image = fb.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 1), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }
}
