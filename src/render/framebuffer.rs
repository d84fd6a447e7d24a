//! Software framebuffer
//!
//! A plain RGBA pixel surface the ray caster and sprite compositor write
//! into. Exportable as an [`image::RgbaImage`] for display or saving.

use image::RgbaImage;

/// RGBA color, straight alpha
pub type Color = [u8; 4];

/// Row-major RGBA pixel buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
        }
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Read a pixel (background black out of bounds)
    pub fn get(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            self.pixels[self.idx(x, y)]
        } else {
            [0, 0, 0, 255]
        }
    }

    /// Write a pixel, ignoring out-of-bounds coordinates
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let idx = self.idx(x, y);
            self.pixels[idx] = color;
        }
    }

    /// Source-over alpha blend a pixel onto the buffer
    #[inline]
    pub fn blend(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let a = color[3] as u32;
        if a == 0 {
            return;
        }
        if a == 255 {
            let idx = self.idx(x, y);
            self.pixels[idx] = [color[0], color[1], color[2], 255];
            return;
        }
        let idx = self.idx(x, y);
        let dst = self.pixels[idx];
        let inv = 255 - a;
        self.pixels[idx] = [
            ((color[0] as u32 * a + dst[0] as u32 * inv) / 255) as u8,
            ((color[1] as u32 * a + dst[1] as u32 * inv) / 255) as u8,
            ((color[2] as u32 * a + dst[2] as u32 * inv) / 255) as u8,
            255,
        ];
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for py in y..y1 {
            for px in x..x1 {
                let idx = self.idx(px, py);
                self.pixels[idx] = color;
            }
        }
    }

    /// Copy the buffer into an owned image
    pub fn to_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (i, pixel) in img.pixels_mut().enumerate() {
            pixel.0 = self.pixels[i];
        }
        img
    }
}
