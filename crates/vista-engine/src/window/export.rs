use image::{DynamicImage, RgbImage, RgbaImage};

use crate::WindowError;
use crate::engine::{CaptureFormat, Framebuffer, RowOrder};

use super::Window;
use super::lifecycle::missing_renderer;

impl Window {
    /// Synchronizes options and draws one frame.
    pub fn render(&mut self) -> Result<bool, WindowError> {
        self.synchronize()?;
        let renderer = self.renderer.as_mut().ok_or_else(missing_renderer)?;
        self.surface.render(renderer.scene_mut())?;
        Ok(true)
    }

    /// Synchronizes options, draws one frame and returns its pixels.
    ///
    /// With `no_background` the background is cleared to transparent black
    /// and the image has an alpha channel.
    pub fn render_to_image(&mut self, no_background: bool) -> Result<Image, WindowError> {
        self.synchronize()?;
        let renderer = self.renderer.as_mut().ok_or_else(missing_renderer)?;

        let format = if no_background {
            renderer.scene_mut().set_background_color([0.0; 3]);
            CaptureFormat::Rgba
        } else {
            CaptureFormat::Rgb
        };

        let fb = self.surface.capture(renderer.scene_mut(), format)?;
        Ok(Image::from_framebuffer(fb))
    }
}

/// A captured frame, rows top to bottom.
///
/// Owns its pixels; nothing ties it to the window it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Image {
    /// Normalizes `fb` to top-to-bottom row order.
    pub fn from_framebuffer(fb: Framebuffer) -> Self {
        let data = match fb.row_order {
            RowOrder::TopDown => fb.pixels,
            RowOrder::BottomUp => {
                let row_len = fb.row_len();
                if row_len == 0 {
                    fb.pixels
                } else {
                    fb.pixels
                        .chunks_exact(row_len)
                        .rev()
                        .flatten()
                        .copied()
                        .collect()
                }
            }
        };

        Self {
            width: fb.width,
            height: fb.height,
            channels: fb.channels,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Channels of the pixel at `(x, y)`, `y = 0` being the top row.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * channels;
        self.data.get(start..start + channels)
    }

    /// Converts to an `image` buffer for encoding. `None` for channel counts
    /// other than 3 and 4.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        match self.channels {
            3 => RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgba8),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framebuffer(row_order: RowOrder) -> Framebuffer {
        // Two rows of two RGB pixels; first row red, second row blue.
        Framebuffer {
            width: 2,
            height: 2,
            channels: 3,
            row_order,
            pixels: vec![255, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 255],
        }
    }

    #[test]
    fn bottom_up_rows_are_flipped() {
        let image = Image::from_framebuffer(framebuffer(RowOrder::BottomUp));
        assert_eq!(image.pixel(0, 0), Some(&[0, 0, 255][..]));
        assert_eq!(image.pixel(1, 1), Some(&[255, 0, 0][..]));
    }

    #[test]
    fn top_down_rows_are_kept() {
        let image = Image::from_framebuffer(framebuffer(RowOrder::TopDown));
        assert_eq!(image.pixel(0, 0), Some(&[255, 0, 0][..]));
        assert_eq!(image.pixel(2, 0), None);
    }

    #[test]
    fn converts_for_encoding() {
        let image = Image::from_framebuffer(framebuffer(RowOrder::TopDown));
        let dynamic = image.to_dynamic().unwrap();
        assert_eq!(dynamic.width(), 2);
        assert_eq!(dynamic.color(), image::ColorType::Rgb8);
    }
}
