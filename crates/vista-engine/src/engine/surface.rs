use std::fmt;

use image::RgbaImage;

use super::{RendererId, SceneRenderer};

/// Kind of rendering surface backing a window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WindowType {
    /// No visible window; rendering only serves captures.
    None,
    /// On-screen window.
    Native,
    /// Same API as `Native`, rendering redirected to an offscreen buffer.
    NativeOffscreen,
    /// Rendering context supplied by a host application.
    External,
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowType::None => "none",
            WindowType::Native => "native",
            WindowType::NativeOffscreen => "native offscreen",
            WindowType::External => "external",
        };
        f.write_str(name)
    }
}

/// Pixel layout requested from a capture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CaptureFormat {
    Rgb,
    /// Includes alpha; background pixels are transparent.
    Rgba,
}

impl CaptureFormat {
    pub fn channels(self) -> u8 {
        match self {
            CaptureFormat::Rgb => 3,
            CaptureFormat::Rgba => 4,
        }
    }
}

/// Order of the rows in a [`Framebuffer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RowOrder {
    /// First row is the bottom of the image.
    BottomUp,
    /// First row is the top of the image.
    TopDown,
}

/// Raw pixels read back from a surface.
///
/// Tightly packed 8-bit channels; `pixels.len() == width * height * channels`.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub row_order: RowOrder,
    pub pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }
}

/// The rendering target of a window.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);

    /// Screen position of the top-left corner.
    fn position(&self) -> (i32, i32);
    fn set_position(&mut self, x: i32, y: i32);

    fn set_title(&mut self, title: &str);
    fn set_icon(&mut self, icon: &RgbaImage) -> anyhow::Result<()>;

    /// True when nothing is presented on screen.
    fn is_offscreen(&self) -> bool;

    /// Makes `renderer` the one drawn by this surface.
    fn attach(&mut self, renderer: &mut dyn SceneRenderer);

    /// Removes `renderer` from this surface.
    fn detach(&mut self, renderer: &mut dyn SceneRenderer);

    fn attached(&self) -> Option<RendererId>;

    /// Draws one frame with the attached renderer.
    fn render(&mut self, renderer: &mut dyn SceneRenderer) -> anyhow::Result<()>;

    /// Draws one frame and reads its pixels back.
    fn capture(
        &mut self,
        renderer: &mut dyn SceneRenderer,
        format: CaptureFormat,
    ) -> anyhow::Result<Framebuffer>;

    /// Brings the window in front of other windows.
    fn raise(&mut self) {}
}
