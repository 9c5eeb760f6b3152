/// Drawable size of a surface in physical pixels.
///
/// Renderers use this as the basis for display-space coordinates and for the
/// projection aspect ratio.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height; 1.0 for degenerate viewports.
    #[inline]
    pub fn aspect(self) -> f64 {
        if self.is_valid() {
            self.width as f64 / self.height as f64
        } else {
            1.0
        }
    }
}
