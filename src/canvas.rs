//! In-memory RGB canvas.
//!
//! The demos draw into a [`Canvas`] with the usual `embedded-graphics`
//! primitives. Finished frames are copied into the DMA framebuffer with
//! [`Canvas::blit`], so the buffer the panel is streaming is never touched
//! half-drawn.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Dimensions;
use embedded_graphics::geometry::OriginDimensions;
use embedded_graphics::geometry::Point;
use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::RgbColor;
use embedded_graphics::Pixel;

use crate::Color;

/// A `COLS` x `ROWS` pixel buffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Canvas<const COLS: usize, const ROWS: usize> {
    data: [[Color; COLS]; ROWS],
}

impl<const COLS: usize, const ROWS: usize> Default for Canvas<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> Canvas<COLS, ROWS> {
    /// Create a black canvas
    pub const fn new() -> Self {
        Self {
            data: [[Color::BLACK; COLS]; ROWS],
        }
    }

    /// Set every pixel to black.
    pub fn erase(&mut self) {
        self.fill(Color::BLACK);
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        for row in self.data.iter_mut() {
            row.fill(color);
        }
    }

    /// Set one pixel, ignoring points outside the canvas.
    pub fn set_pixel(&mut self, p: Point, color: Color) {
        if let Some((x, y)) = Self::index(p) {
            self.data[y][x] = color;
        }
    }

    /// Color at `p`, or `None` outside the canvas.
    pub fn pixel(&self, p: Point) -> Option<Color> {
        Self::index(p).map(|(x, y)| self.data[y][x])
    }

    pub fn row(&self, y: usize) -> Option<&[Color; COLS]> {
        self.data.get(y)
    }

    /// Number of pixels that are not black.
    pub fn lit(&self) -> usize {
        self.data
            .iter()
            .flatten()
            .filter(|c| **c != Color::BLACK)
            .count()
    }

    /// Copy the whole canvas into `target`, row by row starting at the
    /// origin.
    pub fn blit<T>(&self, target: &mut T) -> Result<(), T::Error>
    where
        T: DrawTarget<Color = Color>,
    {
        target.fill_contiguous(&self.bounding_box(), self.data.iter().flatten().copied())
    }

    fn index(p: Point) -> Option<(usize, usize)> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        (x < COLS && y < ROWS).then_some((x, y))
    }
}

impl<const COLS: usize, const ROWS: usize> OriginDimensions for Canvas<COLS, ROWS> {
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

impl<const COLS: usize, const ROWS: usize> DrawTarget for Canvas<COLS, ROWS> {
    type Color = Color;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.set_pixel(p, c);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}
