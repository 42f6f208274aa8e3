//! The handle the demos draw through.
//!
//! A [`Screen`] owns the canvas, the [`FrameSink`] that gets finished frames
//! onto the panel and the delay used for pacing. Drawing only changes the
//! canvas; nothing reaches the panel until [`Screen::show`].

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::OriginDimensions;
use embedded_graphics::geometry::Point;
use embedded_graphics::geometry::Size;
use embedded_graphics::Drawable;
use embedded_graphics::Pixel;
use embedded_hal_async::delay::DelayNs;

use crate::text;
use crate::Color;
use crate::PanelCanvas;

/// Destination for finished frames.
#[allow(async_fn_in_trait)]
pub trait FrameSink {
    /// Make `canvas` the image shown on the panel.
    async fn present(&mut self, canvas: &PanelCanvas);
}

pub struct Screen<S, D> {
    canvas: PanelCanvas,
    sink: S,
    delay: D,
}

impl<S: FrameSink, D: DelayNs> Screen<S, D> {
    pub fn new(sink: S, delay: D) -> Self {
        Self {
            canvas: PanelCanvas::new(),
            sink,
            delay,
        }
    }

    pub fn canvas(&self) -> &PanelCanvas {
        &self.canvas
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Black out the canvas.
    pub fn erase(&mut self) {
        self.canvas.erase();
    }

    /// Fill the canvas with one color.
    pub fn fill(&mut self, color: Color) {
        self.canvas.fill(color);
    }

    pub fn set_pixel(&mut self, p: Point, color: Color) {
        self.canvas.set_pixel(p, color);
    }

    /// Draw any `embedded-graphics` item onto the canvas.
    pub fn draw<T>(&mut self, item: &T)
    where
        T: Drawable<Color = Color>,
    {
        let Ok(_) = item.draw(&mut self.canvas);
    }

    /// Print one line of text with its top-left corner at `cursor`.
    pub fn print(&mut self, s: &str, cursor: Point, color: Color) {
        let Ok(_) = text::print(&mut self.canvas, s, cursor, color);
    }

    /// Present the canvas, then wait `ms` milliseconds.
    pub async fn show(&mut self, ms: u32) {
        self.sink.present(&self.canvas).await;
        self.delay.delay_ms(ms).await;
    }

    /// Wait `ms` milliseconds without presenting anything.
    pub async fn hold(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }
}

impl<S, D> OriginDimensions for Screen<S, D> {
    fn size(&self) -> Size {
        self.canvas.size()
    }
}

impl<S, D> DrawTarget for Screen<S, D> {
    type Color = Color;

    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.canvas.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.canvas.clear(color)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;
    use embedded_graphics::primitives::Line;
    use embedded_graphics::primitives::Primitive;
    use embedded_graphics::primitives::PrimitiveStyle;

    use super::*;
    use crate::testing;

    #[test]
    fn test_nothing_is_presented_before_show() {
        let mut screen = testing::screen();
        screen.fill(Color::RED);
        screen.set_pixel(Point::new(1, 1), Color::GREEN);
        assert!(screen.sink().frames.is_empty());

        testing::run(screen.show(100));
        assert_eq!(screen.sink().frames.len(), 1);
        assert_eq!(screen.sink().frames[0].pixel(Point::new(0, 0)), Some(Color::RED));
        assert_eq!(screen.sink().frames[0].pixel(Point::new(1, 1)), Some(Color::GREEN));
        assert_eq!(testing::elapsed_ms(&screen), 100);
    }

    #[test]
    fn test_hold_only_waits() {
        let mut screen = testing::screen();
        testing::run(screen.hold(3000));
        assert!(screen.sink().frames.is_empty());
        assert_eq!(testing::elapsed_ms(&screen), 3000);
    }

    #[test]
    fn test_presented_frames_are_snapshots() {
        let mut screen = testing::screen();
        screen.fill(Color::BLUE);
        testing::run(screen.show(0));
        screen.erase();
        testing::run(screen.show(0));

        let frames = &screen.sink().frames;
        assert_eq!(frames[0].lit(), 32 * 16);
        assert_eq!(frames[1].lit(), 0);
    }

    #[test]
    fn test_draw_and_print() {
        let mut screen = testing::screen();
        assert_eq!(screen.size(), Size::new(32, 16));

        screen.draw(&Line::new(Point::new(0, 0), Point::new(31, 0)).into_styled(PrimitiveStyle::with_stroke(Color::WHITE, 1)));
        assert_eq!(screen.canvas().lit(), 32);

        screen.erase();
        screen.print("OK!", Point::new(1, 8), Color::MAGENTA);
        assert!(screen.canvas().lit() > 0);
        assert!(screen.canvas().row(7).unwrap().iter().all(|c| *c == Color::BLACK));
    }
}
