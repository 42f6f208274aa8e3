//! Panel verification loop.
//!
//! 1. Basic colors: fills the whole panel with each primary and white
//! 2. Text: prints two short words in different colors
//! 3. Animation: moves a single dot across and down the panel
//! 4. All pixels: turns every pixel on and then off again, one at a time

use embedded_graphics::geometry::OriginDimensions;
use embedded_graphics::geometry::Point;
use embedded_hal_async::delay::DelayNs;

use crate::color565;
use crate::FrameSink;
use crate::Screen;

/// Pause after each test of [`panel_test_cycle`].
pub const TEST_PAUSE_MS: u32 = 3000;

const COLOR_STEPS: [((u8, u8, u8), u32); 5] = [
    ((0, 0, 0), 500),
    ((255, 0, 0), 1000),
    ((0, 255, 0), 1000),
    ((0, 0, 255), 1000),
    ((255, 255, 255), 1000),
];

const DOT_FRAME_MS: u32 = 50;
const DOT_REPEATS: usize = 3;
const PIXEL_STEP_MS: u32 = 10;

/// Fill the panel with black, red, green, blue and white in turn.
///
/// A wrong color here points at swapped or broken R/G/B lines.
pub async fn test_basic_colors<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>) {
    for ((r, g, b), ms) in COLOR_STEPS {
        screen.fill(color565(r, g, b));
        screen.show(ms).await;
    }
}

/// "TEST" in yellow near the top, then "OK!" in magenta in the lower half.
pub async fn test_text<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>) {
    screen.erase();
    screen.print("TEST", Point::new(1, 1), color565(255, 255, 0));
    screen.show(1000).await;

    screen.erase();
    screen.print("OK!", Point::new(1, 8), color565(255, 0, 255));
    screen.show(1000).await;
}

/// A cyan dot runs along the middle row, then an orange dot runs down the
/// middle column. Three times.
pub async fn test_animation<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>) {
    let size = screen.size();
    let (width, height) = (size.width as i32, size.height as i32);

    for _ in 0..DOT_REPEATS {
        for x in 0..width {
            screen.erase();
            screen.set_pixel(Point::new(x, height / 2), color565(0, 255, 255));
            screen.show(DOT_FRAME_MS).await;
        }

        for y in 0..height {
            screen.erase();
            screen.set_pixel(Point::new(width / 2, y), color565(255, 165, 0));
            screen.show(DOT_FRAME_MS).await;
        }
    }
}

/// Light every pixel in row-major order, then turn them off in the same
/// order.
pub async fn test_all_pixels<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>) {
    let size = screen.size();
    screen.erase();

    for color in [color565(255, 255, 255), color565(0, 0, 0)] {
        for y in 0..size.height as i32 {
            for x in 0..size.width as i32 {
                screen.set_pixel(Point::new(x, y), color);
                screen.show(PIXEL_STEP_MS).await;
            }
        }
    }
}

/// One pass over all four tests, each followed by [`TEST_PAUSE_MS`].
pub async fn panel_test_cycle<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>) {
    info!("test 1: basic colors");
    test_basic_colors(screen).await;
    screen.hold(TEST_PAUSE_MS).await;

    info!("test 2: text");
    test_text(screen).await;
    screen.hold(TEST_PAUSE_MS).await;

    info!("test 3: animation");
    test_animation(screen).await;
    screen.hold(TEST_PAUSE_MS).await;

    info!("test 4: all pixels");
    test_all_pixels(screen).await;
    screen.hold(TEST_PAUSE_MS).await;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;
    use crate::testing;
    use crate::Color;

    #[test]
    fn test_colors_in_order() {
        let mut screen = testing::screen();
        testing::run(test_basic_colors(&mut screen));

        let frames = &screen.sink().frames;
        let firsts: Vec<Option<Color>> = frames.iter().map(|f| f.pixel(Point::new(0, 0))).collect();
        assert_eq!(
            firsts,
            [
                Some(Color::BLACK),
                Some(Color::RED),
                Some(Color::GREEN),
                Some(Color::BLUE),
                Some(Color::WHITE),
            ]
        );
        // every frame is a solid fill
        for frame in &frames[1..] {
            assert_eq!(frame.lit(), 32 * 16);
        }
        assert_eq!(testing::elapsed_ms(&screen), 4500);
    }

    #[test]
    fn test_text_frames() {
        let mut screen = testing::screen();
        testing::run(test_text(&mut screen));

        let frames = &screen.sink().frames;
        assert_eq!(frames.len(), 2);
        assert!(frames[0].lit() > 0);
        assert!(frames[1].lit() > 0);

        let colors = |frame: &crate::PanelCanvas| {
            let mut found = Vec::new();
            for y in 0..16 {
                for &c in frame.row(y).unwrap() {
                    if c != Color::BLACK && !found.contains(&c) {
                        found.push(c);
                    }
                }
            }
            found
        };
        assert_eq!(colors(&frames[0]), [Color::YELLOW]);
        assert_eq!(colors(&frames[1]), [Color::MAGENTA]);

        // "OK!" starts at row 8
        for y in 0..8 {
            assert!(frames[1].row(y).unwrap().iter().all(|c| *c == Color::BLACK));
        }
        assert_eq!(testing::elapsed_ms(&screen), 2000);
    }

    #[test]
    fn test_animation_moves_one_dot() {
        let mut screen = testing::screen();
        testing::run(test_animation(&mut screen));

        let frames = &screen.sink().frames;
        assert_eq!(frames.len(), 3 * (32 + 16));
        assert!(frames.iter().all(|f| f.lit() == 1));

        // horizontal sweep on the middle row
        for x in 0..32 {
            assert_eq!(frames[x].pixel(Point::new(x as i32, 8)), Some(Color::CYAN));
        }
        // vertical sweep on the middle column
        for y in 0..16 {
            let dot = frames[32 + y].pixel(Point::new(16, y as i32)).unwrap();
            assert_eq!(dot, color565(255, 165, 0));
        }
        assert_eq!(testing::elapsed_ms(&screen), 3 * 48 * 50);
    }

    #[test]
    fn test_all_pixels_fills_then_clears() {
        let mut screen = testing::screen();
        testing::run(test_all_pixels(&mut screen));

        let frames = &screen.sink().frames;
        assert_eq!(frames.len(), 2 * 512);
        for (i, frame) in frames[..512].iter().enumerate() {
            assert_eq!(frame.lit(), i + 1);
        }
        for (i, frame) in frames[512..].iter().enumerate() {
            assert_eq!(frame.lit(), 511 - i);
        }
        // row-major: the 33rd pixel lit is the first one of row 1
        assert_eq!(frames[32].pixel(Point::new(0, 1)), Some(Color::WHITE));
        assert_eq!(frames[32].pixel(Point::new(1, 1)), Some(Color::BLACK));
        assert_eq!(testing::elapsed_ms(&screen), 1024 * 10);
    }

    #[test]
    fn test_cycle_timing() {
        let mut screen = testing::screen();
        testing::run(panel_test_cycle(&mut screen));

        let frames = screen.sink().frames.len();
        assert_eq!(frames, 5 + 2 + 3 * 48 + 1024);
        let expected = 4500 + 2000 + 3 * 48 * 50 + 1024 * 10 + 4 * 3000;
        assert_eq!(testing::elapsed_ms(&screen), expected);
        assert_eq!(screen.sink().frames.last().map(|f| f.lit()), Some(0));
    }
}
