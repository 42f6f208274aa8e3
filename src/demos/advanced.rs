//! Demos for a panel that already passed the basic test.

use core::fmt;

use embedded_graphics::geometry::OriginDimensions;
use embedded_graphics::geometry::Point;
use embedded_graphics::geometry::Size;
use embedded_graphics::primitives::Circle;
use embedded_graphics::primitives::Line;
use embedded_graphics::primitives::Primitive;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::primitives::Triangle;
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::color565;
use crate::text;
use crate::Color;
use crate::FrameSink;
use crate::Screen;

pub const SCROLL_TEXT: &str = "HELLO WORLD!";
/// Row the scrolling text is printed on.
pub const SCROLL_ROW: i32 = 4;
pub const FRAME_MS: u32 = 50;
pub const SHAPE_MS: u32 = 1000;
pub const GRADIENT_MS: u32 = 1500;
pub const BALL_MS: u32 = 3000;

/// Arduino style `map`: integer linear interpolation of `x` from one range
/// to another. Truncates toward zero and does not clamp.
pub const fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

fn channel(x: i32, in_max: i32, from: i32, to: i32) -> u8 {
    map_range(x, 0, in_max, from, to).clamp(0, 255) as u8
}

/// Whole-pixel distance between two points, rounded down.
fn distance(a: Point, b: Point) -> i32 {
    let d = a - b;
    ((d.x * d.x + d.y * d.y) as u32).isqrt() as i32
}

/// Scroll `s` from the right edge until it has left on the left.
///
/// One pixel per frame, [`FRAME_MS`] per frame. Each glyph is assumed
/// [`text::CHAR_ADVANCE`] wide.
pub async fn scroll_text<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>, s: &str, color: Color) {
    let text_width = s.len() as i32 * text::CHAR_ADVANCE;
    let width = screen.size().width as i32;

    let mut x = width;
    while x > -text_width {
        screen.erase();
        screen.print(s, Point::new(x, SCROLL_ROW), color);
        screen.show(FRAME_MS).await;
        x -= 1;
    }
}

/// Outline and filled circle, outline and filled rectangle, a diagonal line
/// and a triangle, one per second.
pub async fn draw_shapes<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>) {
    screen.erase();
    screen.draw(&circle(Point::new(16, 8), 7).into_styled(PrimitiveStyle::with_stroke(color565(255, 0, 0), 1)));
    screen.show(SHAPE_MS).await;

    screen.erase();
    screen.draw(&circle(Point::new(16, 8), 5).into_styled(PrimitiveStyle::with_fill(color565(0, 255, 0))));
    screen.show(SHAPE_MS).await;

    screen.erase();
    screen.draw(
        &Rectangle::new(Point::new(5, 3), Size::new(22, 10))
            .into_styled(PrimitiveStyle::with_stroke(color565(0, 0, 255), 1)),
    );
    screen.show(SHAPE_MS).await;

    screen.erase();
    screen.draw(
        &Rectangle::new(Point::new(8, 4), Size::new(16, 8))
            .into_styled(PrimitiveStyle::with_fill(color565(255, 0, 255))),
    );
    screen.show(SHAPE_MS).await;

    screen.erase();
    screen.draw(
        &Line::new(Point::new(0, 0), Point::new(31, 15))
            .into_styled(PrimitiveStyle::with_stroke(color565(255, 255, 0), 1)),
    );
    screen.show(SHAPE_MS).await;

    screen.erase();
    screen.draw(
        &Triangle::new(Point::new(16, 1), Point::new(30, 15), Point::new(2, 15))
            .into_styled(PrimitiveStyle::with_stroke(color565(0, 255, 255), 1)),
    );
    screen.show(SHAPE_MS).await;
}

/// Circle given by its center and radius, so `radius` pixels on each side
/// of the center.
pub fn circle(center: Point, radius: u32) -> Circle {
    Circle::with_center(center, 2 * radius + 1)
}

/// Horizontal, vertical and radial gradients.
///
/// The radial one stays on the panel when this returns.
pub async fn draw_gradient<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>) {
    let size = screen.size();
    let (width, height) = (size.width as i32, size.height as i32);

    screen.erase();
    for x in 0..width {
        let color = color565(channel(x, width - 1, 0, 255), channel(x, width - 1, 255, 0), 128);
        for y in 0..height {
            screen.set_pixel(Point::new(x, y), color);
        }
    }
    screen.show(GRADIENT_MS).await;

    for y in 0..height {
        let color = color565(128, channel(y, height - 1, 0, 255), channel(y, height - 1, 255, 0));
        for x in 0..width {
            screen.set_pixel(Point::new(x, y), color);
        }
    }
    screen.show(GRADIENT_MS).await;

    let center = Point::new(width / 2, height / 2);
    let max_radius = distance(center, Point::zero());
    for y in 0..height {
        for x in 0..width {
            let d = distance(Point::new(x, y), center);
            let color = color565(
                channel(d, max_radius, 255, 0),
                channel(d, max_radius, 0, 255),
                channel(d, max_radius, 0, 255),
            );
            screen.set_pixel(Point::new(x, y), color);
        }
    }
    screen.show(0).await;
}

/// Pretend wall clock. It only moves when told to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    hour: u8,
    minute: u8,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(12, 34)
    }
}

impl Clock {
    /// Out of range values wrap around.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Move on by one minute, rolling over the hour and the day.
    pub fn advance(&mut self) {
        self.minute = (self.minute + 1) % 60;
        if self.minute == 0 {
            self.hour = (self.hour + 1) % 24;
        }
    }

    /// `HH:MM`
    pub fn text(&self) -> Result<String<5>, fmt::Error> {
        let mut buffer = String::new();
        fmt::write(&mut buffer, format_args!("{:02}:{:02}", self.hour, self.minute))?;
        Ok(buffer)
    }
}

/// Show `clock` centered in white, then advance it by a minute.
pub async fn display_clock<S: FrameSink, D: DelayNs>(screen: &mut Screen<S, D>, clock: &mut Clock) {
    match clock.text() {
        Ok(time) => {
            let cursor = text::centered(&time, screen.size());
            screen.erase();
            screen.print(&time, cursor, color565(255, 255, 255));
            screen.show(0).await;
        }
        Err(_) => error!("clock: time does not fit the text buffer"),
    }

    clock.advance();
}

/// Ball bouncing off the panel edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ball {
    pub center: Point,
    pub velocity: Point,
    pub radius: i32,
    pub color: Color,
}

impl Ball {
    pub fn new(color: Color) -> Self {
        Self {
            center: Point::new(5, 5),
            velocity: Point::new(1, 1),
            radius: 2,
            color,
        }
    }

    /// Move one step inside an area of `bounds`.
    ///
    /// A velocity component flips when the new center touches the wall on
    /// that axis, and every flip takes a new color from `recolor`.
    pub fn step(&mut self, bounds: Size, mut recolor: impl FnMut() -> Color) {
        self.center += self.velocity;

        let max_x = bounds.width as i32 - self.radius - 1;
        if self.center.x <= self.radius || self.center.x >= max_x {
            self.velocity.x = -self.velocity.x;
            self.color = recolor();
        }
        let max_y = bounds.height as i32 - self.radius - 1;
        if self.center.y <= self.radius || self.center.y >= max_y {
            self.velocity.y = -self.velocity.y;
            self.color = recolor();
        }
    }
}

/// Bright random color: every channel in `128..255`.
pub fn random_color(rng: &mut impl FnMut() -> u32) -> Color {
    let mut channel = || 128 + (rng() % 127) as u8;
    let (r, g, b) = (channel(), channel(), channel());
    color565(r, g, b)
}

/// Bounce a ball around for `duration_ms`, one step every [`FRAME_MS`].
pub async fn bouncing_ball<S: FrameSink, D: DelayNs>(
    screen: &mut Screen<S, D>,
    rng: &mut impl FnMut() -> u32,
    duration_ms: u32,
) {
    let bounds = screen.size();
    let mut ball = Ball::new(color565(0, 255, 0));

    for _ in 0..duration_ms / FRAME_MS {
        screen.erase();
        screen.draw(&circle(ball.center, ball.radius as u32).into_styled(PrimitiveStyle::with_fill(ball.color)));
        ball.step(bounds, || random_color(&mut *rng));
        screen.show(FRAME_MS).await;
    }
}

/// One pass over all demos. `clock` carries the fake time from one pass to
/// the next.
pub async fn advanced_cycle<S: FrameSink, D: DelayNs>(
    screen: &mut Screen<S, D>,
    clock: &mut Clock,
    rng: &mut impl FnMut() -> u32,
) {
    info!("example 1: scrolling text");
    scroll_text(screen, SCROLL_TEXT, color565(255, 255, 0)).await;
    screen.hold(1000).await;

    info!("example 2: shapes");
    draw_shapes(screen).await;
    screen.hold(1000).await;

    info!("example 3: gradients");
    draw_gradient(screen).await;
    screen.hold(2000).await;

    info!("example 4: clock {}:{}", clock.hour(), clock.minute());
    display_clock(screen, clock).await;
    screen.hold(2000).await;

    info!("example 5: bouncing ball");
    bouncing_ball(screen, rng, BALL_MS).await;
    screen.hold(1000).await;
}
