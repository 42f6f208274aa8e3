//! Single-line text in the classic 5x7 font.
//!
//! Positions name the top-left corner of the first glyph. Text is never
//! wrapped; whatever runs past the edge of the target is clipped.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Dimensions;
use embedded_graphics::geometry::Point;
use embedded_graphics::geometry::Size;
use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::RgbColor;
use embedded_graphics::text::Baseline;
use embedded_graphics::text::Text;
use embedded_graphics::Drawable;

use crate::Color;

/// Horizontal distance between the starts of two glyphs.
pub const CHAR_ADVANCE: i32 = 6;

/// `FONT_5X7` with one blank column after each glyph.
pub const FONT: MonoFont<'static> = MonoFont {
    character_spacing: (CHAR_ADVANCE - 5) as u32,
    ..FONT_5X7
};

pub fn style(color: Color) -> MonoTextStyle<'static, Color> {
    MonoTextStyle::new(&FONT, color)
}

/// Draw `text` with its top-left corner at `cursor`.
///
/// Returns the position right after the last glyph.
pub fn print<D>(target: &mut D, text: &str, cursor: Point, color: Color) -> Result<Point, D::Error>
where
    D: DrawTarget<Color = Color>,
{
    Text::with_baseline(text, cursor, style(color), Baseline::Top).draw(target)
}

/// Size of the area `text` covers when printed.
pub fn text_bounds(text: &str) -> Size {
    Text::with_baseline(text, Point::zero(), style(Color::WHITE), Baseline::Top)
        .bounding_box()
        .size
}

/// Top-left position that centers `text` in an area of `size`.
pub fn centered(text: &str, size: Size) -> Point {
    let bounds = text_bounds(text);
    Point::new(
        (size.width as i32 - bounds.width as i32) / 2,
        (size.height as i32 - bounds.height as i32) / 2,
    )
}
