//! Color handling for the demos.

use embedded_graphics::pixelcolor::Rgb565;

/// Pixel color of the canvas and of the DMA framebuffer.
pub type Color = hub75_framebuffer::Color;

/// Builds a color the way 16-bit graphics APIs do: the channels are cut down
/// to RGB565 and widened back to RGB888.
///
/// Full-scale and zero channels come back unchanged, so the primaries, black
/// and white are exact.
pub fn color565(r: u8, g: u8, b: u8) -> Color {
    Rgb565::new(r >> 3, g >> 2, b >> 3).into()
}
