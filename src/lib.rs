//! Panel test and demo firmware for a 16x32 HUB75 LED matrix on the ESP32.
//!
//! The HUB75 signalling itself (DMA streaming, row scanning, bit planes) is
//! done by [`esp-hub75`](https://docs.rs/esp-hub75) and
//! [`hub75-framebuffer`](https://docs.rs/hub75-framebuffer). This crate holds
//! everything around it:
//!
//! - [`config`]: panel geometry, pin table and driver settings
//! - [`canvas`] and [`screen`]: the drawing surface the demos paint on and
//!   the handle that publishes finished frames to the panel
//! - [`shift_driver`]: register setup for FM6126A panels
//! - [`demos`]: the panel test and the advanced demo sequences
//! - `hardware` (feature `esp32`): peripheral setup and the refresh task
//!
//! Everything except `hardware` builds on the host so the demo sequences can
//! be tested without a panel.
#![no_std]

// must come first so the logging macros are visible in every module
mod fmt;

pub mod canvas;
pub mod color;
pub mod config;
pub mod demos;
pub mod screen;
pub mod shift_driver;
pub mod text;

cfg_if::cfg_if! {
    if #[cfg(feature = "esp32")] {
        pub mod hardware;
    }
}

#[cfg(test)]
mod testing;

pub use canvas::Canvas;
pub use color::color565;
pub use color::Color;
pub use screen::FrameSink;
pub use screen::Screen;

/// Canvas with the logical size of the configured panel chain.
pub type PanelCanvas = Canvas<{ config::PANEL_WIDTH }, { config::PANEL_RES_Y }>;
