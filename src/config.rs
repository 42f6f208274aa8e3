//! Compile-time panel configuration.
//!
//! Wiring (ESP32 GPIO => HUB75 signal):
//! - R1  => GPIO25
//! - G1  => GPIO26
//! - B1  => GPIO27
//! - R2  => GPIO14
//! - G2  => GPIO12
//! - B2  => GPIO13
//! - A   => GPIO23
//! - B   => GPIO19
//! - C   => GPIO5
//! - D   => GPIO17
//! - E   => not connected (16 row panel)
//! - LAT => GPIO4
//! - OE  => GPIO15
//! - CLK => GPIO16
//!
//! The I2S driver wants a pin for every address line, so E is driven on
//! [`SPARE_ADDR_GPIO`], which must be left unconnected.
//!
//! Note that you most likely need level converters 3.3v to 5v for all HUB75
//! signals.

use hub75_framebuffer::compute_frame_count;
use hub75_framebuffer::compute_rows;

use crate::shift_driver::ShiftDriver;

/// Panel width in pixels.
pub const PANEL_RES_X: usize = 32;
/// Panel height in pixels.
pub const PANEL_RES_Y: usize = 16;
/// Number of panels in the chain.
pub const PANEL_CHAIN: usize = 1;
/// Width of the whole chain.
pub const PANEL_WIDTH: usize = PANEL_RES_X * PANEL_CHAIN;

/// Colour bits per channel.
pub const BITS: u8 = 4;
pub const NROWS: usize = compute_rows(PANEL_RES_Y);
pub const FRAME_COUNT: usize = compute_frame_count(BITS);

/// I2S output clock.
pub const CLOCK_MHZ: u32 = 20;

/// Unconnected GPIO that stands in for the E address line.
pub const SPARE_ADDR_GPIO: u8 = 33;

/// GPIO numbers of the HUB75 connector signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinMap {
    pub r1: u8,
    pub g1: u8,
    pub b1: u8,
    pub r2: u8,
    pub g2: u8,
    pub b2: u8,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    /// Only used by 1/32 scan panels.
    pub e: Option<u8>,
    pub lat: u8,
    pub oe: u8,
    pub clk: u8,
}

pub const HUB75_PINS: PinMap = PinMap {
    r1: 25,
    g1: 26,
    b1: 27,
    r2: 14,
    g2: 12,
    b2: 13,
    a: 23,
    b: 19,
    c: 5,
    d: 17,
    e: None,
    lat: 4,
    oe: 15,
    clk: 16,
};

impl PinMap {
    /// `(signal, gpio)` pairs in connector order.
    pub const fn signals(&self) -> [(&'static str, Option<u8>); 14] {
        [
            ("R1", Some(self.r1)),
            ("G1", Some(self.g1)),
            ("B1", Some(self.b1)),
            ("R2", Some(self.r2)),
            ("G2", Some(self.g2)),
            ("B2", Some(self.b2)),
            ("A", Some(self.a)),
            ("B", Some(self.b)),
            ("C", Some(self.c)),
            ("D", Some(self.d)),
            ("E", self.e),
            ("LAT", Some(self.lat)),
            ("OE", Some(self.oe)),
            ("CLK", Some(self.clk)),
        ]
    }

    /// True when no GPIO is assigned to two signals.
    pub const fn is_valid(&self) -> bool {
        let signals = self.signals();
        let mut i = 0;
        while i < signals.len() {
            if let Some(gpio) = signals[i].1 {
                let mut j = i + 1;
                while j < signals.len() {
                    if let Some(other) = signals[j].1 {
                        if gpio == other {
                            return false;
                        }
                    }
                    j += 1;
                }
            }
            i += 1;
        }
        true
    }
}

/// Everything the firmware needs to know about the attached panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    pub res_x: usize,
    pub res_y: usize,
    pub chain: usize,
    pub bits: u8,
    pub clock_mhz: u32,
    pub driver: ShiftDriver,
    /// Shift data on the falling clock edge. The I2S driver only shifts on
    /// the rising edge.
    pub clock_phase: bool,
    pub pins: PinMap,
}

pub const PANEL_CONFIG: PanelConfig = PanelConfig {
    res_x: PANEL_RES_X,
    res_y: PANEL_RES_Y,
    chain: PANEL_CHAIN,
    bits: BITS,
    clock_mhz: CLOCK_MHZ,
    driver: ShiftDriver::Fm6126a,
    clock_phase: false,
    pins: HUB75_PINS,
};

const _: () = assert!(PANEL_CONFIG.pins.is_valid(), "a GPIO is assigned twice");
const _: () = assert!(!PANEL_CONFIG.clock_phase, "falling edge clocking is not supported");
const _: () = assert!(
    PANEL_CONFIG.res_y <= 32 || PANEL_CONFIG.pins.e.is_some(),
    "panels taller than 32 rows need the E line"
);

impl PanelConfig {
    /// Logical width of the chain in pixels.
    pub const fn width(&self) -> usize {
        self.res_x * self.chain
    }

    pub const fn height(&self) -> usize {
        self.res_y
    }
}
