//! Host-side stand-ins for the panel and the timer.

extern crate std;

use core::future::Future;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::FrameSink;
use crate::PanelCanvas;
use crate::Screen;

/// Keeps a copy of every presented frame.
#[derive(Default)]
pub struct Recorder {
    pub frames: Vec<PanelCanvas>,
}

impl FrameSink for Recorder {
    async fn present(&mut self, canvas: &PanelCanvas) {
        self.frames.push(canvas.clone());
    }
}

/// Delay that returns at once and only adds up the requested time.
#[derive(Default)]
pub struct VirtualDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for VirtualDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

pub type TestScreen = Screen<Recorder, VirtualDelay>;

pub fn screen() -> TestScreen {
    Screen::new(Recorder::default(), VirtualDelay::default())
}

pub fn elapsed_ms(screen: &TestScreen) -> u64 {
    screen.delay().elapsed_ns / 1_000_000
}

pub fn run<F: Future>(future: F) -> F::Output {
    embassy_futures::block_on(future)
}

/// Deterministic stand-in for the hardware RNG.
pub fn counter_rng() -> impl FnMut() -> u32 {
    let mut state = 0u32;
    move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        state
    }
}
