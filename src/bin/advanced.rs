//! Advanced demos: scrolling text, shapes, gradients, a clock and a
//! bouncing ball, over and over.
//!
//! Run `panel_test` first if the panel has not been verified yet. The pin
//! table is the same for both binaries.

#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;
use embassy_executor::Spawner;
use esp_backtrace as _;
use hub75_panel_demo::demos::advanced::advanced_cycle;
use hub75_panel_demo::demos::advanced::Clock;
use hub75_panel_demo::hardware;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    let Some(board) = hardware::start("Initializing HUB75 16x32 panel advanced examples...").await else {
        return;
    };
    let mut screen = board.screen;
    let mut rng = board.rng;
    let mut random = move || rng.random();
    let mut clock = Clock::default();

    screen.erase();
    screen.show(0).await;

    loop {
        advanced_cycle(&mut screen, &mut clock, &mut random).await;
    }
}
