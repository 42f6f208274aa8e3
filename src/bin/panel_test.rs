//! Panel verification loop.
//!
//! Cycles forever through solid colors, text, a moving dot and a pixel by
//! pixel fill. See `hub75_panel_demo::demos::basic` for what each step
//! should look like.
//!
//! Following pins are used (see `hub75_panel_demo::config`):
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
//! - E   => GPIO33 (leave unconnected)
//! - LAT => GPIO4
//! - OE  => GPIO15
//! - CLK => GPIO16

#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;
use embassy_executor::Spawner;
use esp_backtrace as _;
use hub75_panel_demo::demos::basic::panel_test_cycle;
use hub75_panel_demo::hardware;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    let Some(board) = hardware::start("Initializing HUB75 16x32 panel test...").await else {
        return;
    };
    let mut screen = board.screen;

    screen.erase();
    screen.show(0).await;

    loop {
        panel_test_cycle(&mut screen).await;
    }
}
