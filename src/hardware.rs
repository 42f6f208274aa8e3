//! ESP32 side of the firmware.
//!
//! The panel is refreshed by [`hub75_task`], which streams one DMA frame
//! buffer over I2S in a loop on a high priority interrupt executor. Drawing
//! happens in the thread mode executor on the [`PanelCanvas`]; presenting a
//! frame copies the canvas into the back buffer and swaps it with the one
//! being streamed:
//!
//! ```text
//!  demos -> Screen::show -> FrameExchange --TO_PANEL--> hub75_task
//!                                ^                          |
//!                                +-------FROM_PANEL---------+
//! ```

use core::convert::Infallible;

use embassy_executor::task;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Delay;
use embassy_time::Duration;
use embassy_time::Instant;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::AnyPin;
use esp_hal::gpio::Level;
use esp_hal::gpio::Output;
use esp_hal::gpio::OutputConfig;
use esp_hal::gpio::Pin;
use esp_hal::i2s::AnyI2s;
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::interrupt::Priority;
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal_embassy::InterruptExecutor;
use esp_hub75::Hub75;
use esp_hub75::Hub75Pins16;
use hub75_framebuffer::plain::DmaFrameBuffer;

use crate::config::BITS;
use crate::config::CLOCK_MHZ;
use crate::config::FRAME_COUNT;
use crate::config::HUB75_PINS;
use crate::config::NROWS;
use crate::config::PANEL_CONFIG;
use crate::config::PANEL_RES_Y;
use crate::config::PANEL_WIDTH;
use crate::config::SPARE_ADDR_GPIO;
use crate::shift_driver::ShiftDriverError;
use crate::shift_driver::ShiftDriverPins;
use crate::FrameSink;
use crate::PanelCanvas;
use crate::Screen;

// When you are okay with using a nightly compiler it's better to use https://docs.rs/static_cell/2.1.0/static_cell/macro.make_static.html
macro_rules! mk_static {
    ($t:ty,$val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

pub type FBType = DmaFrameBuffer<PANEL_RES_Y, PANEL_WIDTH, NROWS, BITS, FRAME_COUNT>;
type FrameBufferExchange = Signal<CriticalSectionRawMutex, &'static mut FBType>;

pub type PanelScreen = Screen<FrameExchange, Delay>;

static TO_PANEL: FrameBufferExchange = FrameBufferExchange::new();
static FROM_PANEL: FrameBufferExchange = FrameBufferExchange::new();

/// Outcome of the I2S driver setup in [`hub75_task`].
static PANEL_READY: Signal<CriticalSectionRawMutex, bool> = Signal::new();

// The peripherals below are picked by type, keep them in step with the table.
const _: () = assert!(
    HUB75_PINS.r1 == 25
        && HUB75_PINS.g1 == 26
        && HUB75_PINS.b1 == 27
        && HUB75_PINS.r2 == 14
        && HUB75_PINS.g2 == 12
        && HUB75_PINS.b2 == 13
        && HUB75_PINS.a == 23
        && HUB75_PINS.b == 19
        && HUB75_PINS.c == 5
        && HUB75_PINS.d == 17
        && HUB75_PINS.e.is_none()
        && HUB75_PINS.lat == 4
        && HUB75_PINS.oe == 15
        && HUB75_PINS.clk == 16
        && SPARE_ADDR_GPIO == 33,
    "HUB75_PINS does not match the peripherals used by hardware::start"
);

pub struct Hub75Peripherals<'d> {
    pub i2s: AnyI2s<'d>,
    pub dma_channel: esp_hal::peripherals::DMA_I2S0<'d>,
    pub red1: AnyPin<'d>,
    pub grn1: AnyPin<'d>,
    pub blu1: AnyPin<'d>,
    pub red2: AnyPin<'d>,
    pub grn2: AnyPin<'d>,
    pub blu2: AnyPin<'d>,
    pub addr0: AnyPin<'d>,
    pub addr1: AnyPin<'d>,
    pub addr2: AnyPin<'d>,
    pub addr3: AnyPin<'d>,
    pub addr4: AnyPin<'d>,
    pub blank: AnyPin<'d>,
    pub clock: AnyPin<'d>,
    pub latch: AnyPin<'d>,
}

impl Hub75Peripherals<'_> {
    /// Bit-bang the shift register setup of the configured driver chip.
    ///
    /// Must run before the pins are handed to the I2S driver.
    pub fn init_shift_driver(&mut self) -> Result<(), ShiftDriverError<Infallible>> {
        fn output(pin: AnyPin<'_>) -> Output<'_> {
            Output::new(pin, Level::Low, OutputConfig::default())
        }

        let mut pins = ShiftDriverPins {
            data: [
                output(self.red1.reborrow()),
                output(self.grn1.reborrow()),
                output(self.blu1.reborrow()),
                output(self.red2.reborrow()),
                output(self.grn2.reborrow()),
                output(self.blu2.reborrow()),
            ],
            clock: output(self.clock.reborrow()),
            latch: output(self.latch.reborrow()),
            blank: output(self.blank.reborrow()),
        };
        pins.init(PANEL_CONFIG.driver, PANEL_CONFIG.width())
    }
}

/// Hands finished frames to [`hub75_task`].
pub struct FrameExchange {
    back: Option<&'static mut FBType>,
    to_panel: &'static FrameBufferExchange,
    from_panel: &'static FrameBufferExchange,
}

impl FrameSink for FrameExchange {
    async fn present(&mut self, canvas: &PanelCanvas) {
        let Some(fb) = self.back.take() else {
            return;
        };
        // every pixel is rewritten, black included, control bits stay as formatted
        let Ok(()) = canvas.blit(&mut *fb);

        // send the frame buffer to be rendered
        self.to_panel.signal(fb);
        // get the next frame buffer
        self.back = Some(self.from_panel.wait().await);
    }
}

#[task]
async fn hub75_task(
    peripherals: Hub75Peripherals<'static>,
    ready: &'static Signal<CriticalSectionRawMutex, bool>,
    rx: &'static FrameBufferExchange,
    tx: &'static FrameBufferExchange,
    fb: &'static mut FBType,
) {
    info!("hub75_task: starting!");
    let channel = peripherals.dma_channel;
    let (_, tx_descriptors) = esp_hal::dma_descriptors!(0, FBType::dma_buffer_size_bytes());

    let pins = Hub75Pins16 {
        red1: peripherals.red1,
        grn1: peripherals.grn1,
        blu1: peripherals.blu1,
        red2: peripherals.red2,
        grn2: peripherals.grn2,
        blu2: peripherals.blu2,
        addr0: peripherals.addr0,
        addr1: peripherals.addr1,
        addr2: peripherals.addr2,
        addr3: peripherals.addr3,
        addr4: peripherals.addr4,
        blank: peripherals.blank,
        clock: peripherals.clock,
        latch: peripherals.latch,
    };

    let mut hub75 = match Hub75::new(
        peripherals.i2s,
        pins,
        channel,
        tx_descriptors,
        Rate::from_mhz(CLOCK_MHZ),
    ) {
        Ok(hub75) => hub75.into_async(),
        Err(_) => {
            ready.signal(false);
            return;
        }
    };
    ready.signal(true);

    let mut count = 0u32;
    let mut start = Instant::now();

    let mut fb = fb;

    loop {
        // if there is a new buffer available, get it and send the old one
        if rx.signaled() {
            let new_fb = rx.wait().await;
            tx.signal(fb);
            fb = new_fb;
        }

        let mut xfer = match hub75.render(fb) {
            Ok(xfer) => xfer,
            Err(_) => {
                error!("hub75_task: failed to start render, panel stopped");
                return;
            }
        };
        if xfer.wait_for_done().await.is_err() {
            warn!("hub75_task: wait_for_done failed");
        }
        let (result, new_hub75) = xfer.wait();
        hub75 = new_hub75;
        if result.is_err() {
            warn!("hub75_task: transfer failed");
        }

        count += 1;
        const FPS_INTERVAL: Duration = Duration::from_secs(1);
        if start.elapsed() > FPS_INTERVAL {
            debug!("hub75_task: refresh rate {}", count);
            count = 0;
            start = Instant::now();
        }
    }
}

/// What the binaries get back from [`start`].
pub struct Board {
    pub screen: PanelScreen,
    pub rng: Rng,
}

fn log_config() {
    info!(
        "panel: {}x{} chain {} ({}x{}), {} bits, {} MHz",
        PANEL_CONFIG.res_x,
        PANEL_CONFIG.res_y,
        PANEL_CONFIG.chain,
        PANEL_CONFIG.width(),
        PANEL_CONFIG.height(),
        PANEL_CONFIG.bits,
        PANEL_CONFIG.clock_mhz
    );
    info!("driver: {}", PANEL_CONFIG.driver.name());
    for (signal, gpio) in PANEL_CONFIG.pins.signals() {
        match gpio {
            Some(gpio) => info!("  {} => GPIO{}", signal, gpio),
            None => info!("  {} => not connected", signal),
        }
    }
}

/// Bring up the chip, the panel and the refresh task.
///
/// `intro` is logged first. Returns `None` when the panel could not be set
/// up; the reason has been logged by then.
pub async fn start(intro: &'static str) -> Option<Board> {
    #[cfg(feature = "log")]
    esp_println::logger::init_logger(log::LevelFilter::Info);
    info!("{}", intro);
    log_config();

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    let sw_ints = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    let timg0 = TimerGroup::new(peripherals.TIMG0);

    info!("init embassy");
    esp_hal_embassy::init(timg0.timer0);

    let mut hub75_peripherals = Hub75Peripherals {
        i2s: peripherals.I2S0.into(),
        dma_channel: peripherals.DMA_I2S0,
        red1: peripherals.GPIO25.degrade(),
        grn1: peripherals.GPIO26.degrade(),
        blu1: peripherals.GPIO27.degrade(),
        red2: peripherals.GPIO14.degrade(),
        grn2: peripherals.GPIO12.degrade(),
        blu2: peripherals.GPIO13.degrade(),
        addr0: peripherals.GPIO23.degrade(),
        addr1: peripherals.GPIO19.degrade(),
        addr2: peripherals.GPIO5.degrade(),
        addr3: peripherals.GPIO17.degrade(),
        addr4: peripherals.GPIO33.degrade(),
        blank: peripherals.GPIO15.degrade(),
        clock: peripherals.GPIO16.degrade(),
        latch: peripherals.GPIO4.degrade(),
    };

    if hub75_peripherals.init_shift_driver().is_err() {
        error!("Panel not initialized properly. Check connections.");
        return None;
    }

    info!("init framebuffers");
    // new() already formats the control bits
    let fb0 = mk_static!(FBType, FBType::new());
    let fb1 = mk_static!(FBType, FBType::new());

    let hp_executor = mk_static!(
        InterruptExecutor<2>,
        InterruptExecutor::new(sw_ints.software_interrupt2)
    );
    let high_pri_spawner = hp_executor.start(Priority::Priority3);

    // hub75 runs as high priority task
    if high_pri_spawner
        .spawn(hub75_task(hub75_peripherals, &PANEL_READY, &TO_PANEL, &FROM_PANEL, fb1))
        .is_err()
    {
        error!("failed to spawn hub75_task");
        return None;
    }

    if !PANEL_READY.wait().await {
        error!("Panel not initialized properly. Check connections.");
        return None;
    }
    info!("Panel initialized successfully!");

    let exchange = FrameExchange {
        back: Some(fb0),
        to_panel: &TO_PANEL,
        from_panel: &FROM_PANEL,
    };

    Some(Board {
        screen: Screen::new(exchange, Delay),
        rng: Rng::new(peripherals.RNG),
    })
}
