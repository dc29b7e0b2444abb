#![no_std]
#![no_main]

mod sensors;

use embassy_executor::Spawner;
use embassy_nrf::{bind_interrupts, pdm, peripherals, saadc};
use embassy_nrf_ws2812_pwm::{Buffer, Ws2812, dark};
use embassy_time::{Delay, Timer};
use rothko::config::{EXTERNAL_LEDS, ONBOARD_LEDS};
use rothko::{Calibration, Config, Rothko, Strips};
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::sensors::{PdmMic, Phototransistor};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    PDM => pdm::InterruptHandler<peripherals::PDM>;
});

static ONBOARD_BUFFER: ConstStaticCell<Buffer<ONBOARD_LEDS>> = ConstStaticCell::new(dark());
static EXTERNAL_BUFFER: ConstStaticCell<Buffer<EXTERNAL_LEDS>> = ConstStaticCell::new(dark());

/// Time for the PDM decimation filter to settle after starting.
const MIC_SETTLE_MS: u64 = 1000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    let config = Config::default();

    defmt::info!("Running...");

    let pdm = pdm::Pdm::new(p.PDM, Irqs, p.P0_17, p.P0_16, pdm::Config::default());
    let mut mic = PdmMic::start(pdm).await;
    Timer::after_millis(MIC_SETTLE_MS).await;

    // Assume it's quiet when we start.
    let calibration = Calibration::measure(&mut mic, &config)
        .await
        .expect("to calibrate microphone");
    defmt::info!(
        "input floor: {}, ceiling: {}",
        calibration.floor(),
        calibration.ceiling()
    );

    // Phototransistor on A8
    let saadc = saadc::Saadc::new(
        p.SAADC,
        Irqs,
        saadc::Config::default(),
        [saadc::ChannelConfig::single_ended(p.P0_28)],
    );
    let light = Phototransistor::new(saadc).await;

    // Ten pixels on the board, 120 on the A7/TX pad
    let onboard: Ws2812<ONBOARD_LEDS> = Ws2812::new(p.PWM0, p.P0_13, ONBOARD_BUFFER.take())
        .expect("to set up onboard pixels");
    let external: Ws2812<EXTERNAL_LEDS> = Ws2812::new(p.PWM1, p.P0_14, EXTERNAL_BUFFER.take())
        .expect("to set up external strip");
    let mut strips = Strips::new(onboard, external, &config);
    strips.splash().await.expect("to write to onboard pixels");

    let mut app = Rothko::new(light, mic, strips, Delay, calibration, config);
    app.run(|e| defmt::warn!("step failed: {}", e)).await
}
