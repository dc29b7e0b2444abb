use core::convert::Infallible;

use embassy_nrf::{pdm, saadc};

/// The board's phototransistor on a single SAADC channel.
pub struct Phototransistor {
    saadc: saadc::Saadc<'static, 1>,
}

impl Phototransistor {
    pub async fn new(saadc: saadc::Saadc<'static, 1>) -> Self {
        saadc.calibrate().await;
        Self { saadc }
    }
}

impl rothko::LightSensor for Phototransistor {
    type Error = Infallible;

    async fn read(&mut self) -> Result<u16, Infallible> {
        let mut buf = [0i16; 1];
        self.saadc.sample(&mut buf).await;
        Ok(rothko::scale::widen_12bit(buf[0]))
    }
}

/// The board's PDM microphone, kept running between blocks.
pub struct PdmMic {
    pdm: pdm::Pdm<'static>,
}

impl PdmMic {
    pub async fn start(mut pdm: pdm::Pdm<'static>) -> Self {
        pdm.start().await;
        Self { pdm }
    }
}

impl rothko::Microphone for PdmMic {
    type Error = pdm::Error;

    async fn record(&mut self, samples: &mut [i16]) -> Result<(), pdm::Error> {
        self.pdm.sample(samples).await
    }
}
