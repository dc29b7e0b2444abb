//! Paint two WS2812 strips from a pair of color tables, picking the colors
//! by how bright and how loud the room is.
//!
//! [`Rothko::step`] reads the light sensor, records one block from the
//! microphone, blends both readings into a [`Level`] and paints both strips
//! from it pixel by pixel. [`Rothko::run`] repeats that forever.
//!
//! Hardware stays behind [`LightSensor`], [`Microphone`], `smart-leds`
//! writers and an `embedded-hal-async` delay, so everything here runs on the
//! host as well.

#![cfg_attr(not(test), no_std)]

pub mod calibration;
pub mod config;
pub mod palette;
pub mod render;
pub mod scale;
pub mod sensor;

use embedded_hal_async::delay::DelayNs;
use smart_leds::{RGB8, SmartLedsWriteAsync};

pub use calibration::Calibration;
pub use config::{Config, NUM_SAMPLES};
pub use palette::Level;
pub use render::Strips;
pub use sensor::{LightSensor, Microphone};

/// Which device failed during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<L, M, S> {
    Light(L),
    Microphone(M),
    Strip(S),
}

/// Everything one step measured and decided.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub raw_light: u16,
    pub light: f32,
    pub magnitude: f32,
    pub sound: f32,
    pub level: Level,
}

pub struct Rothko<L, M, A, B, D> {
    light: L,
    mic: M,
    strips: Strips<A, B>,
    delay: D,
    calibration: Calibration,
    config: Config,
    samples: [i16; NUM_SAMPLES],
}

impl<L, M, A, B, D, E> Rothko<L, M, A, B, D>
where
    L: LightSensor,
    M: Microphone,
    A: SmartLedsWriteAsync<Color = RGB8, Error = E>,
    B: SmartLedsWriteAsync<Color = RGB8, Error = E>,
    D: DelayNs,
{
    pub fn new(
        light: L,
        mic: M,
        strips: Strips<A, B>,
        delay: D,
        calibration: Calibration,
        config: Config,
    ) -> Self {
        Self {
            light,
            mic,
            strips,
            delay,
            calibration,
            config,
            samples: [0; NUM_SAMPLES],
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn strips(&self) -> &Strips<A, B> {
        &self.strips
    }

    /// Take both readings without painting.
    pub async fn sense(&mut self) -> Result<Reading, Error<L::Error, M::Error, E>> {
        let raw_light = self.light.read().await.map_err(Error::Light)?;
        let light = scale::light_reading(raw_light, &self.config);

        self.mic
            .record(&mut self.samples)
            .await
            .map_err(Error::Microphone)?;
        let magnitude = calibration::normalized_rms(&self.samples);
        let sound = scale::sound_reading(magnitude, &self.calibration, &self.config);

        Ok(Reading {
            raw_light,
            light,
            magnitude,
            sound,
            level: Level::blend(light, sound),
        })
    }

    /// Read, blend and paint once.
    pub async fn step(&mut self) -> Result<Reading, Error<L::Error, M::Error, E>> {
        let reading = self.sense().await?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "light: {} (raw {}) sound: {} (magnitude {}) final: {}",
            reading.light,
            reading.raw_light,
            reading.sound,
            reading.magnitude,
            reading.level
        );

        self.strips
            .paint(reading.level, &mut self.delay)
            .await
            .map_err(Error::Strip)?;
        Ok(reading)
    }

    /// Step forever. A failed step goes to `on_error`, then the loop pauses
    /// for `error_pause_ms` before the next one.
    pub async fn run<F>(&mut self, mut on_error: F) -> !
    where
        F: FnMut(Error<L::Error, M::Error, E>),
    {
        loop {
            self.step_or_pause(&mut on_error).await;
        }
    }

    async fn step_or_pause<F>(&mut self, on_error: &mut F)
    where
        F: FnMut(Error<L::Error, M::Error, E>),
    {
        if let Err(e) = self.step().await {
            on_error(e);
            self.delay.delay_ms(self.config.error_pause_ms).await;
        }
    }
}
