//! Pixel-by-pixel painting of the two strips.

use embedded_hal_async::delay::DelayNs;
use smart_leds::{RGB8, SmartLedsWriteAsync, brightness};

use crate::config::{
    Config, EXTERNAL_LEDS, EXTERNAL_SEGMENTS, ONBOARD_LEDS, ONBOARD_SEGMENTS, Segment,
};
use crate::palette::{Level, POMEGRANATE};

/// An LED strip together with the frame last sent to it.
pub struct Strip<W, const N: usize> {
    writer: W,
    frame: [RGB8; N],
    brightness: u8,
    pause_ms: u32,
}

impl<W, const N: usize> Strip<W, N>
where
    W: SmartLedsWriteAsync<Color = RGB8>,
{
    pub fn new(writer: W, brightness: u8, pause_ms: u32) -> Self {
        Self {
            writer,
            frame: [RGB8::default(); N],
            brightness,
            pause_ms,
        }
    }

    pub fn frame(&self) -> &[RGB8; N] {
        &self.frame
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Send the whole frame to the strip.
    pub async fn flush(&mut self) -> Result<(), W::Error> {
        self.writer
            .write(brightness(self.frame.iter().copied(), self.brightness))
            .await
    }

    /// Set every pixel to `color` and flush once.
    pub async fn fill(&mut self, color: RGB8) -> Result<(), W::Error> {
        self.frame = [color; N];
        self.flush().await
    }

    /// Paint each segment from its band at `level`, flushing after every
    /// pixel and pausing before the next one.
    ///
    /// Pixels past the end of the strip are skipped.
    pub async fn paint<D: DelayNs>(
        &mut self,
        segments: &[Segment],
        level: Level,
        delay: &mut D,
    ) -> Result<(), W::Error> {
        for segment in segments {
            let color = segment.band.color(level);
            let end = segment.pixels.end.min(N);
            let start = segment.pixels.start.min(end);
            for pixel in start..end {
                self.frame[pixel] = color;
                self.flush().await?;
                delay.delay_ms(self.pause_ms).await;
            }
        }
        Ok(())
    }
}

/// The onboard ring and the external strip, painted one after the other.
pub struct Strips<A, B> {
    pub onboard: Strip<A, ONBOARD_LEDS>,
    pub external: Strip<B, EXTERNAL_LEDS>,
}

impl<A, B, E> Strips<A, B>
where
    A: SmartLedsWriteAsync<Color = RGB8, Error = E>,
    B: SmartLedsWriteAsync<Color = RGB8, Error = E>,
{
    pub fn new(onboard: A, external: B, config: &Config) -> Self {
        Self {
            onboard: Strip::new(onboard, config.onboard_brightness, config.onboard_pause_ms),
            external: Strip::new(
                external,
                config.external_brightness,
                config.external_pause_ms,
            ),
        }
    }

    /// Show a solid color on the board until the first step paints it.
    pub async fn splash(&mut self) -> Result<(), E> {
        self.onboard.fill(POMEGRANATE).await
    }

    pub async fn paint<D: DelayNs>(&mut self, level: Level, delay: &mut D) -> Result<(), E> {
        self.onboard.paint(&ONBOARD_SEGMENTS, level, delay).await?;
        self.external.paint(&EXTERNAL_SEGMENTS, level, delay).await
    }
}
