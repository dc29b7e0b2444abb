//! Drive WS2812 LEDs (aka Neopixel) from an nRF PWM peripheral with embassy.
//!
//! [`Ws2812`] implements both `SmartLedsWrite` and `SmartLedsWriteAsync`
//! from `smart-leds`. Each pixel is expanded to 24 PWM duty words which the
//! sequencer streams to the data pin by EasyDMA, so the encoded frame has to
//! live in RAM for as long as the driver does.
//!
//! Based on [ws2812-nrf52833-pwm](https://github.com/BartMassey/ws2812-nrf52833-pwm).

#![no_std]

use embassy_nrf::{Peri, gpio, pwm};
use embassy_time::{Duration, Timer, block_for};
use rgb::RGB8;
use smart_leds_trait::{SmartLedsWrite, SmartLedsWriteAsync};

/// WS2812 0-bit high time in ns.
const T0H_NS: u32 = 400;
/// WS2812 1-bit high time in ns.
const T1H_NS: u32 = 800;
/// WS2812 bit period in ns.
const FRAME_NS: u32 = 1250;
/// Latch time in µs (minimum 250µs for some parts, plus slop).
const RESET_US: u32 = 270;
/// PWM clock in MHz.
const PWM_CLOCK: u32 = 16;
/// Duty words per pixel.
const WORDS_PER_LED: usize = 24;

const fn to_ticks(ns: u32) -> u32 {
    (ns * PWM_CLOCK + 500) / 1000
}

const RESET_TICKS: u32 = to_ticks(RESET_US * 1000);
const PWM_PERIOD: u16 = to_ticks(FRAME_NS) as u16;

/// Duty word for a 0 bit and a 1 bit, with the polarity flag set.
const BITS: [u16; 2] = [
    to_ticks(T0H_NS) as u16 | 0x8000,
    to_ticks(T1H_NS) as u16 | 0x8000,
];

/// Encoded frame for a chain of `LEDS` pixels.
pub type Buffer<const LEDS: usize> = [[u16; WORDS_PER_LED]; LEDS];

/// A frame with every pixel off, for initializing a static [`Buffer`].
pub const fn dark<const LEDS: usize>() -> Buffer<LEDS> {
    [[BITS[0]; WORDS_PER_LED]; LEDS]
}

/// Duty words for one pixel, green first, most significant bit first.
fn encode(color: RGB8) -> [u16; WORDS_PER_LED] {
    let grb = ((color.g as u32) << 16) | ((color.r as u32) << 8) | (color.b as u32);
    core::array::from_fn(|i| BITS[((grb >> (WORDS_PER_LED - 1 - i)) & 1) as usize])
}

/// A chain of `LEDS` WS2812-family pixels on one GPIO.
pub struct Ws2812<const LEDS: usize> {
    pwm: pwm::SequencePwm<'static>,
    buf: &'static mut Buffer<LEDS>,
}

impl<const LEDS: usize> Ws2812<LEDS> {
    /// Set up the chain on `pin`, driven by the `pwm` instance.
    pub fn new<Pwm: pwm::Instance, P: gpio::Pin>(
        pwm: Peri<'static, Pwm>,
        pin: Peri<'static, P>,
        buf: &'static mut Buffer<LEDS>,
    ) -> Result<Self, pwm::Error> {
        let mut config = pwm::Config::default();
        config.counter_mode = pwm::CounterMode::Up;
        config.max_duty = PWM_PERIOD;
        config.prescaler = pwm::Prescaler::Div1;
        config.sequence_load = pwm::SequenceLoad::Common;
        config.ch0_drive = gpio::OutputDrive::HighDrive0Standard1;
        let pwm = pwm::SequencePwm::new_1ch(pwm, pin, config)?;
        Ok(Self { pwm, buf })
    }

    /// Time the sequencer needs to shift out the frame and latch it.
    fn frame_time() -> Duration {
        let bits = (LEDS * WORDS_PER_LED) as u64;
        Duration::from_micros(bits * FRAME_NS as u64 / 1000 + RESET_US as u64)
    }

    /// Encode `colors` into the frame. Pixels past the end of `colors` go
    /// dark, extra colors are dropped.
    fn load<T, I>(&mut self, colors: T)
    where
        T: IntoIterator<Item = I>,
        I: Into<RGB8>,
    {
        let mut colors = colors.into_iter();
        for words in self.buf.iter_mut() {
            *words = colors
                .next()
                .map_or([BITS[0]; WORDS_PER_LED], |c| encode(c.into()));
        }
    }

    fn sequence_config() -> pwm::SequenceConfig {
        let mut conf = pwm::SequenceConfig::default();
        conf.refresh = 0;
        conf.end_delay = RESET_TICKS;
        conf
    }
}

impl<const LEDS: usize> SmartLedsWrite for Ws2812<LEDS> {
    type Error = pwm::Error;
    type Color = RGB8;

    /// Shift out one frame, busy-waiting until it has latched.
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.load(iterator);
        let seq = pwm::SingleSequencer::new(
            &mut self.pwm,
            self.buf.as_flattened(),
            Self::sequence_config(),
        );
        seq.start(pwm::SingleSequenceMode::Times(1))?;
        block_for(Self::frame_time());
        Ok(())
    }
}

impl<const LEDS: usize> SmartLedsWriteAsync for Ws2812<LEDS> {
    type Error = pwm::Error;
    type Color = RGB8;

    /// Shift out one frame, yielding to the executor until it has latched.
    async fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.load(iterator);
        let seq = pwm::SingleSequencer::new(
            &mut self.pwm,
            self.buf.as_flattened(),
            Self::sequence_config(),
        );
        seq.start(pwm::SingleSequenceMode::Times(1))?;
        Timer::after(Self::frame_time()).await;
        Ok(())
    }
}
