use core::ops::Range;

use crate::palette::Band;

/// Microphone samples per recorded block.
pub const NUM_SAMPLES: usize = 160;

/// Pixels on the board itself.
pub const ONBOARD_LEDS: usize = 10;
/// Pixels on the strip hanging off the A7 pad.
pub const EXTERNAL_LEDS: usize = 120;

/// A run of pixels painted from one color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub pixels: Range<usize>,
    pub band: Band,
}

/// Upper half from the top table, lower half from the bottom one.
pub const ONBOARD_SEGMENTS: [Segment; 2] = [
    Segment {
        pixels: 0..5,
        band: Band::Top,
    },
    Segment {
        pixels: 5..10,
        band: Band::Bottom,
    },
];

/// Only the first 60 pixels are painted, the rest stay dark.
pub const EXTERNAL_SEGMENTS: [Segment; 2] = [
    Segment {
        pixels: 0..30,
        band: Band::Bottom,
    },
    Segment {
        pixels: 30..60,
        band: Band::Top,
    },
];

/// Tuning knobs for sensing and painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Raw light value (16-bit scale) that maps to reading 0.
    pub light_min: f32,
    /// Raw light value that maps to reading 10.
    pub light_max: f32,
    /// Exponential scaling factor for sound, reasonable in `-10..=10`.
    pub curve: f32,
    /// Added to the measured quiet RMS to get the floor.
    pub floor_margin: f32,
    /// Ceiling minus floor. Lower means more color change with less sound.
    pub sensitivity_span: f32,
    /// Skip measuring at startup and use this floor.
    pub fixed_floor: Option<f32>,
    /// Brightness applied to every onboard flush.
    pub onboard_brightness: u8,
    /// Brightness applied to every external flush.
    pub external_brightness: u8,
    /// Pause after each onboard pixel.
    pub onboard_pause_ms: u32,
    /// Pause after each external pixel.
    pub external_pause_ms: u32,
    /// Pause after a failed step before trying again.
    pub error_pause_ms: u32,
}

impl Config {
    /// Exponent used by the sound curve, `10^(curve * -0.1)`.
    pub fn scale_exponent(&self) -> f32 {
        libm::powf(10.0, self.curve * -0.1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            light_min: 2_000.0,
            light_max: 100_000.0,
            curve: 2.0,
            floor_margin: 10.0,
            sensitivity_span: 10.0,
            fixed_floor: None,
            // 30 %
            onboard_brightness: 77,
            external_brightness: u8::MAX,
            onboard_pause_ms: 50,
            external_pause_ms: 10,
            error_pause_ms: 15,
        }
    }
}
