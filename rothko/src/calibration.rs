use crate::config::{Config, NUM_SAMPLES};
use crate::sensor::Microphone;

/// RMS of `samples` after removing the DC bias.
///
/// The bias is the block mean truncated toward zero. An empty block is silent.
pub fn normalized_rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let len = samples.len() as f32;
    let sum: i64 = samples.iter().map(|&s| s as i64).sum();
    let bias = (sum as f32 / len) as i32;
    let squares: f32 = samples
        .iter()
        .map(|&s| {
            let d = (s as i32 - bias) as f32;
            d * d
        })
        .sum();
    libm::sqrtf(squares / len)
}

/// Expected sound magnitude range, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    floor: f32,
    ceiling: f32,
}

impl Calibration {
    /// Calibration with a known floor; the ceiling sits one sensitivity span
    /// above it.
    pub fn from_floor(floor: f32, config: &Config) -> Self {
        Self {
            floor,
            ceiling: floor + config.sensitivity_span,
        }
    }

    /// Calibration from a block recorded while the room is quiet.
    pub fn from_quiet(samples: &[i16], config: &Config) -> Self {
        Self::from_floor(normalized_rms(samples) + config.floor_margin, config)
    }

    /// Record one block from `mic` and calibrate against it, unless the
    /// config pins the floor.
    pub async fn measure<M: Microphone>(mic: &mut M, config: &Config) -> Result<Self, M::Error> {
        if let Some(floor) = config.fixed_floor {
            return Ok(Self::from_floor(floor, config));
        }
        let mut samples = [0i16; NUM_SAMPLES];
        mic.record(&mut samples).await?;
        Ok(Self::from_quiet(&samples, config))
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }
}
