//! Seams between the painting loop and the board's sensors.

/// Ambient light sensor.
#[allow(async_fn_in_trait)]
pub trait LightSensor {
    type Error;

    /// Read the current light level scaled to the full `u16` range.
    async fn read(&mut self) -> Result<u16, Self::Error>;
}

/// Microphone delivering signed PCM samples.
#[allow(async_fn_in_trait)]
pub trait Microphone {
    type Error;

    /// Fill `samples` with one block of consecutive samples.
    async fn record(&mut self, samples: &mut [i16]) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SensorFault;

    pub struct FixedLight {
        pub raw: Option<u16>,
        pub reads: usize,
    }

    impl FixedLight {
        pub fn new(raw: u16) -> Self {
            Self {
                raw: Some(raw),
                reads: 0,
            }
        }
    }

    impl LightSensor for FixedLight {
        type Error = SensorFault;

        async fn read(&mut self) -> Result<u16, SensorFault> {
            self.reads += 1;
            self.raw.ok_or(SensorFault)
        }
    }

    /// Repeats `pattern` over every recorded block.
    pub struct CannedMic {
        pub pattern: Vec<i16>,
        pub fail: bool,
        pub blocks: usize,
    }

    impl CannedMic {
        pub fn new(pattern: &[i16]) -> Self {
            Self {
                pattern: pattern.to_vec(),
                fail: false,
                blocks: 0,
            }
        }

        pub fn failing() -> Self {
            Self {
                pattern: vec![0],
                fail: true,
                blocks: 0,
            }
        }
    }

    impl Microphone for CannedMic {
        type Error = SensorFault;

        async fn record(&mut self, samples: &mut [i16]) -> Result<(), SensorFault> {
            if self.fail {
                return Err(SensorFault);
            }
            self.blocks += 1;
            for (sample, value) in samples.iter_mut().zip(self.pattern.iter().cycle()) {
                *sample = *value;
            }
            Ok(())
        }
    }
}
