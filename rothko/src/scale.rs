//! Turning raw sensor values into readings on the `0..=10` scale.

use libm::powf;

use crate::calibration::Calibration;
use crate::config::Config;

/// Highest light or sound reading.
pub const READING_MAX: f32 = 10.0;

/// Linearly map `value` from `[in_min, in_max]` to `[out_min, out_max]`,
/// clamping the result to the output range.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let mapped = (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min;
    let (lo, hi) = if out_min <= out_max {
        (out_min, out_max)
    } else {
        (out_max, out_min)
    };
    mapped.clamp(lo, hi)
}

/// Exponentially map `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// `value` must already lie inside the input range. An empty or inverted
/// input range maps everything to `out_min`.
pub fn log_scale(
    value: f32,
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
    exponent: f32,
) -> f32 {
    if in_max <= in_min {
        return out_min;
    }
    let normalized = (value - in_min) / (in_max - in_min);
    out_min + powf(normalized, exponent) * (out_max - out_min)
}

/// Stretch a 12-bit ADC result over the full `u16` range. Single-ended
/// results can dip just below zero and read as dark.
pub fn widen_12bit(sample: i16) -> u16 {
    (sample.clamp(0, 0x0fff) as u16) << 4
}

/// Light reading for a raw sensor value on the 16-bit scale.
pub fn light_reading(raw: u16, config: &Config) -> f32 {
    map_range(
        raw as f32,
        config.light_min,
        config.light_max,
        0.0,
        READING_MAX,
    )
}

/// Sound reading for an RMS magnitude.
///
/// Scaled exponentially into `0..=100` between floor and ceiling, then
/// brought down to `0..=10`.
pub fn sound_reading(magnitude: f32, calibration: &Calibration, config: &Config) -> f32 {
    let floor = calibration.floor();
    let ceiling = calibration.ceiling();
    // `clamp` panics on an inverted range.
    let constrained = magnitude.min(ceiling).max(floor);
    let scaled = log_scale(
        constrained,
        floor,
        ceiling,
        0.0,
        100.0,
        config.scale_exponent(),
    );
    (scaled / 10.0).min(READING_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn map_range_clamps_both_ends() {
        assert_eq!(map_range(-5.0, 0.0, 10.0, 0.0, 1.0), 0.0);
        assert_eq!(map_range(50.0, 0.0, 10.0, 0.0, 1.0), 1.0);
        assert!(close(map_range(5.0, 0.0, 10.0, 0.0, 1.0), 0.5));
        assert!(close(map_range(2.5, 0.0, 10.0, 10.0, 0.0), 7.5));
    }

    #[test]
    fn twelve_bit_samples_widen_to_sixteen() {
        assert_eq!(widen_12bit(0), 0);
        assert_eq!(widen_12bit(1), 16);
        assert_eq!(widen_12bit(0x0800), 0x8000);
        assert_eq!(widen_12bit(0x0fff), 0xfff0);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        assert_eq!(widen_12bit(-3), 0);
        assert_eq!(widen_12bit(i16::MIN), 0);
        assert_eq!(widen_12bit(0x1000), 0xfff0);
        assert_eq!(widen_12bit(i16::MAX), 0xfff0);
    }

    #[test]
    fn dark_room_reads_zero() {
        let config = Config::default();
        for raw in [0, 100, 1_000, 1_999, 2_000] {
            assert_eq!(light_reading(raw, &config), 0.0, "raw {raw}");
        }
    }

    #[test]
    fn bright_light_clamps_to_ten() {
        let config = Config {
            light_max: 50_000.0,
            ..Config::default()
        };
        for raw in [50_000, 60_000, u16::MAX] {
            assert_eq!(light_reading(raw, &config), READING_MAX, "raw {raw}");
        }
    }

    #[test]
    fn full_scale_light_stays_below_ten_with_default_range() {
        // 100000 is out of reach of a 16-bit reading.
        let reading = light_reading(u16::MAX, &Config::default());
        assert!(close(reading, (65_535.0 - 2_000.0) * 10.0 / 98_000.0));
        assert!(reading < READING_MAX);
    }

    #[test]
    fn quiet_sound_reads_zero() {
        let config = Config::default();
        let calibration = Calibration::from_floor(40.0, &config);
        for magnitude in [0.0, 12.5, 39.9, 40.0] {
            assert_eq!(sound_reading(magnitude, &calibration, &config), 0.0);
        }
    }

    #[test]
    fn loud_sound_clamps_to_ten() {
        let config = Config::default();
        let calibration = Calibration::from_floor(40.0, &config);
        for magnitude in [50.0, 51.0, 1_000.0, f32::MAX] {
            assert!(close(sound_reading(magnitude, &calibration, &config), 10.0));
        }
    }

    #[test]
    fn sound_curve_lifts_quiet_values() {
        let config = Config::default();
        let calibration = Calibration::from_floor(40.0, &config);
        // Halfway between floor and ceiling: 0.5^0.631 * 100 / 10
        let reading = sound_reading(45.0, &calibration, &config);
        assert!(close(reading, 6.457), "{reading}");
    }

    #[test]
    fn empty_span_maps_to_minimum() {
        assert_eq!(log_scale(5.0, 5.0, 5.0, 0.0, 100.0, 0.6), 0.0);
        let config = Config {
            sensitivity_span: 0.0,
            ..Config::default()
        };
        let calibration = Calibration::from_floor(40.0, &config);
        assert_eq!(sound_reading(80.0, &calibration, &config), 0.0);
    }
}
