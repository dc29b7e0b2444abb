//! The two fixed color tables and the clamped index into them.

use smart_leds::RGB8;

pub const SHERBET: RGB8 = RGB8::new(127, 20, 0);
pub const SALMON: RGB8 = RGB8::new(80, 0, 20);
pub const POMEGRANATE: RGB8 = RGB8::new(127, 0, 2);
pub const TOMATO: RGB8 = RGB8::new(208, 8, 8);
pub const LEMON: RGB8 = RGB8::new(127, 80, 0);
pub const PERIWINKLE: RGB8 = RGB8::new(2, 0, 80);
pub const AQUA: RGB8 = RGB8::new(0, 80, 20);
pub const MARINE: RGB8 = RGB8::new(0, 80, 40);
pub const MIDNIGHT: RGB8 = RGB8::new(20, 0, 127);
pub const LIME: RGB8 = RGB8::new(20, 127, 0);

/// Number of entries in each color table.
pub const PALETTE_LEN: usize = Level::MAX.0 as usize + 1;

/// Colors for the upper band, indexed by [`Level`].
pub const TOP_COLORS: [RGB8; PALETTE_LEN] = [
    LIME,
    MIDNIGHT,
    MARINE,
    POMEGRANATE,
    PERIWINKLE,
    TOMATO,
    LEMON,
    AQUA,
    SHERBET,
    LIME,
    LIME,
];

/// Colors for the lower band, indexed by [`Level`].
pub const BTM_COLORS: [RGB8; PALETTE_LEN] = [
    MIDNIGHT,
    AQUA,
    LEMON,
    SALMON,
    POMEGRANATE,
    LEMON,
    SHERBET,
    LEMON,
    POMEGRANATE,
    AQUA,
    AQUA,
];

/// Palette index in `0..=10`.
///
/// Every constructor clamps, so indexing the color tables with a `Level`
/// cannot go out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(0);
    pub const MAX: Level = Level(10);

    pub const fn new(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Level(value)
        }
    }

    /// Blend a light and a sound reading, both on the `0..=10` scale.
    ///
    /// The mean is truncated; negative or NaN input lands on [`Level::MIN`].
    pub fn blend(light: f32, sound: f32) -> Self {
        let mean = (light + sound) / 2.0;
        if mean.is_nan() || mean <= 0.0 {
            return Self::MIN;
        }
        // `as` saturates, `new` clamps the rest.
        Self::new(libm::floorf(mean) as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

/// Which of the two color tables a pixel takes its color from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    Top,
    Bottom,
}

impl Band {
    pub const fn color(self, level: Level) -> RGB8 {
        match self {
            Band::Top => TOP_COLORS[level.index()],
            Band::Bottom => BTM_COLORS[level.index()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_clamps_to_ten() {
        assert_eq!(Level::new(10), Level::MAX);
        assert_eq!(Level::new(11), Level::MAX);
        assert_eq!(Level::new(u8::MAX).index(), 10);
        assert_eq!(Level::new(3).index(), 3);
    }

    #[test]
    fn blend_truncates_the_mean() {
        assert_eq!(Level::blend(6.0, 4.0), Level::new(5));
        assert_eq!(Level::blend(6.9, 4.0), Level::new(5));
        assert_eq!(Level::blend(0.0, 1.9), Level::MIN);
        assert_eq!(Level::blend(10.0, 10.0), Level::MAX);
    }

    #[test]
    fn blend_stays_in_range_for_odd_input() {
        assert_eq!(Level::blend(-3.0, 0.0), Level::MIN);
        assert_eq!(Level::blend(f32::NAN, 2.0), Level::MIN);
        assert_eq!(Level::blend(f32::INFINITY, 0.0), Level::MAX);
        assert_eq!(Level::blend(400.0, 400.0), Level::MAX);
    }

    #[test]
    fn bands_read_their_own_table() {
        let level = Level::new(5);
        assert_eq!(Band::Top.color(level), TOMATO);
        assert_eq!(Band::Bottom.color(level), LEMON);
        assert_eq!(Band::Top.color(Level::MIN), LIME);
        assert_eq!(Band::Bottom.color(Level::MAX), AQUA);
    }
}
