//! Hue and saturation in the bridge's own units.

use serde::{Deserialize, Serialize};

/// Hue and Saturation color representation.
///
/// - Hue: position on the color wheel, 0-65535 covering 0-360 degrees
/// - Saturation: 0 (white) to 254 (fully colored)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueSaturation {
    hue: u16,
    saturation: u8,
}

impl HueSaturation {
    pub const MAX_SATURATION: u8 = 254;

    /// Create a new HueSaturation with the given values.
    ///
    /// Returns `None` if the saturation is above 254; every `u16` is a valid hue.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::HueSaturation;
    ///
    /// assert!(HueSaturation::create(0, 254).is_some());
    /// assert!(HueSaturation::create(65535, 0).is_some());
    /// assert!(HueSaturation::create(180, 255).is_none());
    /// ```
    pub fn create(hue: u16, saturation: u8) -> Option<Self> {
        if saturation <= Self::MAX_SATURATION {
            Some(HueSaturation { hue, saturation })
        } else {
            None
        }
    }

    /// Build from a hue angle in degrees and a saturation fraction (0.0-1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::HueSaturation;
    ///
    /// let hs = HueSaturation::from_degrees(180.0, 1.0);
    /// assert_eq!(hs.hue(), 32768);
    /// assert_eq!(hs.saturation(), 254);
    /// ```
    pub fn from_degrees(degrees: f32, saturation: f32) -> Self {
        let degrees = degrees.rem_euclid(360.0);
        let hue = (degrees / 360.0 * f32::from(u16::MAX)).round() as u16;
        let saturation =
            (saturation.clamp(0.0, 1.0) * f32::from(Self::MAX_SATURATION)).round() as u8;
        HueSaturation { hue, saturation }
    }

    /// Get the hue value.
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Get the saturation value.
    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Hue angle in degrees.
    pub fn degrees(&self) -> f32 {
        f32::from(self.hue) / f32::from(u16::MAX) * 360.0
    }
}
