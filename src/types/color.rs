//! RGB colors and their conversion into the bridge's color space.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Brightness, HueSaturation};

/// An RGB color with red, green, and blue components (0-255 each).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub(crate) red: u8,
    pub(crate) green: u8,
    pub(crate) blue: u8,
}

impl Color {
    /// Create a color with the given RGB values.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a default color (black: 0,0,0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// Convert to hue, saturation and brightness as the bridge understands them.
    ///
    /// Hue covers 0-65535, saturation and brightness 0-254. Brightness never
    /// drops below 1 so that sending a dark color does not read as "off".
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Color;
    ///
    /// let (hs, bri) = Color::rgb(255, 0, 0).to_hue();
    /// assert_eq!(hs.hue(), 0);
    /// assert_eq!(hs.saturation(), 254);
    /// assert_eq!(bri.value(), 254);
    ///
    /// let (_, bri) = Color::rgb(0, 0, 0).to_hue();
    /// assert_eq!(bri.value(), 1);
    /// ```
    pub fn to_hue(&self) -> (HueSaturation, Brightness) {
        let r = f32::from(self.red) / 255.0;
        let g = f32::from(self.green) / 255.0;
        let b = f32::from(self.blue) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;

        let (degrees, saturation) = if chroma == 0.0 {
            (0.0, 0.0)
        } else {
            let sector = if max == r {
                (g - b) / chroma
            } else if max == g {
                (b - r) / chroma + 2.0
            } else {
                (r - g) / chroma + 4.0
            };
            (sector * 60.0, chroma / max)
        };

        let brightness = (max * f32::from(Brightness::MAX)).round() as u8;
        (
            HueSaturation::from_degrees(degrees, saturation),
            Brightness::saturating(brightness),
        )
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse from comma-separated string (e.g., "255,128,0").
    fn from_str(s: &str) -> Result<Self, String> {
        let parts = s
            .split(',')
            .map(|c| c.trim().parse::<u8>().map_err(|e| format!("{c:?}: {e}")))
            .collect::<Result<Vec<u8>, String>>()?;
        match parts.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err("Expected format: r,g,b".into()),
        }
    }
}
