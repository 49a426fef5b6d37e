//! Brightness control for Hue lamps.

use serde::{Deserialize, Serialize};

/// Brightness level from 1 to 254.
///
/// The bridge treats 1 as the dimmest level that still emits light; turning a
/// lamp off goes through the `on` attribute instead.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new()
    }
}

impl Brightness {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 254;

    pub fn new() -> Self {
        Brightness { value: Self::MAX }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside valid range (1-254).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Brightness;
    ///
    /// assert!(Brightness::create(1).is_some());
    /// assert!(Brightness::create(0).is_none());
    /// assert!(Brightness::create(255).is_none());
    /// ```
    pub fn create(value: u8) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Brightness { value })
        } else {
            None
        }
    }

    /// Clamps the value into the valid range.
    pub fn saturating(value: u8) -> Self {
        Brightness {
            value: value.clamp(Self::MIN, Self::MAX),
        }
    }

    fn is_valid(value: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}
