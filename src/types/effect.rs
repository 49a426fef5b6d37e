//! Dynamic effects and color modes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Dynamic effect of a lamp.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use hue_lights_rs::Effect;
///
/// assert_eq!(Effect::from_str("colorloop").unwrap(), Effect::ColorLoop);
/// assert_eq!(Effect::None.to_string(), "none");
/// ```
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Effect {
    None,
    /// Cycle through all hues at the current brightness and saturation
    ColorLoop,
}

/// Which color attributes the lamp currently follows.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorMode {
    /// Hue and saturation
    Hs,
    /// CIE xy coordinates
    Xy,
    /// Color temperature
    Ct,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_color_modes_parse() {
        for mode in ColorMode::iter() {
            assert_eq!(ColorMode::from_str(mode.as_ref()).unwrap(), mode);
        }
        assert!(ColorMode::from_str("rgb").is_err());
    }

    #[test]
    fn test_effect_serializes_like_bridge() {
        assert_eq!(
            serde_json::to_value(Effect::ColorLoop).unwrap(),
            serde_json::json!("colorloop")
        );
    }
}
