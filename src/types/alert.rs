//! Alert (breathe) effects.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Temporary alert effect of a lamp.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Alert {
    /// No alert
    None,
    /// A single breathe cycle
    Select,
    /// Breathe cycles for 15 seconds
    LSelect,
}
