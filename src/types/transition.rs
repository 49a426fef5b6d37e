//! Transition time between lamp states.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration of a state change, counted in ticks of 100 ms.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Transition {
    ticks: u16,
}

impl Default for Transition {
    fn default() -> Self {
        Transition {
            ticks: Self::DEFAULT_TICKS,
        }
    }
}

impl Transition {
    pub const TICK: Duration = Duration::from_millis(100);
    pub const DEFAULT_TICKS: u16 = 4;

    pub fn from_ticks(ticks: u16) -> Self {
        Transition { ticks }
    }

    /// Round a duration to the nearest tick, saturating at `u16::MAX` ticks.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use hue_lights_rs::Transition;
    ///
    /// assert_eq!(Transition::from_duration(Duration::from_millis(1_000)).ticks(), 10);
    /// assert_eq!(Transition::from_duration(Duration::from_millis(149)).ticks(), 1);
    /// assert_eq!(Transition::default().ticks(), 4);
    /// ```
    pub fn from_duration(duration: Duration) -> Self {
        let ticks = (duration.as_millis() + 50) / Self::TICK.as_millis();
        Transition {
            ticks: u16::try_from(ticks).unwrap_or(u16::MAX),
        }
    }

    pub fn ticks(&self) -> u16 {
        self.ticks
    }

    pub fn duration(&self) -> Duration {
        Self::TICK * u32::from(self.ticks)
    }
}

impl From<Duration> for Transition {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}
