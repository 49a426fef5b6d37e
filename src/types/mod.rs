//! Value types for lamp control parameters.

mod alert;
mod brightness;
mod color;
mod effect;
mod hue_saturation;
mod transition;

pub use alert::Alert;
pub use brightness::Brightness;
pub use color::Color;
pub use effect::{ColorMode, Effect};
pub use hue_saturation::HueSaturation;
pub use transition::Transition;
