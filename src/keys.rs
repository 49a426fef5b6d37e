//! Attribute names used by the bridge API.

pub const ON: &str = "on";
pub const BRIGHTNESS: &str = "bri";
pub const HUE: &str = "hue";
pub const SATURATION: &str = "sat";
pub const ALERT: &str = "alert";
pub const EFFECT: &str = "effect";
pub const STATE: &str = "state";
pub const COLOR_MODE: &str = "colormode";
pub const NAME: &str = "name";
pub const REACHABLE: &str = "reachable";
pub const TYPE: &str = "type";
pub const MODEL_ID: &str = "modelid";
pub const SOFTWARE_VERSION: &str = "swversion";
pub const TRANSITION: &str = "transitiontime";
pub const USERNAME: &str = "username";
pub const DEVICE_TYPE: &str = "devicetype";
pub const LIGHTS: &str = "lights";
pub const ID: &str = "id";
pub const INTERNAL_IP: &str = "internalipaddress";
pub const MAC_ADDRESS: &str = "macaddress";
