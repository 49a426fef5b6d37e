//! Lamps and their state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Error;
use crate::keys;
use crate::parameter::{Parameter, ParameterSet};
use crate::types::{Alert, Brightness, ColorMode, Effect, Transition};

type Result<T> = std::result::Result<T, Error>;

/// Last known state of a lamp as reported by the bridge.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LampState {
    pub on: bool,
    pub brightness: u8,
    pub hue: u16,
    pub saturation: u8,
    /// `none`, `select` or `lselect`
    pub alert: String,
    /// `none` or `colorloop`
    pub effect: String,
    pub color_mode: String,
    /// Not reported by the bridge; used when sending the state back.
    pub transition: Transition,
    pub reachable: bool,
}

impl Default for LampState {
    fn default() -> Self {
        LampState {
            on: false,
            brightness: Brightness::MAX,
            hue: 0,
            saturation: 0,
            alert: Alert::None.to_string(),
            effect: Effect::None.to_string(),
            color_mode: String::new(),
            transition: Transition::default(),
            reachable: false,
        }
    }
}

impl LampState {
    /// Decode the `state` object of a lamp.
    ///
    /// All of `on`, `reachable`, `hue`, `bri`, `sat`, `colormode`, `effect` and
    /// `alert` must be present with the right type.
    pub fn from_json(doc: &Value) -> Result<Self> {
        let Value::Object(map) = doc else {
            return Err(Error::malformed("lamp state is not an object", doc));
        };
        let field = Fields { map, doc };

        Ok(LampState {
            on: field.bool(keys::ON)?,
            reachable: field.bool(keys::REACHABLE)?,
            hue: field.uint(keys::HUE)?,
            brightness: field.uint(keys::BRIGHTNESS)?,
            saturation: field.uint(keys::SATURATION)?,
            color_mode: field.text(keys::COLOR_MODE)?,
            effect: field.text(keys::EFFECT)?,
            alert: field.text(keys::ALERT)?,
            transition: Transition::default(),
        })
    }

    /// The seven parameters that reproduce this state on a lamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use hue_lights_rs::LampState;
    ///
    /// let state = LampState { on: true, brightness: 100, ..LampState::default() };
    /// assert_eq!(
    ///     state.to_parameters().to_json(),
    ///     json!({
    ///         "on": true, "bri": 100, "hue": 0, "sat": 0,
    ///         "alert": "none", "effect": "none", "transitiontime": 4
    ///     })
    /// );
    /// ```
    pub fn to_parameters(&self) -> ParameterSet {
        ParameterSet::from(vec![
            Parameter::on(self.on),
            Parameter::new(keys::BRIGHTNESS, self.brightness),
            Parameter::hue(self.hue),
            Parameter::saturation(self.saturation),
            Parameter::new(keys::ALERT, self.alert.as_str()),
            Parameter::new(keys::EFFECT, self.effect.as_str()),
            Parameter::transition(self.transition),
        ])
    }

    pub fn alert_mode(&self) -> Option<Alert> {
        Alert::from_str(&self.alert).ok()
    }

    pub fn effect_mode(&self) -> Option<Effect> {
        Effect::from_str(&self.effect).ok()
    }

    pub fn color_mode(&self) -> Option<ColorMode> {
        ColorMode::from_str(&self.color_mode).ok()
    }
}

/// A single lamp connected to the bridge.
///
/// # Example
///
/// ```
/// use hue_lights_rs::Lamp;
///
/// let lamp = Lamp::new("1");
/// assert_eq!(lamp.id(), "1");
/// assert!(!lamp.state.on);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Lamp {
    id: String,
    pub name: String,
    pub lamp_type: String,
    pub model_id: String,
    pub software_version: String,
    pub state: LampState,
}

impl Lamp {
    pub fn new(id: &str) -> Self {
        Lamp {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Decode a lamp from its entry in the bridge's light listing.
    pub fn from_json(id: &str, doc: &Value) -> Result<Self> {
        let mut lamp = Lamp::new(id);
        lamp.update_from_json(doc)?;
        Ok(lamp)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Overwrite this lamp with a freshly fetched description.
    ///
    /// Requires `name`, `modelid`, `type`, `swversion` and a complete `state`.
    /// On error the lamp is left untouched. The transition time is local and
    /// kept as is.
    pub fn update_from_json(&mut self, doc: &Value) -> Result<()> {
        let Value::Object(map) = doc else {
            return Err(Error::malformed("lamp is not an object", doc));
        };
        let field = Fields { map, doc };

        let name = field.text(keys::NAME)?;
        let model_id = field.text(keys::MODEL_ID)?;
        let lamp_type = field.text(keys::TYPE)?;
        let software_version = field.text(keys::SOFTWARE_VERSION)?;
        let state_doc = map
            .get(keys::STATE)
            .ok_or_else(|| Error::malformed("missing field \"state\"", doc))?;
        let mut state = LampState::from_json(state_doc)?;
        state.transition = self.state.transition;

        self.name = name;
        self.model_id = model_id;
        self.lamp_type = lamp_type;
        self.software_version = software_version;
        self.state = state;
        Ok(())
    }
}

/// Strict field access on a decoded object.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    doc: &'a Value,
}

impl Fields<'_> {
    fn get(&self, key: &str) -> Result<&Value> {
        self.map
            .get(key)
            .ok_or_else(|| Error::malformed(format!("missing field {key:?}"), self.doc))
    }

    fn bool(&self, key: &str) -> Result<bool> {
        self.get(key)?
            .as_bool()
            .ok_or_else(|| self.wrong_type(key))
    }

    fn text(&self, key: &str) -> Result<String> {
        self.get(key)?
            .as_str()
            .map(String::from)
            .ok_or_else(|| self.wrong_type(key))
    }

    fn uint<T: TryFrom<u64>>(&self, key: &str) -> Result<T> {
        self.get(key)?
            .as_u64()
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| self.wrong_type(key))
    }

    fn wrong_type(&self, key: &str) -> Error {
        Error::malformed(format!("field {key:?} has the wrong type"), self.doc)
    }
}
