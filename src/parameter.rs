//! Typed key/value parameters that make up request bodies.

use log::debug;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::Error;
use crate::keys;
use crate::types::{Alert, Brightness, Color, Effect, HueSaturation, Transition};

/// The value of a single [`Parameter`].
///
/// Only the shapes the bridge accepts can be built; every variant has a
/// matching `From` conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Nested(ParameterSet),
    List(Vec<String>),
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for ParameterValue {
            fn from(v: $t) -> Self {
                ParameterValue::Int(i64::from(v))
            }
        })*
    };
}

int_value!(u8, u16, u32, i8, i16, i32, i64);

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        ParameterValue::Bool(v)
    }
}

/// Only finite numbers have a JSON form; NaN and infinities are refused.
impl TryFrom<f64> for ParameterValue {
    type Error = Error;

    fn try_from(v: f64) -> Result<Self, Error> {
        if v.is_finite() {
            Ok(ParameterValue::Float(v))
        } else {
            Err(Error::NonFiniteNumber(v))
        }
    }
}

impl TryFrom<f32> for ParameterValue {
    type Error = Error;

    fn try_from(v: f32) -> Result<Self, Error> {
        Self::try_from(f64::from(v))
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        ParameterValue::Text(v.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        ParameterValue::Text(v)
    }
}

impl From<ParameterSet> for ParameterValue {
    fn from(v: ParameterSet) -> Self {
        ParameterValue::Nested(v)
    }
}

impl From<Vec<Parameter>> for ParameterValue {
    fn from(v: Vec<Parameter>) -> Self {
        ParameterValue::Nested(ParameterSet::from(v))
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(v: Vec<String>) -> Self {
        ParameterValue::List(v)
    }
}

/// One mutable attribute of a lamp or group, e.g. `"bri": 200`.
///
/// # Examples
///
/// ```
/// use hue_lights_rs::{Parameter, ParameterValue};
///
/// let on = Parameter::on(true);
/// assert_eq!(on.key(), "on");
/// assert_eq!(on.value(), &ParameterValue::Bool(true));
///
/// let custom = Parameter::new("ct", 366);
/// assert_eq!(custom.value(), &ParameterValue::Int(366));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    key: String,
    value: ParameterValue,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Parameter {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A floating point parameter, e.g. a CIE coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Parameter;
    ///
    /// assert!(Parameter::float("ratio", 0.5).is_ok());
    /// assert!(Parameter::float("ratio", f64::NAN).is_err());
    /// ```
    pub fn float(key: impl Into<String>, value: f64) -> Result<Self, Error> {
        Ok(Parameter {
            key: key.into(),
            value: ParameterValue::try_from(value)?,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub fn on(on: bool) -> Self {
        Self::new(keys::ON, on)
    }

    pub fn brightness(brightness: Brightness) -> Self {
        Self::new(keys::BRIGHTNESS, brightness.value())
    }

    pub fn hue(hue: u16) -> Self {
        Self::new(keys::HUE, hue)
    }

    pub fn saturation(saturation: u8) -> Self {
        Self::new(keys::SATURATION, saturation)
    }

    /// Transition time of the change. [`Transition::default`] is 400 ms.
    pub fn transition(transition: Transition) -> Self {
        Self::new(keys::TRANSITION, transition.ticks())
    }

    /// Alert effect; [`Alert::Select`] performs a single breathe cycle.
    pub fn alert(alert: Alert) -> Self {
        Self::new(keys::ALERT, alert.to_string())
    }

    /// Dynamic effect; [`Effect::ColorLoop`] cycles through all hues.
    pub fn effect(effect: Effect) -> Self {
        Self::new(keys::EFFECT, effect.to_string())
    }

    pub fn name(name: &str) -> Self {
        Self::new(keys::NAME, name)
    }

    /// Member lamp ids of a group.
    pub fn lights<S: AsRef<str>>(ids: &[S]) -> Self {
        Self::new(
            keys::LIGHTS,
            ids.iter().map(|id| id.as_ref().to_string()).collect::<Vec<_>>(),
        )
    }

    /// The hue, saturation and brightness parameters that reproduce `color`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::{Color, Parameter, ParameterValue};
    ///
    /// let params = Parameter::color(&Color::rgb(255, 0, 0));
    /// assert_eq!(params[0], Parameter::new("hue", 0u16));
    /// assert_eq!(params[1], Parameter::new("sat", 254u8));
    /// assert_eq!(params[2], Parameter::new("bri", 254u8));
    /// ```
    pub fn color(color: &Color) -> [Parameter; 3] {
        let (hs, brightness) = color.to_hue();
        Self::hue_saturation(&hs, brightness)
    }

    pub fn hue_saturation(hs: &HueSaturation, brightness: Brightness) -> [Parameter; 3] {
        [
            Self::hue(hs.hue()),
            Self::saturation(hs.saturation()),
            Self::brightness(brightness),
        ]
    }
}

/// An ordered set of parameters that serializes to one flat JSON object.
///
/// Keys are unique in the output: when the same key is pushed twice the later
/// value wins and keeps the position of the first occurrence.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use hue_lights_rs::{Parameter, ParameterSet};
///
/// let mut set = ParameterSet::new();
/// set.push(Parameter::on(true));
/// set.push(Parameter::new("bri", 100));
/// set.push(Parameter::new("bri", 200));
/// assert_eq!(set.to_json(), json!({"on": true, "bri": 200}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: Parameter) {
        self.params.push(param);
    }

    pub fn extend<I: IntoIterator<Item = Parameter>>(&mut self, params: I) {
        self.params.extend(params);
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Merge all parameters into a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.to_map())
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for param in &self.params {
            let value = param.value.to_json();
            if map.insert(param.key.clone(), value).is_some() {
                debug!("parameter {:?} given more than once, keeping the last value", param.key);
            }
        }
        map
    }
}

impl ParameterValue {
    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::Bool(v) => Value::Bool(*v),
            ParameterValue::Int(v) => Value::from(*v),
            ParameterValue::Float(v) => Value::from(*v),
            ParameterValue::Text(v) => Value::String(v.clone()),
            ParameterValue::Nested(set) => set.to_json(),
            ParameterValue::List(v) => Value::from(v.clone()),
        }
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl From<Vec<Parameter>> for ParameterSet {
    fn from(params: Vec<Parameter>) -> Self {
        ParameterSet { params }
    }
}

impl FromIterator<Parameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        ParameterSet {
            params: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ParameterSet {
    type Item = Parameter;
    type IntoIter = std::vec::IntoIter<Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}
