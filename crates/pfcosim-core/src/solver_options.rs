//! Ordered solver option mapping applied to the load-flow command at setup.
//!
//! Options are engine attribute assignments such as `iopt_net = 0`. They are
//! applied in the order they were declared, so the mapping keeps insertion order
//! instead of sorting keys.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// Option name applied by default: network representation flag of the load flow.
pub const DEFAULT_NETWORK_OPTION: &str = "iopt_net";

/// Value assigned to a single solver attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(v) => write!(f, "{}", v),
            AttributeValue::Int(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(i64::from(v))
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

/// Ordered mapping of solver option name to value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolverOptions {
    entries: Vec<(String, AttributeValue)>,
}

impl SolverOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The load-flow default: `{"iopt_net": 0}`.
    pub fn load_flow_defaults() -> Self {
        let mut options = Self::new();
        options
            .entries
            .push((DEFAULT_NETWORK_OPTION.to_string(), AttributeValue::Int(0)));
        options
    }

    /// Append an option. Names must be unique and non-empty.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> CoreResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::Configuration(
                "solver option name must not be empty".to_string(),
            ));
        }
        if self.get(&name).is_some() {
            return Err(CoreError::Configuration(format!(
                "duplicate solver option '{}'",
                name
            )));
        }
        self.entries.push((name, value.into()));
        Ok(())
    }

    /// Builder-style variant of [`SolverOptions::insert`].
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> CoreResult<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterate options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SolverOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SolverOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = SolverOptions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of solver option names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut options = SolverOptions::new();
                while let Some((name, value)) = access.next_entry::<String, AttributeValue>()? {
                    options.insert(name, value).map_err(serde::de::Error::custom)?;
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}
