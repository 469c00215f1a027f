//! The three read-only collaborators a display option is evaluated against.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::comparison::{is_blank_value, value_text};
use crate::errors::{EvalError, Result};

pub mod options;
pub mod zone;

pub use options::{OptionNameMap, OptionTable};
pub use zone::{FixedZone, TrackerZone, ZoneChecker};

// Canonical attribute keys the resolver treats specially.
pub const ZONE: &str = "devicetracker_zone";
pub const ZONE_NAME: &str = "devicetracker_zone_name";
pub const PLACE_TYPE: &str = "place_type";
pub const PLACE_CATEGORY: &str = "place_category";
pub const STREET: &str = "street";
pub const STREET_REF: &str = "street_ref";
pub const STREET_NUMBER: &str = "street_number";
pub const TRACKER_ID: &str = "devicetracker_id";

/// Flat snapshot of geocoding attributes.
pub trait AttributeStore: Send + Sync {
    fn get(&self, key: &str) -> Option<&Value>;

    fn is_blank(&self, key: &str) -> bool {
        is_blank_value(self.get(key))
    }

    fn get_safe_string(&self, key: &str) -> String {
        value_text(self.get(key)).unwrap_or_default()
    }
}

impl AttributeStore for Map<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }
}

/// Owned attribute snapshot, deserialized from a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    inner: Map<String, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| EvalError::InvalidAttributes(e.to_string()))?;
        match value {
            Value::Object(inner) => Ok(Self { inner }),
            other => Err(EvalError::InvalidAttributes(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn clear(&mut self, key: &str) {
        self.inner.remove(key);
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(inner: Map<String, Value>) -> Self {
        Self { inner }
    }
}

impl AttributeStore for Attributes {
    fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }
}
