use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity payload presented at login and embedded in the access token.
///
/// Any JSON object is accepted. Only `email` carries meaning, for the
/// booking ownership check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Map<String, Value>);

impl Identity {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Identity {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
