//! Login credentials

use std::fmt;

use serde_json::{Map, Value};

/// Form fields posted to the credential login endpoint.
///
/// Values are never printed by `Debug`.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials(Map<String, Value>);

impl Credentials {
    /// Wraps arbitrary login fields.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Username and password credentials.
    #[must_use]
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("username".to_string(), Value::String(username.into()));
        fields.insert("password".to_string(), Value::String(password.into()));
        Self(fields)
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the login request body.
    #[must_use]
    pub fn to_body(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}
