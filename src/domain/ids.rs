use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identity of the authenticated caller; the lookup key for carts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to the catalog product a line item stands for.
///
/// The wrapped string is always in canonical form, so two references to the
/// same product compare equal no matter how the caller spelled them:
/// surrounding whitespace is dropped and 24 digit hex object ids are
/// lower-cased. On the wire both JSON strings and JSON integers are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemRef(String);

impl ItemRef {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(canonicalize(raw.as_ref()))
    }
}

fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() == 24 && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
        trimmed.to_ascii_lowercase()
    } else {
        trimmed.to_string()
    }
}

impl From<&str> for ItemRef {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ItemRef {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for ItemRef {
    fn from(raw: u64) -> Self {
        Self::new(raw.to_string())
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => ItemRef::new(text),
            Raw::Number(number) => ItemRef::from(number),
        })
    }
}

/// Identifier of a single line item inside a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Id generator shared by the resource actors.
pub fn next_resource_id() -> String {
    Uuid::new_v4().to_string()
}
