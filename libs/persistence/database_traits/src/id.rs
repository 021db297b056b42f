use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier is not 24 hexadecimal characters")]
    Malformed,
}

/// A 12-byte document identifier rendered as 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub const LEN: usize = 24;

    /// Time-ordered id: the first 12 bytes of a UUIDv7, i.e. the millisecond
    /// timestamp followed by the per-process counter.
    pub fn generate() -> Self {
        let bytes = Uuid::now_v7().into_bytes();
        let hex: String = bytes[..12].iter().map(|b| format!("{b:02x}")).collect();
        Self(hex)
    }

    /// Blank input is `Empty`; anything else must be exactly 24 hex
    /// characters, surrounding whitespace included.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if raw.trim().is_empty() {
            return Err(IdError::Empty);
        }
        if raw.len() != Self::LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(IdError::Malformed);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str { &self.0 }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
