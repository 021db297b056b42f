use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};

use crate::cache::store::{CacheError, CacheResult};

/// Encodes a value into the payload format shared by every backend.
pub fn to_bytes<T: Serialize>(value: &T) -> CacheResult<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(CacheError::Serialization)
}

pub fn from_bytes<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> CacheResult<T> {
    serde_json::from_slice(bytes).map_err(|source| {
        CacheError::Deserialization {
            key: key.to_string(),
            source,
        }
    })
}
