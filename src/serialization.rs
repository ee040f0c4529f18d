//! Versioned envelope for cache payloads.
//!
//! Every value stored in a cache backend is wrapped in a small envelope so
//! that corrupted entries and schema drift are detected before a stale or
//! foreign payload is handed back to callers:
//!
//! ```text
//! [MAGIC: 4 bytes] [VERSION: 4 bytes LE] [POSTCARD PAYLOAD]
//! ```

use crate::error::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Magic header identifying cache entries written by this crate.
const MAGIC: &[u8; 4] = b"EMPC";

/// Current schema version. Bump when a cached entity's layout changes.
const SCHEMA_VERSION: u32 = 1;

/// Envelope header length: magic + version.
const HEADER_LEN: usize = 8;

/// Serialize an entity into a versioned cache envelope.
pub fn serialize_for_cache<T: Serialize>(entity: &T) -> Result<Vec<u8>> {
    let payload =
        postcard::to_allocvec(entity).map_err(|e| Error::SerializationError(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Deserialize an entity from a versioned cache envelope.
///
/// Validates magic and schema version before touching the payload.
pub fn deserialize_from_cache<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::InvalidCacheEntry(format!(
            "envelope too short: {} bytes",
            bytes.len()
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(Error::InvalidCacheEntry(
            "magic header mismatch".to_string(),
        ));
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != SCHEMA_VERSION {
        return Err(Error::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    postcard::from_bytes(&bytes[HEADER_LEN..])
        .map_err(|e| Error::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: i32,
        name: String,
    }

    #[test]
    fn test_envelope_round_trip() {
        let sample = Sample {
            id: 7,
            name: "Zhang".to_string(),
        };

        let bytes = serialize_for_cache(&sample).unwrap();
        assert_eq!(&bytes[0..4], b"EMPC");

        let decoded: Sample = deserialize_from_cache(&bytes).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_rejects_short_envelope() {
        let result: Result<Sample> = deserialize_from_cache(b"EMP");
        assert!(matches!(result, Err(Error::InvalidCacheEntry(_))));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let sample = Sample {
            id: 1,
            name: "x".to_string(),
        };
        let mut bytes = serialize_for_cache(&sample).unwrap();
        bytes[0] = b'X';

        let result: Result<Sample> = deserialize_from_cache(&bytes);
        assert!(matches!(result, Err(Error::InvalidCacheEntry(_))));
    }

    #[test]
    fn test_rejects_version_drift() {
        let sample = Sample {
            id: 1,
            name: "x".to_string(),
        };
        let mut bytes = serialize_for_cache(&sample).unwrap();
        bytes[4] = 99;

        let result: Result<Sample> = deserialize_from_cache(&bytes);
        assert!(matches!(
            result,
            Err(Error::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let sample = Sample {
            id: 42,
            name: "truncated".to_string(),
        };
        let bytes = serialize_for_cache(&sample).unwrap();

        let result: Result<Sample> = deserialize_from_cache(&bytes[..HEADER_LEN + 1]);
        assert!(matches!(result, Err(Error::DeserializationError(_))));
    }
}
