//! Read-only views of single records.

//---------------------------------------------------------------------------------------------------- Import
use serde::Serialize;

use timecoin_helper::fmt::hex_preview;
use timecoin_kv::{KeyScheme, Store, StoreError};
use timecoin_types::{DecodedHeader, SchemaError, SchemaVersion};

use crate::MigrateError;

//---------------------------------------------------------------------------------------------------- Constants
/// Amount of record bytes shown by [`probe`].
pub const PROBE_PREVIEW_LEN: usize = 64;

//---------------------------------------------------------------------------------------------------- Inspect
/// Decode the record of `height` stored under `scheme`.
///
/// Records under [`KeyScheme::Legacy`] are decoded as V1 first,
/// records under [`KeyScheme::Current`] as V2 first.
///
/// # Errors
/// - [`StoreError::KeyNotFound`] if the key does not exist
/// - [`MigrateError::Decode`] if the record does not decode into a single schema
pub fn inspect<S: Store>(
    store: &S,
    height: u64,
    scheme: KeyScheme,
) -> Result<DecodedHeader, MigrateError> {
    let key = scheme.key(height);
    let bytes = store
        .get(key.as_bytes())?
        .ok_or(StoreError::KeyNotFound)?;

    decode(scheme, &bytes).map_err(|source| MigrateError::Decode {
        key,
        scheme,
        source,
    })
}

fn decode(scheme: KeyScheme, bytes: &[u8]) -> Result<DecodedHeader, SchemaError> {
    match scheme {
        KeyScheme::Legacy => DecodedHeader::decode_legacy_record(bytes),
        KeyScheme::Current => DecodedHeader::decode_current_record(bytes).map_err(SchemaError::from),
    }
}

//---------------------------------------------------------------------------------------------------- Probe
/// What [`probe`] found under one key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyProbe {
    pub scheme: KeyScheme,
    pub key: String,
    /// `None` if the key does not exist.
    pub record: Option<RecordProbe>,
}

/// A summary of a stored record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordProbe {
    pub len: usize,
    /// Hex of the first [`PROBE_PREVIEW_LEN`] bytes.
    pub preview: String,
    /// The schema that decodes the record, if any.
    pub schema: Option<SchemaVersion>,
    /// The height inside the record, if it decodes.
    pub height: Option<u64>,
    /// Why the record does not decode.
    pub error: Option<String>,
}

impl RecordProbe {
    fn new(scheme: KeyScheme, bytes: &[u8]) -> Self {
        let (schema, height, error) = match decode(scheme, bytes) {
            Ok(header) => (Some(header.schema()), Some(header.height()), None),
            Err(e) => (None, None, Some(e.to_string())),
        };

        Self {
            len: bytes.len(),
            preview: hex_preview(bytes, PROBE_PREVIEW_LEN),
            schema,
            height,
            error,
        }
    }
}

/// Look up `height` under every [`KeyScheme`].
///
/// # Errors
/// If the store fails, a missing key is not an error.
pub fn probe<S: Store>(store: &S, height: u64) -> Result<Vec<KeyProbe>, StoreError> {
    KeyScheme::ALL
        .into_iter()
        .map(|scheme| {
            let key = scheme.key(height);
            let record = store
                .get(key.as_bytes())?
                .map(|bytes| RecordProbe::new(scheme, &bytes));

            Ok(KeyProbe {
                scheme,
                key,
                record,
            })
        })
        .collect()
}
