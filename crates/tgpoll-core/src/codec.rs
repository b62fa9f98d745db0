//! JSON entry points for the entity model.
//!
//! Every decode goes through `serde_path_to_error` so a type mismatch deep
//! inside an update reports the field that broke, not just the line.

use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Decode a value of `T` from a JSON string.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, DecodeError> {
    let mut de = serde_json::Deserializer::from_str(json);
    let value = serde_path_to_error::deserialize(&mut de).map_err(field_error)?;
    de.end().map_err(|e| DecodeError::Field {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(value)
}

/// Decode a value of `T` from an already parsed JSON value.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize(value).map_err(field_error)
}

/// Encode an entity to a JSON value.
pub fn encode<T: Serialize>(entity: &T) -> Result<Value, DecodeError> {
    serde_json::to_value(entity).map_err(|e| DecodeError::Encode(e.to_string()))
}

fn field_error<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> DecodeError {
    DecodeError::Field {
        path: err.path().to_string(),
        message: err.inner().to_string(),
    }
}
