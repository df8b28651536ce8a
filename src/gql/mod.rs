//! Remote service access: typed operation builder, the HTTP gateway, and
//! payload decoding helpers shared by the background workers.

use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod gateway;
pub mod query;

pub use gateway::{Gateway, GatewayError};
pub use query::{Operation, UpdateNewsInput};

/// What: Decode a gateway payload into a typed value.
///
/// Inputs:
/// - `value`: The JSON under the operation's root field.
///
/// Output: The decoded value, or `Transport` when the payload does not match
/// the expected shape (a malformed response, not an application rejection).
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value)
        .map_err(|e| GatewayError::Transport(format!("undecodable payload: {e}")))
}

/// What: Decode a nullable by-id payload.
///
/// Inputs:
/// - `value`: The JSON under the root field; `null` when no record matched.
///
/// Output: `Ok(None)` for null (the caller's not-found signal), `Ok(Some)`
/// for a decoded record, `Transport` for shape mismatches.
pub fn decode_optional<T: DeserializeOwned>(value: Value) -> Result<Option<T>, GatewayError> {
    if value.is_null() {
        return Ok(None);
    }
    decode(value).map(Some)
}
