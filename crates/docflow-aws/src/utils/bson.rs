//! BSON Conversion
//!
//! Converts between driver-native BSON values and the open JSON metadata
//! the framework's document model carries. Backend-assigned ObjectIds are
//! rendered as plain hex strings so driver types never cross the
//! framework boundary.

use docflow_core::error::{Error, Result};
use mongodb::bson::Bson;
use serde_json::Value;

/// Convert a BSON value into JSON metadata.
///
/// ObjectIds become hex strings; datetimes become RFC 3339 strings; the
/// remaining exotic BSON types fall back to their relaxed extended-JSON
/// rendering.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::String(text) => Value::String(text),
        Bson::Double(number) => serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::Int32(number) => Value::Number(number.into()),
        Bson::Int64(number) => Value::Number(number.into()),
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::Null => Value::Null,
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::DateTime(datetime) => {
            Value::String(datetime.try_to_rfc3339_string().unwrap_or_default())
        }
        other => other.into_relaxed_extjson(),
    }
}

/// Convert a JSON metadata value into BSON for insertion
pub fn json_to_bson(value: &Value) -> Result<Bson> {
    Bson::try_from(value.clone())
        .map_err(|e| Error::invalid_argument(format!("Metadata value is not BSON-compatible: {e}")))
}
