//! Smithy Document Conversion
//!
//! The AWS SDKs model loosely-typed payloads as `aws_smithy_types::Document`.
//! These helpers translate to and from `serde_json::Value` so graph query
//! results and retrieval metadata surface as ordinary JSON.

use aws_smithy_types::{Document as SmithyDocument, Number as SmithyNumber};
use serde_json::Value;

/// Convert a smithy document into JSON
pub fn smithy_to_json(document: &SmithyDocument) -> Value {
    match document {
        SmithyDocument::Null => Value::Null,
        SmithyDocument::Bool(flag) => Value::Bool(*flag),
        SmithyDocument::String(text) => Value::String(text.clone()),
        SmithyDocument::Number(number) => match number {
            SmithyNumber::PosInt(value) => Value::Number((*value).into()),
            SmithyNumber::NegInt(value) => Value::Number((*value).into()),
            SmithyNumber::Float(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        },
        SmithyDocument::Array(items) => Value::Array(items.iter().map(smithy_to_json).collect()),
        SmithyDocument::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), smithy_to_json(value)))
                .collect(),
        ),
    }
}

/// Convert JSON into a smithy document
pub fn json_to_smithy(value: &Value) -> SmithyDocument {
    match value {
        Value::Null => SmithyDocument::Null,
        Value::Bool(flag) => SmithyDocument::Bool(*flag),
        Value::String(text) => SmithyDocument::String(text.clone()),
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                SmithyDocument::Number(SmithyNumber::PosInt(unsigned))
            } else if let Some(signed) = number.as_i64() {
                SmithyDocument::Number(SmithyNumber::NegInt(signed))
            } else {
                SmithyDocument::Number(SmithyNumber::Float(number.as_f64().unwrap_or(0.0)))
            }
        }
        Value::Array(items) => SmithyDocument::Array(items.iter().map(json_to_smithy).collect()),
        Value::Object(entries) => SmithyDocument::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), json_to_smithy(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_round_trips_through_smithy() {
        let original = json!({
            "name": "n1",
            "count": 7,
            "balance": -3,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "ok": true,
            "missing": null,
        });
        assert_eq!(smithy_to_json(&json_to_smithy(&original)), original);
    }
}
