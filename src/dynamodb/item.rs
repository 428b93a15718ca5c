//! Conversion between gateway items and DynamoDB attribute maps.
//!
//! | JSON    | DynamoDB   |
//! |---------|------------|
//! | object  | `M`        |
//! | array   | `L`        |
//! | string  | `S`        |
//! | number  | `N`        |
//! | boolean | `BOOL`     |
//! | `null`  | `NULL`     |
//!
//! Scanned items may carry types JSON has no counterpart for. `SS` and `NS`
//! become arrays, `B` becomes a standard base64 string and `BS` an array of
//! them. Numbers keep their decimal text in both directions.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Number, Value};
use tracing::error;

use crate::error::StoreFault;
use crate::item::{Item, DATA_KEY, ITEM_ID_KEY};
use crate::store::Document;

pub(crate) type Attributes = HashMap<String, AttributeValue>;

/// Encodes an item as a `PutItem` attribute map.
pub(crate) fn to_attributes(item: &Item) -> Attributes {
    HashMap::from([
        (
            ITEM_ID_KEY.to_string(),
            AttributeValue::S(item.item_id().to_string()),
        ),
        (DATA_KEY.to_string(), to_attribute_value(item.data())),
    ])
}

/// Decodes a scanned attribute map, keeping every attribute.
pub(crate) fn to_document(attributes: Attributes) -> Result<Document, StoreFault> {
    let item_id = match attributes.get(ITEM_ID_KEY) {
        Some(AttributeValue::S(id)) => id.clone(),
        _ => "<unknown>".to_string(),
    };

    attributes
        .into_iter()
        .map(|(name, value)| to_json(value).map(|value| (name, value)))
        .collect::<Result<Document, String>>()
        .map_err(|message| {
            error!(item_id = %item_id, error = %message, "stored item could not be converted");
            StoreFault::Conversion { item_id, message }
        })
}

fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute_value).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

fn to_json(value: AttributeValue) -> Result<Value, String> {
    let value = match value {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => Value::Number(parse_number(&n)?),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::Ss(set) => Value::Array(set.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        AttributeValue::L(values) => {
            Value::Array(values.into_iter().map(to_json).collect::<Result<_, _>>()?)
        }
        AttributeValue::M(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| to_json(value).map(|value| (name, value)))
                .collect::<Result<_, _>>()?,
        ),
        other => return Err(format!("unsupported attribute type {other:?}")),
    };
    Ok(value)
}

fn parse_number(n: &str) -> Result<Number, String> {
    n.parse::<Number>()
        .map_err(|e| format!("invalid number '{n}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    const WIDE_NUMBER: &str = "12345678901234567890123456789";

    #[test]
    fn test_to_attributes() {
        let item = Item::new("a-1", json!({"tags": ["x"], "live": true, "n": 1.5})).unwrap();
        let attributes = to_attributes(&item);

        assert_eq!(
            attributes.get("ItemId"),
            Some(&AttributeValue::S("a-1".to_string()))
        );
        let data = attributes.get("Data").unwrap().as_m().unwrap();
        assert_eq!(data.get("live"), Some(&AttributeValue::Bool(true)));
        assert_eq!(data.get("n"), Some(&AttributeValue::N("1.5".to_string())));
        assert_eq!(
            data.get("tags"),
            Some(&AttributeValue::L(vec![AttributeValue::S("x".to_string())]))
        );
    }

    #[test]
    fn test_to_document_keeps_extra_attributes() {
        let attributes = HashMap::from([
            ("ItemId".to_string(), AttributeValue::S("a-1".to_string())),
            ("Data".to_string(), AttributeValue::N("42".to_string())),
            ("Owner".to_string(), AttributeValue::S("ops".to_string())),
        ]);
        let document = to_document(attributes).unwrap();

        assert_eq!(
            Value::Object(document),
            json!({"ItemId": "a-1", "Data": 42, "Owner": "ops"})
        );
    }

    #[test]
    fn test_null_data() {
        let item = Item::new("a-1", Value::Null).unwrap();
        let attributes = to_attributes(&item);
        assert_eq!(attributes.get("Data"), Some(&AttributeValue::Null(true)));
    }

    #[test]
    fn test_binary_attributes_become_base64() {
        let attributes = HashMap::from([
            ("ItemId".to_string(), AttributeValue::S("a".to_string())),
            ("Data".to_string(), AttributeValue::B(Blob::new(vec![1u8, 2]))),
            (
                "Chunks".to_string(),
                AttributeValue::Bs(vec![Blob::new(b"hi".to_vec()), Blob::new(vec![0xffu8])]),
            ),
            (
                "Nested".to_string(),
                AttributeValue::M(HashMap::from([(
                    "raw".to_string(),
                    AttributeValue::B(Blob::new(b"abc".to_vec())),
                )])),
            ),
        ]);
        let document = to_document(attributes).unwrap();

        assert_eq!(
            Value::Object(document),
            json!({
                "ItemId": "a",
                "Data": "AQI=",
                "Chunks": ["aGk=", "/w=="],
                "Nested": {"raw": "YWJj"}
            })
        );
    }

    #[test]
    fn test_sets_become_arrays() {
        let attributes = HashMap::from([
            (
                "Names".to_string(),
                AttributeValue::Ss(vec!["x".to_string(), "y".to_string()]),
            ),
            (
                "Sizes".to_string(),
                AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]),
            ),
        ]);
        let document = to_document(attributes).unwrap();

        assert_eq!(document["Names"], json!(["x", "y"]));
        assert_eq!(document["Sizes"], json!([1, 2.5]));
    }

    #[test]
    fn test_wide_numbers_keep_every_digit() {
        let attributes = HashMap::from([
            ("ItemId".to_string(), AttributeValue::S("a".to_string())),
            ("Data".to_string(), AttributeValue::N(WIDE_NUMBER.to_string())),
        ]);
        let document = to_document(attributes).unwrap();
        assert_eq!(document["Data"].to_string(), WIDE_NUMBER);

        let body = format!(r#"{{"ItemId": "a", "Data": {WIDE_NUMBER}}}"#);
        let item = Item::from_body(&body).unwrap();
        assert_eq!(
            to_attributes(&item).get("Data"),
            Some(&AttributeValue::N(WIDE_NUMBER.to_string()))
        );
    }

    #[test]
    fn test_conversion_fault_names_the_item() {
        let attributes = HashMap::from([
            ("ItemId".to_string(), AttributeValue::S("bad-row".to_string())),
            ("Data".to_string(), AttributeValue::N("not-a-number".to_string())),
        ]);

        match to_document(attributes) {
            Err(StoreFault::Conversion { item_id, message }) => {
                assert_eq!(item_id, "bad-row");
                assert!(message.contains("not-a-number"));
            }
            other => panic!("expected a conversion fault, got {other:?}"),
        }
    }
}
