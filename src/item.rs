use serde_json::Value;

use crate::error::ValidationFault;
use crate::store::Document;

/// Attribute name of the table's partition key.
pub const ITEM_ID_KEY: &str = "ItemId";
/// Attribute name holding the item payload.
pub const DATA_KEY: &str = "Data";

/// A single record in the item table.
///
/// The table is a flat mapping from `ItemId` to `Data`. Writing an item with
/// an existing `ItemId` replaces the stored item in full; there is no merge.
///
/// # Invariants
///
/// - `ItemId` is never empty. [`Item::new`] is the only constructor and
///   rejects an empty identifier.
/// - `Data` is any JSON value, `null` included.
///
/// # Example
///
/// ```
/// use item_gateway::Item;
/// use serde_json::json;
///
/// let item = Item::from_body(r#"{"ItemId": "a-1", "Data": {"colour": "red"}}"#).unwrap();
/// assert_eq!(item.item_id(), "a-1");
/// assert_eq!(item.data(), &json!({"colour": "red"}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    item_id: String,
    data: Value,
}

impl Item {
    /// Creates an item, rejecting an empty identifier.
    pub fn new(item_id: impl Into<String>, data: Value) -> Result<Self, ValidationFault> {
        let item_id = item_id.into();
        if item_id.is_empty() {
            return Err(ValidationFault::EmptyItemId);
        }
        Ok(Self { item_id, data })
    }

    /// Parses a JSON-encoded request body carrying `ItemId` and `Data`.
    ///
    /// Keys other than the two required ones are ignored.
    pub fn from_body(body: &str) -> Result<Self, ValidationFault> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ValidationFault::MalformedBody(e.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Err(ValidationFault::BodyNotObject);
        };

        let item_id = match fields.remove(ITEM_ID_KEY) {
            Some(Value::String(id)) => id,
            Some(_) => return Err(ValidationFault::InvalidItemId),
            None => return Err(ValidationFault::MissingField(ITEM_ID_KEY)),
        };
        let data = fields
            .remove(DATA_KEY)
            .ok_or(ValidationFault::MissingField(DATA_KEY))?;

        Self::new(item_id, data)
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Converts the item into the document shape the table stores.
    pub fn into_document(self) -> Document {
        let mut document = Document::new();
        document.insert(ITEM_ID_KEY.to_string(), Value::String(self.item_id));
        document.insert(DATA_KEY.to_string(), self.data);
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_accepts_any_data_shape() {
        for data in [json!(1), json!("text"), json!([1, 2]), json!({"a": {"b": true}}), Value::Null] {
            let body = json!({ "ItemId": "x", "Data": data.clone() }).to_string();
            let item = Item::from_body(&body).unwrap();
            assert_eq!(item.data(), &data);
        }
    }

    #[test]
    fn test_from_body_ignores_extra_keys() {
        let item = Item::from_body(r#"{"ItemId": "x", "Data": 1, "Other": 2}"#).unwrap();
        assert_eq!(item.into_document().len(), 2);
    }

    #[test]
    fn test_from_body_rejects_missing_fields() {
        assert_eq!(
            Item::from_body(r#"{"Data": 1}"#),
            Err(ValidationFault::MissingField("ItemId"))
        );
        assert_eq!(
            Item::from_body(r#"{"ItemId": "x"}"#),
            Err(ValidationFault::MissingField("Data"))
        );
    }

    #[test]
    fn test_from_body_rejects_bad_item_id() {
        assert_eq!(
            Item::from_body(r#"{"ItemId": 7, "Data": 1}"#),
            Err(ValidationFault::InvalidItemId)
        );
        assert_eq!(
            Item::from_body(r#"{"ItemId": "", "Data": 1}"#),
            Err(ValidationFault::EmptyItemId)
        );
    }

    #[test]
    fn test_from_body_rejects_non_objects() {
        assert!(matches!(
            Item::from_body("{not json"),
            Err(ValidationFault::MalformedBody(_))
        ));
        assert_eq!(Item::from_body("[1, 2]"), Err(ValidationFault::BodyNotObject));
    }

    #[test]
    fn test_into_document() {
        let document = Item::new("a", json!({"n": 1})).unwrap().into_document();
        assert_eq!(Value::Object(document), json!({"ItemId": "a", "Data": {"n": 1}}));
    }
}
