//! Paged list decoding
//!
//! List endpoints are inconsistent about where the items live. The decoder
//! tries, in order: `records`, `list`, then the payload itself as an array.
//! Anything else decodes to an empty list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query body for the backend's paged list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// One-based page number.
    pub page_num: u32,
    /// Page size.
    pub page_size: u32,
    /// Endpoint-specific filters, flattened into the body.
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

impl PageRequest {
    /// First page with the given size.
    #[must_use]
    pub fn first(page_size: u32) -> Self {
        Self {
            page_num: 1,
            page_size,
            filters: Map::new(),
        }
    }

    /// Adds a filter member.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Renders the request as a JSON body.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = self.filters.clone();
        map.insert("pageNum".to_string(), Value::from(self.page_num));
        map.insert("pageSize".to_string(), Value::from(self.page_size));
        Value::Object(map)
    }
}

/// Extracts the item list from a paged payload. Null items are dropped.
#[must_use]
pub fn extract_records(payload: &Value) -> Vec<Value> {
    let items = payload
        .get("records")
        .and_then(Value::as_array)
        .or_else(|| payload.get("list").and_then(Value::as_array))
        .or_else(|| payload.as_array());

    items
        .map(|items| items.iter().filter(|v| !v.is_null()).cloned().collect())
        .unwrap_or_default()
}

/// Extracts and decodes the item list, skipping items that do not decode.
#[must_use]
pub fn decode_records<T: DeserializeOwned>(payload: &Value) -> Vec<T> {
    extract_records(payload)
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_precedence_order() {
        let payload = json!({"records": [1], "list": [2]});
        assert_eq!(extract_records(&payload), vec![json!(1)]);

        let payload = json!({"list": [2, null, 3], "total": 2});
        assert_eq!(extract_records(&payload), vec![json!(2), json!(3)]);

        let payload = json!([4]);
        assert_eq!(extract_records(&payload), vec![json!(4)]);
    }

    #[test]
    fn test_unknown_shapes_fail_closed() {
        assert!(extract_records(&json!({"records": "nope"})).is_empty());
        assert!(extract_records(&json!({"total": 0})).is_empty());
        assert!(extract_records(&Value::Null).is_empty());
    }

    #[test]
    fn test_decode_skips_bad_items() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            id: i64,
        }
        let payload = json!({"records": [{"id": 1}, {"name": "x"}, {"id": 2}]});
        let items: Vec<Item> = decode_records(&payload);
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn test_page_request_body() {
        let body = PageRequest::first(1000).with("userId", 5).to_value();
        assert_eq!(body, json!({"pageNum": 1, "pageSize": 1000, "userId": 5}));
    }
}
