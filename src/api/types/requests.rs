//! Request bodies accepted by the pricing endpoints

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::StoreContext;

/// Body of `POST /api`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsePlanRequest {
    pub build_plan: String,
}

/// Body of `POST /api/home-depot` and `POST /api/home-depot/estimate`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsRequest {
    /// Anything but an array behaves like an empty list
    #[serde(default, deserialize_with = "lenient_items")]
    pub parsed_items: Vec<String>,
    #[serde(flatten)]
    pub store: StoreContext,
}

impl SearchProductsRequest {
    pub fn queries(&self) -> &[String] {
        &self.parsed_items
    }
}

/// Array elements that are not strings are searched by their JSON text
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_fields() {
        let request: SearchProductsRequest = serde_json::from_str(
            r#"{"parsedItems":["12 2x4 stud 8ft"],"storeZip":"84074","storeId":"4419"}"#,
        )
        .unwrap();

        assert_eq!(request.queries(), ["12 2x4 stud 8ft".to_string()]);
        assert_eq!(request.store, StoreContext::new("84074", "4419"));
    }

    #[test]
    fn test_missing_or_null_items_are_empty() {
        let missing: SearchProductsRequest = serde_json::from_str("{}").unwrap();
        let null: SearchProductsRequest =
            serde_json::from_str(r#"{"parsedItems":null}"#).unwrap();

        assert!(missing.queries().is_empty());
        assert!(null.queries().is_empty());
        assert_eq!(missing.store, StoreContext::default());
    }

    #[test]
    fn test_non_array_items_are_empty() {
        let text: SearchProductsRequest = serde_json::from_str(
            r#"{"parsedItems":"nails","storeZip":"84074","storeId":"4419"}"#,
        )
        .unwrap();
        let object: SearchProductsRequest =
            serde_json::from_str(r#"{"parsedItems":{"q":"nails"}}"#).unwrap();

        assert!(text.queries().is_empty());
        assert_eq!(text.store, StoreContext::new("84074", "4419"));
        assert!(object.queries().is_empty());
    }

    #[test]
    fn test_non_string_items_use_json_text() {
        let request: SearchProductsRequest =
            serde_json::from_str(r#"{"parsedItems":["nails",12]}"#).unwrap();

        assert_eq!(request.queries(), ["nails".to_string(), "12".to_string()]);
    }

    #[test]
    fn test_parse_request_requires_plan() {
        let request: ParsePlanRequest =
            serde_json::from_str(r#"{"buildPlan":"Frame a shed"}"#).unwrap();

        assert_eq!(request.build_plan, "Frame a shed");
        assert!(serde_json::from_str::<ParsePlanRequest>("{}").is_err());
    }
}
