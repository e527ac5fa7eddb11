//! Material entity returned by the plan parser

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::normalize::{normalize_quantity, text_field};

/// Field names probed, in order, for the item name
const ITEM_FIELDS: [&str; 3] = ["item", "item_name", "name"];

/// Field names probed, in order, for the size/type detail
const DETAIL_FIELDS: [&str; 3] = ["details", "length", "size"];

/// A single entry in the materials list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub item: String,
    #[serde(serialize_with = "serialize_quantity")]
    pub quantity: f64,
    pub details: String,
    /// Passed through from the model output unmodified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    /// Passed through from the model output unmodified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
}

impl Material {
    pub fn new(item: impl Into<String>, quantity: f64, details: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity,
            details: details.into(),
            total: None,
            price: None,
        }
    }

    /// Normalizes one loosely shaped element of the model's JSON array.
    ///
    /// Elements that are not objects normalize to an empty item with quantity 1.
    pub fn from_loose(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::new("", 1.0, "");
        };

        Self {
            item: text_field(fields, &ITEM_FIELDS),
            quantity: normalize_quantity(fields.get("quantity")),
            details: text_field(fields, &DETAIL_FIELDS),
            total: fields.get("total").cloned(),
            price: fields.get("price").cloned(),
        }
    }

    /// Query string sent to product search for this material
    pub fn search_query(&self) -> String {
        format!("{} {} {}", self.quantity, self.item, self.details)
            .trim()
            .to_string()
    }
}

/// Whole quantities serialize as JSON integers (`12`, not `12.0`)
fn serialize_quantity<S>(quantity: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if quantity.fract() == 0.0 && quantity.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*quantity as i64)
    } else {
        serializer.serialize_f64(*quantity)
    }
}
