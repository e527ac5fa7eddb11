//! Flattening of raw search responses into priced products

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a thumbnail candidate field is read
#[derive(Debug, Clone, Copy)]
enum Probe {
    /// The field itself must be a non-empty string
    Text(&'static str),
    /// The field must be a non-empty array; its first element is used
    FirstElement(&'static str),
}

/// Thumbnail candidates, checked in priority order
const THUMBNAIL_CANDIDATES: [Probe; 4] = [
    Probe::Text("thumbnail"),
    Probe::Text("image"),
    Probe::FirstElement("images"),
    Probe::FirstElement("thumbnails"),
];

/// Leading decimal the way a browser's `parseFloat` reads it
static LEADING_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap());

/// Best match for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub title: String,
    pub link: String,
    /// Price as the provider reported it (usually a number, sometimes text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    /// A URL, or a list of URLs at different sizes
    #[serde(default)]
    pub thumbnail: Option<Value>,
}

impl ProductSummary {
    /// Reads the first entry of the response's `products` array.
    ///
    /// Returns `None` when there are no products or the first one lacks a
    /// title or link.
    pub fn from_response(response: &Value) -> Option<Self> {
        let first = response.get("products")?.as_array()?.first()?.as_object()?;

        let title = non_empty_str(first.get("title"))?;
        let link = non_empty_str(first.get("link"))?;

        Some(Self {
            title: title.to_string(),
            link: link.to_string(),
            price: first.get("price").filter(|v| !v.is_null()).cloned(),
            thumbnail: probe_thumbnail(first),
        })
    }

    /// Numeric price, if the reported price can be read as one
    pub fn price_value(&self) -> Option<f64> {
        let value = match self.price.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => LEADING_DECIMAL
                .find(s.trim_start())
                .and_then(|m| m.as_str().parse::<f64>().ok()),
            _ => None,
        };

        value.filter(|n| n.is_finite())
    }

    /// First usable thumbnail URL
    pub fn thumbnail_url(&self) -> Option<&str> {
        first_string(self.thumbnail.as_ref()?)
    }
}

/// Products found for a materials list and their summed price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub products: Vec<ProductSummary>,
    /// Sum of readable prices, rounded to cents
    pub total: f64,
}

impl Estimate {
    /// Summarizes raw search responses, skipping those without a usable product
    pub fn from_responses(responses: &[Value]) -> Self {
        let products: Vec<ProductSummary> = responses
            .iter()
            .filter_map(ProductSummary::from_response)
            .collect();

        let total = products
            .iter()
            .map(|p| p.price_value().unwrap_or(0.0))
            .sum::<f64>();

        Self {
            products,
            total: (total * 100.0).round() / 100.0,
        }
    }
}

fn probe_thumbnail(product: &Map<String, Value>) -> Option<Value> {
    THUMBNAIL_CANDIDATES.iter().find_map(|probe| match *probe {
        Probe::Text(field) => non_empty_str(product.get(field)).map(|s| Value::String(s.to_string())),
        Probe::FirstElement(field) => product
            .get(field)?
            .as_array()?
            .first()
            .filter(|v| is_present(v))
            .cloned(),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value?.as_str().filter(|s| !s.is_empty())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn first_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.iter().find_map(first_string),
        _ => None,
    }
}
