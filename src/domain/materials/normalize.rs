//! Lenient parsing of model output into a materials list
//!
//! Model output is untrusted text. Anything that is not a JSON array degrades
//! to an empty list instead of failing the request.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::Material;

const CODE_FENCE: &str = "```";

/// Fenced block with an optional language tag: ```json\n...\n```
static FENCED_PAYLOAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[a-zA-Z]*\n([\s\S]*?)\n```").unwrap());

/// Longest numeric prefix once everything but digits and dots is removed
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*").unwrap());

/// Removes Markdown code-fence wrapping from model output
pub fn strip_code_fences(raw: &str) -> String {
    let text = raw.trim();

    if !text.starts_with(CODE_FENCE) {
        return text.to_string();
    }

    match FENCED_PAYLOAD.captures(text) {
        Some(captures) => captures[1].trim().to_string(),
        None => text.replace(CODE_FENCE, ""),
    }
}

/// Parses raw model output into normalized materials
pub fn parse_materials(raw: &str) -> Vec<Material> {
    let text = strip_code_fences(raw);

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(elements)) => elements.iter().map(Material::from_loose).collect(),
        Ok(other) => {
            debug!(kind = value_kind(&other), "Model output is not a JSON array");
            Vec::new()
        }
        Err(e) => {
            debug!(error = %e, "Model output is not valid JSON");
            Vec::new()
        }
    }
}

/// Numbers pass through; text keeps only digits and dots and is read as a
/// leading decimal; anything else, or text with no number in it, becomes 1.
pub fn normalize_quantity(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(1.0),
        Some(Value::String(s)) => parse_leading_number(s).unwrap_or(1.0),
        _ => 1.0,
    }
}

fn parse_leading_number(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let prefix = LEADING_NUMBER.find(&digits)?.as_str();

    prefix.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// First non-null field among `candidates`, rendered as text, or `""`
pub(super) fn text_field(fields: &Map<String, Value>, candidates: &[&str]) -> String {
    candidates
        .iter()
        .find_map(|name| fields.get(*name).filter(|v| !v.is_null()))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fences_with_language_tag() {
        assert_eq!(strip_code_fences("```json\n[]\n```"), "[]");
    }

    #[test]
    fn test_strip_code_fences_without_language_tag() {
        assert_eq!(
            strip_code_fences("```\n[{\"item\":\"nails\"}]\n```"),
            "[{\"item\":\"nails\"}]"
        );
    }

    #[test]
    fn test_strip_code_fences_surrounding_whitespace() {
        assert_eq!(strip_code_fences("  \n```json\n  [1]  \n```\n  "), "[1]");
    }

    #[test]
    fn test_strip_code_fences_single_line_fence() {
        assert_eq!(strip_code_fences("```[1, 2]```"), "[1, 2]");
    }

    #[test]
    fn test_strip_code_fences_leaves_plain_text() {
        assert_eq!(strip_code_fences("  [1, 2]\n"), "[1, 2]");
    }

    #[test]
    fn test_parse_materials_fenced_empty_list() {
        assert!(parse_materials("```json\n[]\n```").is_empty());
    }

    #[test]
    fn test_parse_materials_normalizes_elements() {
        let raw = r#"[{"item_name":"2x4 stud","quantity":"12 pcs","size":"8ft"}]"#;

        assert_eq!(
            parse_materials(raw),
            vec![Material::new("2x4 stud", 12.0, "8ft")]
        );
    }

    #[test]
    fn test_parse_materials_invalid_json_is_empty() {
        assert!(parse_materials("Here are your materials: lumber, nails").is_empty());
    }

    #[test]
    fn test_parse_materials_non_array_is_empty() {
        assert!(parse_materials(r#"{"materials": []}"#).is_empty());
    }

    #[test]
    fn test_normalize_quantity_text_fallback() {
        assert_eq!(normalize_quantity(Some(&json!("abc"))), 1.0);
        assert_eq!(normalize_quantity(Some(&json!(""))), 1.0);
        assert_eq!(normalize_quantity(Some(&json!("."))), 1.0);
    }

    #[test]
    fn test_normalize_quantity_text_numbers() {
        assert_eq!(normalize_quantity(Some(&json!("12 pcs"))), 12.0);
        assert_eq!(normalize_quantity(Some(&json!("2.5 yards"))), 2.5);
        assert_eq!(normalize_quantity(Some(&json!("about .5"))), 0.5);
        assert_eq!(normalize_quantity(Some(&json!("approx. .5"))), 1.0);
        assert_eq!(normalize_quantity(Some(&json!("1,200"))), 1200.0);
        // Everything after a second dot is dropped
        assert_eq!(normalize_quantity(Some(&json!("1.2.3"))), 1.2);
    }

    #[test]
    fn test_normalize_quantity_other_types() {
        assert_eq!(normalize_quantity(Some(&json!(3))), 3.0);
        assert_eq!(normalize_quantity(Some(&json!(0.75))), 0.75);
        assert_eq!(normalize_quantity(Some(&json!(null))), 1.0);
        assert_eq!(normalize_quantity(Some(&json!(true))), 1.0);
        assert_eq!(normalize_quantity(None), 1.0);
    }

    #[test]
    fn test_nails_with_unparseable_quantity() {
        let materials = parse_materials(r#"[{"item":"nails","quantity":"abc"}]"#);

        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].item, "nails");
        assert_eq!(materials[0].quantity, 1.0);
    }
}
