//! Line-item normalization and invoice total computation.
//!
//! Jobs store their line items as a loosely-typed JSON payload: the field
//! may be absent, a single object, or an array, and historical clients used
//! two naming conventions (`description`/`item_name`,
//! `quantity`/`unit_quantity`). Everything billing-related funnels through
//! [`normalize_line_items`] so the rest of the system only ever sees the
//! canonical shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One billable entry within a job, in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    /// Line total for this entry.
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Coerces a JSON value to a finite number, or zero.
///
/// Numbers pass through; numeric strings parse. Anything else (booleans,
/// null, objects, arrays, non-numeric strings, NaN/infinite results) is 0.
fn numeric_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Returns the first non-empty string under any of the given keys.
fn string_field(item: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        item.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}

/// Returns the first present (non-null) value under any of the given keys,
/// coerced with the numeric-or-zero rule.
fn numeric_field(item: &serde_json::Map<String, Value>, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|key| item.get(*key).filter(|v| !v.is_null()))
        .map(numeric_or_zero)
        .unwrap_or(0.0)
}

/// Placeholder for array elements that are not objects. Zero quantity keeps
/// the entry out of the computed total.
fn placeholder_item(position: usize) -> LineItem {
    LineItem {
        description: format!("Item {}", position),
        quantity: 0.0,
        unit_price: 0.0,
    }
}

/// Extracts a canonical line item from one payload element.
///
/// `position` is the 1-based position used for generated descriptions.
fn extract_item(value: &Value, position: usize) -> LineItem {
    let Some(item) = value.as_object() else {
        warn!(
            position = position,
            element_type = json_type_name(value),
            "line item element is not an object, substituting placeholder"
        );
        return placeholder_item(position);
    };

    LineItem {
        description: string_field(item, &["description", "item_name"])
            .unwrap_or_else(|| format!("Item {}", position)),
        quantity: numeric_field(item, &["quantity", "unit_quantity"]),
        unit_price: numeric_field(item, &["unit_price"]),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Converts a job's raw `line_items` payload into an ordered canonical
/// sequence.
///
/// Accepts `None`, JSON null, a single object, or an array; input order is
/// preserved. This function never fails: malformed shapes degrade to
/// zero-valued records and are reported through a structured warning so
/// upstream data corruption stays visible to operators.
pub fn normalize_line_items(raw: Option<&Value>) -> Vec<LineItem> {
    match raw {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| extract_item(item, idx + 1))
            .collect(),
        Some(value @ Value::Object(_)) => vec![extract_item(value, 1)],
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(
                payload_type = json_type_name(other),
                "line items payload has unexpected shape, treating as empty"
            );
            Vec::new()
        }
    }
}

/// Computes the invoice total as the sum of `quantity * unit_price` over
/// all items. The empty sequence totals 0. Plain IEEE double arithmetic;
/// rounding and currency formatting are presentation concerns.
pub fn calculate_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Normalization totality: every shape returns without panicking.
    #[test]
    fn test_normalize_never_fails() {
        let inputs = vec![
            json!(null),
            json!({}),
            json!([]),
            json!("just a string"),
            json!(42),
            json!(true),
            json!([null, 7, "x", [], {}]),
            json!([{"description": "A"}, {"item_name": "B"}]),
        ];
        for input in &inputs {
            let _ = normalize_line_items(Some(input));
        }
        let _ = normalize_line_items(None);
    }

    #[test]
    fn test_normalize_absent_and_null_yield_empty() {
        assert!(normalize_line_items(None).is_empty());
        assert!(normalize_line_items(Some(&json!(null))).is_empty());
    }

    #[test]
    fn test_normalize_scalar_payload_yields_empty() {
        assert!(normalize_line_items(Some(&json!("oops"))).is_empty());
        assert!(normalize_line_items(Some(&json!(3))).is_empty());
    }

    #[test]
    fn test_normalize_single_object_wraps() {
        let raw = json!({"description": "Painting", "quantity": 2, "unit_price": 40});
        let items = normalize_line_items(Some(&raw));
        assert_eq!(
            items,
            vec![LineItem {
                description: "Painting".to_string(),
                quantity: 2.0,
                unit_price: 40.0,
            }]
        );
    }

    // Scenario: array with the legacy naming convention.
    #[test]
    fn test_normalize_legacy_aliases() {
        let raw = json!([{"item_name": "Tiling", "unit_quantity": 10, "unit_price": 15}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(
            items,
            vec![LineItem {
                description: "Tiling".to_string(),
                quantity: 10.0,
                unit_price: 15.0,
            }]
        );
        assert_eq!(calculate_total(&items), 150.0);
    }

    // Alias equivalence: both conventions produce the same record.
    #[test]
    fn test_alias_equivalence() {
        let legacy = json!([{"item_name": "X", "unit_quantity": 2, "unit_price": 5}]);
        let canonical = json!([{"description": "X", "quantity": 2, "unit_price": 5}]);

        let a = normalize_line_items(Some(&legacy));
        let b = normalize_line_items(Some(&canonical));
        assert_eq!(a, b);
        assert_eq!(calculate_total(&a), 10.0);
        assert_eq!(calculate_total(&b), 10.0);
    }

    #[test]
    fn test_canonical_name_wins_over_alias() {
        let raw = json!([{"description": "Primary", "item_name": "Secondary",
                          "quantity": 1, "unit_quantity": 99, "unit_price": 5}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items[0].description, "Primary");
        assert_eq!(items[0].quantity, 1.0);
    }

    #[test]
    fn test_normalize_preserves_order() {
        let raw = json!([
            {"description": "first", "quantity": 1, "unit_price": 1},
            {"item_name": "second", "unit_quantity": 2, "unit_price": 2},
            {"description": "third", "quantity": 3, "unit_price": 3}
        ]);
        let items = normalize_line_items(Some(&raw));
        let names: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_generated_description_uses_position() {
        let raw = json!([{"quantity": 1, "unit_price": 1}, {"quantity": 2, "unit_price": 2}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items[0].description, "Item 1");
        assert_eq!(items[1].description, "Item 2");
    }

    #[test]
    fn test_empty_description_falls_back() {
        let raw = json!([{"description": "", "item_name": "Grouting", "unit_price": 8}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items[0].description, "Grouting");
    }

    #[test]
    fn test_non_object_elements_become_placeholders() {
        let raw = json!([null, "stray", 7, {"description": "Real", "quantity": 1, "unit_price": 9}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].description, "Item 1");
        assert_eq!(items[1].description, "Item 2");
        assert_eq!(items[2].description, "Item 3");
        assert_eq!(items[0].quantity, 0.0);
        assert_eq!(items[0].unit_price, 0.0);
        // Placeholders contribute nothing to the total.
        assert_eq!(calculate_total(&items), 9.0);
    }

    // Numeric coercion follows the numeric-or-zero rule.
    #[test]
    fn test_numeric_strings_parse() {
        let raw = json!([{"description": "A", "quantity": "3", "unit_price": "2.5"}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items[0].quantity, 3.0);
        assert_eq!(items[0].unit_price, 2.5);
        assert_eq!(calculate_total(&items), 7.5);
    }

    #[test]
    fn test_non_numeric_values_coerce_to_zero() {
        let raw = json!([{"description": "A", "quantity": "abc", "unit_price": true}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items[0].quantity, 0.0);
        assert_eq!(items[0].unit_price, 0.0);
    }

    #[test]
    fn test_null_quantity_falls_back_to_alias() {
        let raw = json!([{"description": "A", "quantity": null, "unit_quantity": 4, "unit_price": 2}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items[0].quantity, 4.0);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let raw = json!([{"description": "A"}]);
        let items = normalize_line_items(Some(&raw));
        assert_eq!(items[0].quantity, 0.0);
        assert_eq!(items[0].unit_price, 0.0);
    }

    #[test]
    fn test_numeric_or_zero_edge_values() {
        assert_eq!(numeric_or_zero(&json!(2.5)), 2.5);
        assert_eq!(numeric_or_zero(&json!(-3)), -3.0);
        assert_eq!(numeric_or_zero(&json!(" 7.25 ")), 7.25);
        assert_eq!(numeric_or_zero(&json!("")), 0.0);
        assert_eq!(numeric_or_zero(&json!("1e3")), 1000.0);
        assert_eq!(numeric_or_zero(&json!("NaN")), 0.0);
        assert_eq!(numeric_or_zero(&json!("inf")), 0.0);
        assert_eq!(numeric_or_zero(&json!([1])), 0.0);
        assert_eq!(numeric_or_zero(&json!({"n": 1})), 0.0);
    }

    // Total correctness.
    #[test]
    fn test_calculate_total_empty_is_zero() {
        assert_eq!(calculate_total(&[]), 0.0);
    }

    #[test]
    fn test_calculate_total_sums_all_items() {
        let items = vec![
            LineItem {
                description: "a".into(),
                quantity: 2.0,
                unit_price: 3.0,
            },
            LineItem {
                description: "b".into(),
                quantity: 0.5,
                unit_price: 100.0,
            },
        ];
        assert_eq!(calculate_total(&items), 56.0);
    }

    #[test]
    fn test_calculate_total_is_unclamped() {
        // Negative values pass through; clamping is not this layer's job.
        let items = vec![LineItem {
            description: "credit".into(),
            quantity: 1.0,
            unit_price: -50.0,
        }];
        assert_eq!(calculate_total(&items), -50.0);
    }

    #[test]
    fn test_line_item_total() {
        let item = LineItem {
            description: "x".into(),
            quantity: 4.0,
            unit_price: 2.5,
        };
        assert_eq!(item.total(), 10.0);
    }

    #[test]
    fn test_line_item_serialization() {
        let item = LineItem {
            description: "Tiling".into(),
            quantity: 10.0,
            unit_price: 15.0,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"description\":\"Tiling\""));
        assert!(json.contains("\"quantity\":10.0"));
        assert!(json.contains("\"unit_price\":15.0"));
    }
}
