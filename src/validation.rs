use axum::http::{HeaderMap, header};
use serde_json::{Map, Value};

use crate::calc::format_number;
use crate::errors::AppError;

// food is trimmed and never empty, target_kcal is finite and > 0
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub food: String,
    pub target_kcal: f64
}

impl CalculationRequest {

    // a body that is not a JSON object, or is not sent as application/json,
    // is read as {} and fails like any missing field would
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> Result<Self, AppError> {

        let fields = if is_json(headers) {
            match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(fields)) => fields,
                _ => Map::new(),
            }
        } else {
            Map::new()
        };

        Self::from_fields(&fields)

    }

    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, AppError> {

        // fields are coerced loosely: "150" is a valid target, 42 a valid food
        let food = fields
            .get("food")
            .filter(|value| !is_falsy(value))
            .map(coerce_string)
            .unwrap_or_default()
            .trim()
            .to_string();

        let target_kcal = fields
            .get("targetKcal")
            .filter(|value| !is_falsy(value))
            .map_or(0.0, coerce_number);

        if food.is_empty() || !target_kcal.is_finite() || target_kcal <= 0.0 {
            return Err(AppError::InvalidInput);
        }

        Ok(CalculationRequest { food, target_kcal })

    }
}

fn is_json(headers: &HeaderMap) -> bool {

    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)

}

fn is_falsy(value: &Value) -> bool {

    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }

}

pub fn coerce_string(value: &Value) -> String {

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_default(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { coerce_string(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }

}

// NaN when the value has no numeric form
pub fn coerce_number(value: &Value) -> f64 {

    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn validate(body: Value) -> Result<CalculationRequest, AppError> {
        CalculationRequest::from_body(&json_headers(), body.to_string().as_bytes())
    }

    #[test]
    fn accepts_a_plain_request() {
        let req = validate(json!({ "food": "  banana ", "targetKcal": 200 })).unwrap();
        assert_eq!(req.food, "banana");
        assert_eq!(req.target_kcal, 200.0);
    }

    #[test]
    fn rejects_empty_or_whitespace_food() {
        for food in [json!(""), json!("   \t\n"), Value::Null] {
            let err = validate(json!({ "food": food, "targetKcal": 200 })).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput));
        }
        assert!(validate(json!({ "targetKcal": 200 })).is_err());
    }

    #[test]
    fn rejects_non_positive_targets_regardless_of_food() {
        for target in [json!(0), json!(-1), json!(-250.5), json!("0"), json!("-3")] {
            let err = validate(json!({ "food": "banana", "targetKcal": target })).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput));
        }
    }

    #[test]
    fn rejects_non_numeric_targets() {
        for target in [json!("lots"), json!("Infinity"), json!({ "kcal": 5 }), json!([1, 2]), Value::Null] {
            assert!(validate(json!({ "food": "banana", "targetKcal": target })).is_err());
        }
        assert!(validate(json!({ "food": "banana" })).is_err());
    }

    #[test]
    fn numeric_strings_and_booleans_are_coerced() {
        let req = validate(json!({ "food": "oats", "targetKcal": " 150.5 " })).unwrap();
        assert_eq!(req.target_kcal, 150.5);

        let req = validate(json!({ "food": "oats", "targetKcal": true })).unwrap();
        assert_eq!(req.target_kcal, 1.0);
    }

    #[test]
    fn non_string_food_is_stringified() {
        assert_eq!(validate(json!({ "food": 42, "targetKcal": 10 })).unwrap().food, "42");
        assert_eq!(validate(json!({ "food": true, "targetKcal": 10 })).unwrap().food, "true");
        assert_eq!(
            validate(json!({ "food": ["egg", "toast"], "targetKcal": 10 })).unwrap().food,
            "egg,toast"
        );
        assert_eq!(validate(json!({ "food": 1e21, "targetKcal": 10 })).unwrap().food, "1e+21");
        assert_eq!(validate(json!({ "food": 1e-7, "targetKcal": 10 })).unwrap().food, "1e-7");
        // zero is falsy
        assert!(validate(json!({ "food": 0, "targetKcal": 10 })).is_err());
    }

    #[test]
    fn unreadable_bodies_fail_validation() {
        let headers = json_headers();
        assert!(CalculationRequest::from_body(&headers, b"").is_err());
        assert!(CalculationRequest::from_body(&headers, b"{not json").is_err());
        assert!(CalculationRequest::from_body(&headers, b"[1,2]").is_err());
    }

    #[test]
    fn non_json_content_type_is_ignored() {
        let body = br#"{"food":"banana","targetKcal":200}"#;
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(CalculationRequest::from_body(&headers, body).is_err());
        assert!(CalculationRequest::from_body(&HeaderMap::new(), body).is_err());

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert!(CalculationRequest::from_body(&headers, body).is_ok());
    }

    #[test]
    fn vendor_json_types_are_not_parsed() {
        let body = br#"{"food":"banana","targetKcal":200}"#;
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));
        assert!(matches!(
            CalculationRequest::from_body(&headers, body),
            Err(AppError::InvalidInput)
        ));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("Application/JSON"));
        assert!(CalculationRequest::from_body(&headers, body).is_ok());
    }

    #[test]
    fn coerce_number_follows_loose_rules() {
        assert_eq!(coerce_number(&json!(89)), 89.0);
        assert_eq!(coerce_number(&json!("89")), 89.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!(false)), 0.0);
        assert!(coerce_number(&json!("89 kcal")).is_nan());
        assert!(coerce_number(&json!({})).is_nan());
    }
}
