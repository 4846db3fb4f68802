use serde_json::{Number, Value};

use crate::models::CalculationResponse;
use crate::validation::CalculationRequest;

// grams = kcal * (100 / kcal_per_100g)
// kcal_per_100g is already known to be finite and > 0
pub fn grams_for_target(target_kcal: f64, kcal_per_100g: f64) -> f64 {

    target_kcal * (100.0 / kcal_per_100g)

}

// fixed-point text of value with the given decimals, rounded on the exact
// binary value; only an exact tie goes away from zero (2.5 -> "3")
pub fn to_fixed(value: f64, digits: u32) -> String {

    if value.abs() >= 1e21 {
        return format_number(value);
    }

    let precision = digits as usize;
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;

    // the product is rounded in binary, so it only counts as a tie
    // when the multiplication left no remainder
    let exact = value.mul_add(factor, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        return format!("{:.*}", precision, scaled.round() / factor);
    }

    format!("{:.*}", precision, value)

}

// shortest text form of a number; exponent notation outside [1e-6, 1e21)
pub fn format_number(value: f64) -> String {

    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
            _ => formatted,
        };
    }

    format!("{}", value)

}

// integral values become JSON integers, non-finite values become null
pub fn json_number(value: f64) -> Value {

    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Value::Number(Number::from(value as i64));
    }

    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)

}

fn rounded(value: f64, digits: u32) -> Value {

    let fixed = to_fixed(value, digits);
    fixed
        .parse::<f64>()
        .map(json_number)
        .unwrap_or(Value::Null)

}

pub fn format_response(request: &CalculationRequest, kcal_per_100g: f64, grams: f64) -> CalculationResponse {

    let explanation = format!(
        "≈ {} g {} to reach {} kcal at ~{} kcal/100g.",
        to_fixed(grams, 0),
        request.food,
        format_number(request.target_kcal),
        to_fixed(kcal_per_100g, 0)
    );

    CalculationResponse {
        food: request.food.clone(),
        target_kcal: json_number(request.target_kcal),
        kcal_per_100g: rounded(kcal_per_100g, 1),
        grams_for_target: rounded(grams, 1),
        explanation
    }

}
