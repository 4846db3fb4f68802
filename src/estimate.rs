use serde_json::Value;

use crate::errors::AppError;
use crate::validation::coerce_number;

pub const ESTIMATE_KEY: &str = "kcal_per_100g";

// only kcal_per_100g is read, it must coerce to a finite number above zero
pub fn parse_estimate(content: &str) -> Result<f64, AppError> {

    let parsed: Value = serde_json::from_str(content)
        .map_err(|_| AppError::UpstreamMalformedJson { raw: content.to_string() })?;

    let per100 = parsed
        .as_object()
        .and_then(|fields| fields.get(ESTIMATE_KEY))
        .map_or(f64::NAN, coerce_number);

    if !per100.is_finite() || per100 <= 0.0 {
        return Err(AppError::InvalidEstimate);
    }

    Ok(per100)

}
