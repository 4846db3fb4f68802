use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use tracing::{debug, info};

use crate::AppState;
use crate::calc::{format_response, grams_for_target};
use crate::client::estimate_kcal_per_100g;
use crate::errors::AppError;
use crate::models::{CalculationResponse, HealthResponse};
use crate::validation::CalculationRequest;

pub async fn health_check() -> Json<HealthResponse> {

    Json(HealthResponse {
        ok: true,
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION")
    })

}

pub async fn calculate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes
) -> Result<Json<CalculationResponse>, AppError> {

    let request = CalculationRequest::from_body(&headers, &body)?;
    debug!(food = %request.food, target_kcal = request.target_kcal, "received calculation request");

    let kcal_per_100g = estimate_kcal_per_100g(&state.http_client, &state.config, &request.food).await?;
    let grams = grams_for_target(request.target_kcal, kcal_per_100g);

    info!(
        food = %request.food,
        target_kcal = request.target_kcal,
        kcal_per_100g,
        grams,
        "calculated portion"
    );

    Ok(Json(format_response(&request, kcal_per_100g, grams)))

}
