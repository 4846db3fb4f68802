use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::estimate::{ESTIMATE_KEY, parse_estimate};
use crate::models::{ChatRequest, ChatResponse, Message};

pub const SYSTEM_PROMPT: &str = "You are a nutrition assistant. Estimate realistic calories per 100g \
for a given common food (no brands). If ambiguous, assume the most common preparation. \
Return ONLY compact JSON.";

pub fn build_request(config: &Config, food: &str) -> ChatRequest {

    ChatRequest {
        model: config.model.clone(),
        temperature: config.temperature,
        messages: vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(format!("Food: {}\nReturn JSON with key: {} (number).", food, ESTIMATE_KEY)),
        ]
    }

}

// one attempt per call; a missing key fails before any network I/O
pub async fn estimate_kcal_per_100g(
    client: &Client,
    config: &Config,
    food: &str
) -> Result<f64, AppError> {

    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or(AppError::MissingCredential)?;

    let request = build_request(config, food);
    let content = call_llm(client, &config.openai_url, api_key, &request).await?;
    debug!(%content, "completion received");

    parse_estimate(&content)

}

pub async fn call_llm(
    client: &Client,
    url: &str,
    api_key: &str,
    request: &ChatRequest
) -> Result<String, AppError> {

    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "completion API returned an error");
        return Err(AppError::Upstream { status: status.as_u16(), body });
    }

    let payload: Value = response.json().await?;

    completion_content(payload)

}

// choices[0].message.content, or a shape error if any level is missing
fn completion_content(payload: Value) -> Result<String, AppError> {

    let response: ChatResponse = serde_json::from_value(payload)
        .map_err(|_| AppError::UpstreamShape)?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(AppError::UpstreamShape)

}
