use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message { role: "user".to_string(), content: content.into() }
    }
}

// body sent to the chat completion endpoint
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<Message>
}

// only the nesting we read is modelled, everything else
// in the upstream payload is ignored
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub name: &'static str,
    pub version: &'static str
}

// numbers are kept as json values so integral ones are
// written without a fraction (200, not 200.0)
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub food: String,
    #[serde(rename = "targetKcal")]
    pub target_kcal: Value,
    pub kcal_per_100g: Value,
    pub grams_for_target: Value,
    pub explanation: String
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>
}
