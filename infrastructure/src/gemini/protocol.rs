//! Request/response JSON handling for the Gemini API.
//!
//! Pure functions: body builders, response parsers, HTTP error mapping.
//! Kept free of I/O so they are unit-testable without a network.

use examforge_application::ports::embedder::EmbedderError;
use examforge_application::ports::llm_gateway::GatewayError;
use serde_json::{Value, json};

/// The default Google Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Build the JSON body for a single-turn generation request.
pub fn generation_body(prompt: &str, temperature: f32, max_output_tokens: u32) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": prompt}],
        }],
        "generationConfig": {
            "temperature": temperature,
            "maxOutputTokens": max_output_tokens,
        },
    })
}

/// Parse a full (non-streaming) generation response into its text.
pub fn parse_generation_response(body: &Value) -> Result<String, GatewayError> {
    let candidates = body["candidates"]
        .as_array()
        .ok_or_else(|| GatewayError::ResponseParse("missing 'candidates' array".to_string()))?;

    let candidate = candidates
        .first()
        .ok_or_else(|| GatewayError::ResponseParse("empty 'candidates' array".to_string()))?;

    let parts = candidate["content"]["parts"]
        .as_array()
        .ok_or_else(|| GatewayError::ResponseParse("missing 'parts' array".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    Ok(text)
}

/// Extract the text carried by one SSE data chunk, if any.
pub fn chunk_text(data: &Value) -> Option<String> {
    let parts = data["candidates"].as_array()?.first()?["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

/// Map an HTTP status code to the appropriate `GatewayError`.
pub fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> GatewayError {
    match status.as_u16() {
        401 | 403 => GatewayError::AuthFailed("Gemini rejected the API key".to_string()),
        429 => GatewayError::RateLimited,
        _ => GatewayError::RequestFailed(format!(
            "HTTP {} from Gemini API: {}",
            status, body_text
        )),
    }
}

// ==================== Embeddings ====================

/// Body for a single `embedContent` request.
pub fn embed_body(model: &str, text: &str) -> Value {
    json!({
        "model": format!("models/{}", model),
        "content": {"parts": [{"text": text}]},
    })
}

/// Body for a `batchEmbedContents` request.
pub fn batch_embed_body(model: &str, texts: &[String]) -> Value {
    let requests: Vec<Value> = texts.iter().map(|t| embed_body(model, t)).collect();
    json!({"requests": requests})
}

/// Parse a single `embedContent` response.
pub fn parse_embed_response(body: &Value) -> Result<Vec<f32>, EmbedderError> {
    values_to_vec(&body["embedding"]["values"])
        .ok_or_else(|| EmbedderError::ResponseParse("missing 'embedding.values'".to_string()))
}

/// Parse a `batchEmbedContents` response, preserving order.
pub fn parse_batch_embed_response(body: &Value) -> Result<Vec<Vec<f32>>, EmbedderError> {
    let embeddings = body["embeddings"]
        .as_array()
        .ok_or_else(|| EmbedderError::ResponseParse("missing 'embeddings' array".to_string()))?;

    embeddings
        .iter()
        .map(|e| {
            values_to_vec(&e["values"]).ok_or_else(|| {
                EmbedderError::ResponseParse("missing 'values' in embedding".to_string())
            })
        })
        .collect()
}

fn values_to_vec(values: &Value) -> Option<Vec<f32>> {
    values
        .as_array()
        .map(|arr| arr.iter().filter_map(|v| v.as_f64()).map(|f| f as f32).collect())
}
