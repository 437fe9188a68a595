//! Readers for collecting axum response bodies in assertions.

use axum::{body::to_bytes, response::Response};

use crate::error::TestError;

/// Collects the response body as UTF-8 text.
///
/// # Arguments
/// - `response` - Response returned by the router under test
///
/// # Returns
/// - `Ok(String)` - Full body text
/// - `Err(TestError::Body)` - Body stream failed or was not UTF-8
pub async fn body_text(response: Response) -> Result<String, TestError> {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| TestError::Body(e.to_string()))?;

    String::from_utf8(bytes.to_vec()).map_err(|e| TestError::Body(e.to_string()))
}

/// Collects the response body and parses it as JSON.
///
/// # Returns
/// - `Ok(serde_json::Value)` - Parsed body
/// - `Err(TestError)` - Body could not be read or parsed
pub async fn body_json(response: Response) -> Result<serde_json::Value, TestError> {
    let text = body_text(response).await?;

    Ok(serde_json::from_str(&text)?)
}
