//! Reading the assistant message out of a chat-completion reply.
//!
//! Transport itself is the caller's job; this only classifies what came back.

use serde_json::Value;

use crate::error::UpstreamError;

/// Used when a well-formed reply carries no message text
pub const EMPTY_REPLY_TEXT: &str = "I couldn't generate a response.";

/// Extract the assistant text from a chat-completion JSON body.
///
/// Accepts the OpenAI-compatible `choices[0].message.content` shape and the
/// proxy shape `{ "message": "..." }`. A non-null `error` field is a transport
/// failure reported by the proxy; a `content_filter` finish reason is a
/// refusal.
pub fn assistant_text(body: &str) -> Result<String, UpstreamError> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|e| UpstreamError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let Some(object) = value.as_object() else {
        return Err(UpstreamError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    };

    if let Some(error) = object.get("error").filter(|e| !e.is_null()) {
        return Err(UpstreamError::Transport(error_message(error)));
    }

    if let Some(choices) = object.get("choices") {
        let choice = choices
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| {
                UpstreamError::MalformedResponse("'choices' is empty or not an array".to_string())
            })?;

        if choice.get("finish_reason").and_then(Value::as_str) == Some("content_filter") {
            return Err(UpstreamError::Refusal(
                "the provider blocked this response".to_string(),
            ));
        }

        let content = choice
            .get("message")
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str);
        return Ok(non_empty_or_default(content));
    }

    match object.get("message") {
        Some(Value::String(text)) => Ok(non_empty_or_default(Some(text.as_str()))),
        Some(Value::Null) => Ok(EMPTY_REPLY_TEXT.to_string()),
        Some(_) => Err(UpstreamError::MalformedResponse(
            "'message' is not a string".to_string(),
        )),
        None => Err(UpstreamError::MalformedResponse(
            "missing 'choices' and 'message'".to_string(),
        )),
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(msg) => msg.clone(),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

fn non_empty_or_default(content: Option<&str>) -> String {
    match content {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => EMPTY_REPLY_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_completion_shape() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello"},"finish_reason":"stop"}]}"#;
        assert_eq!(assistant_text(body), Ok("Hello".to_string()));
    }

    #[test]
    fn test_proxy_shape() {
        assert_eq!(assistant_text(r#"{"message":"Hi there"}"#), Ok("Hi there".to_string()));
    }

    #[test]
    fn test_empty_content_uses_default_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(assistant_text(body), Ok(EMPTY_REPLY_TEXT.to_string()));
        let body = r#"{"choices":[{"message":{"content":"   "}}]}"#;
        assert_eq!(assistant_text(body), Ok(EMPTY_REPLY_TEXT.to_string()));
    }

    #[test]
    fn test_error_field_is_transport() {
        assert_eq!(
            assistant_text(r#"{"error":"Failed to get response from AI"}"#),
            Err(UpstreamError::Transport("Failed to get response from AI".to_string()))
        );
        assert_eq!(
            assistant_text(r#"{"error":{"message":"rate limited","code":429}}"#),
            Err(UpstreamError::Transport("rate limited".to_string()))
        );
    }

    #[test]
    fn test_null_error_field_is_ignored() {
        let body = r#"{"choices":[{"message":{"content":"Hello"},"finish_reason":"stop"}],"error":null}"#;
        assert_eq!(assistant_text(body), Ok("Hello".to_string()));
        assert_eq!(
            assistant_text(r#"{"message":"Hi","error":null}"#),
            Ok("Hi".to_string())
        );
    }

    #[test]
    fn test_content_filter_is_refusal() {
        let body = r#"{"choices":[{"message":{"content":""},"finish_reason":"content_filter"}]}"#;
        assert!(matches!(assistant_text(body), Err(UpstreamError::Refusal(_))));
    }

    #[test]
    fn test_malformed_bodies() {
        for body in ["not json", "[1,2]", "{}", r#"{"choices":[]}"#, r#"{"message":42}"#] {
            assert!(
                matches!(assistant_text(body), Err(UpstreamError::MalformedResponse(_))),
                "{} should be malformed",
                body
            );
        }
    }
}
