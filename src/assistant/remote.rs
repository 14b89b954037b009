use serde_json::Value;

use super::AssistantError;

pub const SYSTEM_INSTRUCTION: &str = "You are a personal productivity assistant inside a second-brain app. \
The user keeps an inbox of captured thoughts, a task list, projects, ideas and contacts. \
Help them decide what to do next, organise their notes and follow up with people. \
Keep answers short and practical.";

const MAX_TOKENS: u32 = 500;

/// Chat-completion client with bearer-token auth.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl RemoteClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    pub async fn complete(&self, api_key: &str, message: &str) -> Result<String, AssistantError> {
        let body = request_body(&self.model, message);

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let payload: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) if status.is_success() => return Err(AssistantError::Http(e)),
            Err(_) => Value::Null,
        };

        if !status.is_success() {
            let detail = error_message(&payload).unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        parse_completion(&payload)
    }
}

pub fn request_body(model: &str, message: &str) -> Value {
    serde_json::json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "temperature": 0.7,
        "messages": [
            { "role": "system", "content": SYSTEM_INSTRUCTION },
            { "role": "user", "content": message }
        ]
    })
}

fn error_message(payload: &Value) -> Option<String> {
    let error = payload.get("error")?;
    Some(
        error["message"]
            .as_str()
            .or_else(|| error.as_str())
            .unwrap_or("unknown error")
            .to_string(),
    )
}

/// Pull the reply text out of a completion response. An `error` object in
/// the payload counts as a failure even on a 2xx status.
pub fn parse_completion(payload: &Value) -> Result<String, AssistantError> {
    if let Some(message) = error_message(payload) {
        return Err(AssistantError::Api(message));
    }

    payload["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(AssistantError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_carries_system_and_user_messages() {
        let body = request_body("gpt-test", "What should I do today?");
        assert_eq!(body["model"], "gpt-test");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "What should I do today?");
    }

    #[test]
    fn parses_first_choice() {
        let payload = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  Start with the inbox. " } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(parse_completion(&payload).unwrap(), "Start with the inbox.");
    }

    #[test]
    fn error_payload_is_a_failure() {
        let payload = json!({ "error": { "message": "Incorrect API key provided" } });
        match parse_completion(&payload) {
            Err(AssistantError::Api(msg)) => assert!(msg.contains("Incorrect API key")),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn missing_choices_is_a_failure() {
        assert!(matches!(
            parse_completion(&json!({ "choices": [] })),
            Err(AssistantError::EmptyResponse)
        ));
        assert!(matches!(
            parse_completion(&json!({ "choices": [{ "message": { "content": "" } }] })),
            Err(AssistantError::EmptyResponse)
        ));
    }
}
