//! Transport client: the single outbound network exchange per question.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::state::ChatMessage;

/// Production endpoint of the book-assistant service.
pub const DEFAULT_BASE_URL: &str = "https://ipam-chatbot.vercel.app";

#[derive(Serialize)]
struct ChatRequest<'a> {
    question: &'a str,
    use_chat_history: bool,
    history: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

/// HTTP client for the remote chat endpoint.
///
/// One POST per question, no retries, no timeout tuning, no cancellation.
/// Failures of any kind (unreachable host, non-2xx status, undecodable body)
/// come back as errors; the caller decides what the user sees.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Send one question plus the full history snapshot and return the reply
    /// text.
    ///
    /// `use_chat_history` is always sent as `true`, the only value the
    /// service has ever been called with; its off-state behavior is
    /// unspecified upstream.
    pub async fn ask(&self, question: &str, history: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat", self.base_url);

        let request = ChatRequest {
            question,
            use_chat_history: true,
            history,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "chat request failed with status: {}",
                response.status()
            ));
        }

        let reply: ChatResponse = response.json().await?;
        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_wire_shape() {
        let history = vec![
            ChatMessage::user("What is the capital of France?"),
            ChatMessage::assistant("Paris"),
        ];
        let request = ChatRequest {
            question: "And of Italy?",
            use_chat_history: true,
            history: &history,
        };

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["question"], "And of Italy?");
        assert_eq!(body["use_chat_history"], true);
        let entries = body["history"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["role"], "user");
        assert_eq!(entries[0]["content"], "What is the capital of France?");
        assert_eq!(entries[1]["role"], "assistant");
        assert_eq!(entries[1]["content"], "Paris");
    }

    #[test]
    fn test_reply_decodes_response_field() {
        let reply: ChatResponse = serde_json::from_str(r#"{"response": "Paris"}"#).unwrap();
        assert_eq!(reply.response, "Paris");
    }

    #[test]
    fn test_reply_with_unexpected_shape_is_an_error() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"answer": "Paris"}"#).is_err());
    }
}
