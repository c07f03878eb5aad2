//! Gemini API client implementation
//!
//! Implements the LlmClient trait for the Generative Language
//! `generateContent` API with support for both blocking and streaming
//! responses. Failures are returned to the caller as-is; nothing is retried.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, EventSource};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{
    FinishReason, FunctionCall, GenerateRequest, GenerateResponse, LlmClient, LlmError, Message, StreamChunk,
    TokenUsage,
};
use crate::config::LlmConfig;

/// Gemini API client
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from configuration and an already-resolved key
    pub fn from_config(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        debug!(base_url = %config.base_url, timeout_ms = ?config.timeout_ms, "from_config: called");
        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(LlmError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, method)
    }

    /// Build the request body for the generateContent API
    fn build_request_body(&self, request: &GenerateRequest) -> serde_json::Value {
        debug!(model = %request.model, turns = request.contents.len(), "build_request_body: called");
        let mut body = serde_json::json!({
            "contents": self.convert_messages(&request.contents),
        });

        if let Some(system) = &request.system_instruction {
            body["systemInstruction"] = serde_json::json!({ "parts": [{ "text": system }] });
        }

        if let Some(schema) = &request.response_schema {
            debug!("build_request_body: structured output requested");
            body["generationConfig"] = serde_json::json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }

        if !request.functions.is_empty() {
            debug!(count = request.functions.len(), "build_request_body: adding function declarations");
            body["tools"] = serde_json::json!([{ "functionDeclarations": request.functions }]);
        }

        body
    }

    /// Convert internal Message types to the provider's `contents` format
    fn convert_messages(&self, messages: &[Message]) -> Vec<serde_json::Value> {
        messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.as_str(),
                    "parts": [{ "text": msg.text }],
                })
            })
            .collect()
    }

    /// Parse a (possibly partial) provider response
    fn parse_response(&self, api_response: GeminiResponse) -> Result<GenerateResponse, LlmError> {
        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        let Some(candidate) = api_response.candidates.into_iter().next() else {
            let reason = api_response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            debug!(%reason, "parse_response: empty response");
            return Err(LlmError::InvalidResponse(reason));
        };

        let mut text: Option<String> = None;
        let mut function_calls = Vec::new();
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if let Some(t) = part.text {
                text.get_or_insert_with(String::new).push_str(&t);
            }
            if let Some(call) = part.function_call {
                debug!(name = %call.name, "parse_response: function call");
                function_calls.push(FunctionCall {
                    name: call.name,
                    args: call.args,
                });
            }
        }

        Ok(GenerateResponse {
            text,
            function_calls,
            finish_reason: candidate
                .finish_reason
                .as_deref()
                .map(FinishReason::from_provider)
                .unwrap_or_default(),
            usage,
        })
    }

    /// Parse the data line of one SSE event
    fn parse_stream_event(&self, data: &str) -> Result<GenerateResponse, LlmError> {
        let api_response: GeminiResponse = serde_json::from_str(data)?;
        self.parse_response(api_response)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        debug!(model = %request.model, "generate: called");
        let url = self.endpoint(&request.model, "generateContent");
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "generate: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        let api_response: GeminiResponse = response.json().await?;
        let parsed = self.parse_response(api_response)?;
        info!(
            model = %request.model,
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "generate: complete"
        );
        Ok(parsed)
    }

    async fn stream(
        &self,
        request: GenerateRequest,
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<GenerateResponse, LlmError> {
        debug!(model = %request.model, "stream: called");
        let url = format!("{}?alt=sse", self.endpoint(&request.model, "streamGenerateContent"));
        let body = self.build_request_body(&request);

        let http_request = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body);

        let mut es = EventSource::new(http_request).map_err(|e| LlmError::Stream(e.to_string()))?;

        let mut full_text = String::new();
        let mut finish_reason = FinishReason::Stop;
        let mut usage = TokenUsage::default();

        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {
                    debug!("stream: Event::Open");
                }
                Ok(Event::Message(msg)) => {
                    let chunk = match self.parse_stream_event(&msg.data) {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            es.close();
                            let _ = chunk_tx.send(StreamChunk::Error(e.to_string())).await;
                            return Err(e);
                        }
                    };

                    if let Some(text) = chunk.text
                        && !text.is_empty()
                    {
                        full_text.push_str(&text);
                        let _ = chunk_tx.send(StreamChunk::TextDelta(text)).await;
                    }
                    if chunk.usage != TokenUsage::default() {
                        usage = chunk.usage;
                    }
                    finish_reason = chunk.finish_reason;
                }
                Err(reqwest_eventsource::Error::StreamEnded) => {
                    debug!("stream: ended");
                    break;
                }
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                    es.close();
                    let message = response.text().await.unwrap_or_default();
                    let _ = chunk_tx.send(StreamChunk::Error(message.clone())).await;
                    return Err(LlmError::ApiError {
                        status: status.as_u16(),
                        message,
                    });
                }
                Err(e) => {
                    debug!(%e, "stream: event error");
                    es.close();
                    let _ = chunk_tx.send(StreamChunk::Error(e.to_string())).await;
                    return Err(LlmError::Stream(e.to_string()));
                }
            }
        }
        es.close();

        let _ = chunk_tx
            .send(StreamChunk::Done {
                finish_reason: finish_reason.clone(),
                usage: usage.clone(),
            })
            .await;

        info!(model = %request.model, chars = full_text.len(), "stream: complete");
        Ok(GenerateResponse {
            text: if full_text.is_empty() { None } else { Some(full_text) },
            function_calls: vec![],
            finish_reason,
            usage,
        })
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FunctionDeclaration;

    fn test_client() -> GeminiClient {
        GeminiClient {
            api_key: "test-key".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            http: Client::new(),
        }
    }

    #[test]
    fn test_endpoint() {
        let client = test_client();
        assert_eq!(
            client.endpoint("gemini-2.5-pro", "generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::from_config(&config, "k".to_string()).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_build_request_body_basic() {
        let client = test_client();
        let request = GenerateRequest::new("gemini-2.5-flash", "Hello").with_system("You are Vigil");

        let body = client.build_request_body(&request);

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are Vigil");
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_build_request_body_with_schema() {
        let client = test_client();
        let request =
            GenerateRequest::new("gemini-2.5-pro", "Plan").with_schema(serde_json::json!({ "type": "OBJECT" }));

        let body = client.build_request_body(&request);

        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_build_request_body_with_functions() {
        let client = test_client();
        let request = GenerateRequest::new("gemini-2.5-flash", "go home").with_functions(vec![
            FunctionDeclaration::new(
                "navigateToDashboard",
                "Navigates to the dashboard.",
                serde_json::json!({ "type": "OBJECT", "properties": {} }),
            ),
        ]);

        let body = client.build_request_body(&request);

        assert_eq!(body["tools"][0]["functionDeclarations"][0]["name"], "navigateToDashboard");
        assert_eq!(
            body["tools"][0]["functionDeclarations"][0]["parameters"]["type"],
            "OBJECT"
        );
    }

    #[test]
    fn test_convert_messages_keeps_order_and_roles() {
        let client = test_client();
        let converted = client.convert_messages(&[Message::user("a"), Message::model("b"), Message::user("c")]);
        let roles: Vec<_> = converted.iter().map(|m| m["role"].as_str().unwrap()).collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
    }

    #[test]
    fn test_parse_response_text_parts_are_joined() {
        let client = test_client();
        let raw: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 4 }
        }))
        .unwrap();

        let parsed = client.parse_response(raw).unwrap();
        assert_eq!(parsed.text.as_deref(), Some("{\"a\":1}"));
        assert_eq!(parsed.finish_reason, FinishReason::Stop);
        assert_eq!(parsed.usage.input_tokens, 12);
        assert_eq!(parsed.usage.output_tokens, 4);
    }

    #[test]
    fn test_parse_response_function_call() {
        let client = test_client();
        let raw: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "functionCall": { "name": "startDecisionMatrix", "args": { "decision": "Move to Lisbon" } } }] }
            }]
        }))
        .unwrap();

        let parsed = client.parse_response(raw).unwrap();
        assert!(parsed.text.is_none());
        assert_eq!(parsed.function_calls.len(), 1);
        assert_eq!(parsed.function_calls[0].name, "startDecisionMatrix");
        assert_eq!(parsed.function_calls[0].args["decision"], "Move to Lisbon");
    }

    #[test]
    fn test_parse_stream_event() {
        let client = test_client();
        let data = r#"{"candidates":[{"content":{"parts":[{"text":"Hel"}]}}]}"#;
        let chunk = client.parse_stream_event(data).unwrap();
        assert_eq!(chunk.text.as_deref(), Some("Hel"));

        let err = client.parse_stream_event("{not json").unwrap_err();
        assert!(matches!(err, LlmError::Json(_)));

        let err = client.parse_stream_event(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_response_blocked_prompt() {
        let client = test_client();
        let raw: GeminiResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        let err = client.parse_response(raw).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(ref r) if r == "SAFETY"));
    }
}
