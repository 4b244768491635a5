//! Chat-completions gateway shared by OpenAI and DeepSeek
//!
//! Both providers speak the same `/chat/completions` protocol; they differ
//! only in base URL and credential. The gateway keeps the message list for a
//! single reply locally so it can run the lookup tool loop before handing
//! the final text back.

mod types;

use async_trait::async_trait;
use lab_application::ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
use lab_application::ports::reference_lookup::ReferenceLookup;
use lab_domain::tool::lookup::lookup_tools;
use lab_domain::{LookupRequest, Model, Provider, TokenUsage};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use types::{ChatMessage, ChatRequest, ChatResponse, ErrorBody, WireToolCall, tool_schema};

pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
    provider: Provider,
    base_url: String,
    api_key: Option<String>,
    lookup: Arc<dyn ReferenceLookup>,
    tool_turn_limit: u32,
}

impl OpenAiCompatibleGateway {
    pub fn new(
        client: reqwest::Client,
        provider: Provider,
        base_url: impl Into<String>,
        api_key: Option<String>,
        lookup: Arc<dyn ReferenceLookup>,
        tool_turn_limit: u32,
    ) -> Self {
        Self {
            client,
            provider,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            lookup,
            tool_turn_limit,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    fn api_key(&self) -> Result<&str, GatewayError> {
        self.api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential {
                provider: self.provider,
                env_var: crate::config::FileApiKeysConfig::env_var(self.provider),
            })
    }

    /// One POST to `/chat/completions`
    async fn chat(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        temperature: f32,
        tools: Option<&[Value]>,
    ) -> Result<ChatResponse, GatewayError> {
        let request = ChatRequest {
            model: model.as_str(),
            messages,
            temperature,
            tools,
        };

        debug!(
            provider = %self.provider,
            model = %model,
            messages = messages.len(),
            tools = tools.is_some(),
            "Calling chat completions"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(match status.as_u16() {
                404 => GatewayError::ModelNotAvailable(format!("{}: {}", model, message)),
                code => GatewayError::RequestFailed(format!("HTTP {}: {}", code, message)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    /// Run the requested lookups and append their results to `messages`
    async fn answer_tool_calls(
        &self,
        calls: &[WireToolCall],
        messages: &mut Vec<ChatMessage>,
    ) -> Result<(), GatewayError> {
        for wire in calls {
            let call = wire.to_tool_call();
            let content = match LookupRequest::from_call(&call) {
                Ok(request) => {
                    info!(tool = %call.tool_name, "Running lookup");
                    self.lookup
                        .lookup(&request)
                        .await
                        .map_err(|e| GatewayError::LookupFailed(e.to_string()))?
                }
                // Bad arguments go back to the model so it can retry
                Err(message) => {
                    warn!(tool = %call.tool_name, "Rejected tool call: {}", message);
                    format!("Error: {}", message)
                }
            };
            messages.push(ChatMessage::tool_result(&wire.id, content));
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompatibleGateway {
    async fn generate(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        let mut messages = Vec::with_capacity(request.history.len() + 1);
        messages.push(ChatMessage::system(&request.system_instructions));
        messages.extend(request.history.iter().map(ChatMessage::from_history));

        let tools: Vec<Value> = if request.tools_enabled {
            lookup_tools().iter().map(tool_schema).collect()
        } else {
            Vec::new()
        };

        let mut usage = TokenUsage::default();
        let mut tool_turns = 0;

        loop {
            // Once the limit is hit the model has to answer without tools
            let offered = (!tools.is_empty() && tool_turns < self.tool_turn_limit)
                .then_some(tools.as_slice());

            let response = self
                .chat(&request.model, &messages, request.temperature, offered)
                .await?;
            if let Some(u) = response.usage {
                usage += TokenUsage::new(u.prompt_tokens, u.completion_tokens);
            }

            let choice = response.choices.into_iter().next().ok_or_else(|| {
                GatewayError::InvalidResponse("response contained no choices".to_string())
            })?;

            if offered.is_some() && !choice.message.tool_calls.is_empty() {
                tool_turns += 1;
                let calls = choice.message.tool_calls.clone();
                messages.push(choice.message);
                self.answer_tool_calls(&calls, &mut messages).await?;
                continue;
            }

            let text = choice.message.content.ok_or_else(|| {
                GatewayError::InvalidResponse(format!(
                    "no text in reply (finish_reason: {})",
                    choice.finish_reason.as_deref().unwrap_or("unknown")
                ))
            })?;

            let completion = Completion::text(text);
            return Ok(if usage.is_empty() {
                completion
            } else {
                completion.with_usage(usage)
            });
        }
    }

    fn preflight(&self, model: &Model) -> Result<(), GatewayError> {
        if model.provider() != self.provider {
            return Err(GatewayError::ModelNotAvailable(format!(
                "{} is not served by {}",
                model, self.provider
            )));
        }
        self.api_key().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_application::ports::reference_lookup::LookupError;
    use lab_domain::{ConversationRole, HistoryEntry};
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingLookup {
        requests: Mutex<Vec<LookupRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl ReferenceLookup for RecordingLookup {
        async fn lookup(&self, request: &LookupRequest) -> Result<String, LookupError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(LookupError::ServiceFailed("ADS returned HTTP 500".to_string()));
            }
            Ok("TITLE: Found it".to_string())
        }
    }

    fn gateway(server: &MockServer, lookup: Arc<RecordingLookup>) -> OpenAiCompatibleGateway {
        OpenAiCompatibleGateway::new(
            reqwest::Client::new(),
            Provider::OpenAi,
            server.uri(),
            Some("sk-test".to_string()),
            lookup,
            2,
        )
    }

    fn request(tools_enabled: bool) -> CompletionRequest {
        CompletionRequest {
            system_instructions: "You are a Reviewer.".to_string(),
            history: vec![HistoryEntry::new(ConversationRole::Requester, "Say hi")],
            temperature: 0.2,
            model: Model::Gpt4o,
            tools_enabled,
        }
    }

    fn text_reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": text}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3}
        }))
    }

    fn tool_reply() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "ads_search", "arguments": "{\"query\": \"halo\", \"num_articles\": 1}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2}
        }))
    }

    #[tokio::test]
    async fn test_plain_generation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "You are a Reviewer."},
                    {"role": "user", "content": "Say hi"}
                ]
            })))
            .respond_with(text_reply("Hello."))
            .expect(1)
            .mount(&server)
            .await;

        let completion = gateway(&server, Arc::default())
            .generate(request(false))
            .await
            .unwrap();

        assert_eq!(completion.text, "Hello.");
        assert_eq!(completion.usage, Some(TokenUsage::new(10, 3)));
    }

    #[tokio::test]
    async fn test_tool_loop_runs_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"messages": [{}, {}, {"role": "assistant"}, {"role": "tool", "tool_call_id": "call_1"}]})))
            .respond_with(text_reply("Per the paper, hello."))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(tool_reply())
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let lookup = Arc::new(RecordingLookup::default());
        let completion = gateway(&server, lookup.clone())
            .generate(request(true))
            .await
            .unwrap();

        assert_eq!(completion.text, "Per the paper, hello.");
        assert_eq!(completion.usage, Some(TokenUsage::new(15, 5)));
        assert_eq!(
            *lookup.requests.lock().unwrap(),
            vec![LookupRequest::Literature {
                query: "halo".to_string(),
                num_articles: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(tool_reply())
            .mount(&server)
            .await;

        let lookup = Arc::new(RecordingLookup {
            fail: true,
            ..Default::default()
        });
        let err = gateway(&server, lookup)
            .generate(request(true))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::LookupFailed(ref m) if m.contains("500")));
    }

    #[tokio::test]
    async fn test_http_error_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached"}
            })))
            .mount(&server)
            .await;

        let err = gateway(&server, Arc::default())
            .generate(request(false))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(ref m) if m == "HTTP 429: Rate limit reached"));
    }

    #[test]
    fn test_preflight() {
        let lookup: Arc<dyn ReferenceLookup> = Arc::new(RecordingLookup::default());
        let without_key = OpenAiCompatibleGateway::new(
            reqwest::Client::new(),
            Provider::DeepSeek,
            "http://localhost",
            None,
            lookup.clone(),
            2,
        );
        assert!(matches!(
            without_key.preflight(&Model::DeepSeekChat),
            Err(GatewayError::MissingCredential {
                provider: Provider::DeepSeek,
                env_var: "DEEPSEEK_API_KEY"
            })
        ));
        assert!(matches!(
            without_key.preflight(&Model::Gpt4o),
            Err(GatewayError::ModelNotAvailable(_))
        ));

        let with_key = OpenAiCompatibleGateway::new(
            reqwest::Client::new(),
            Provider::DeepSeek,
            "http://localhost",
            Some("ds".to_string()),
            lookup,
            2,
        );
        assert!(with_key.preflight(&Model::DeepSeekReasoner).is_ok());
    }
}
