use crate::core::evaluator::{build_prompt, to_evaluation_result};
use crate::domain::model::{EvaluationRequest, EvaluationResult};
use crate::domain::ports::{ConfigProvider, Evaluator};
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Evaluates arithmetic by asking an OpenAI-compatible chat completion endpoint.
pub struct OpenAiEvaluator {
    client: Client,
    endpoint: String,
    model: String,
    token_env: String,
    token: Option<String>,
}

impl OpenAiEvaluator {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            token_env: config.token_env().to_string(),
            token: config.api_token().map(str::to_string),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }

    // Read on every call so a missing token only matters once a result is asked for.
    fn api_token(&self) -> Result<String> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(CalcError::transport(format!(
                "environment variable {} is not set",
                self.token_env
            ))),
        }
    }

    /// Sends one user message and returns the text of the first choice.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let token = self.api_token()?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("Making completion request to: {}", self.completions_url());
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        tracing::debug!("Completion API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(CalcError::transport(format!(
                "completion API returned {}",
                response.status()
            )));
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CalcError::transport("completion reply carried no message content"))
    }
}

#[async_trait]
impl Evaluator for OpenAiEvaluator {
    async fn evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        let prompt = build_prompt(request);
        to_evaluation_result(self.complete(&prompt).await)
    }
}
