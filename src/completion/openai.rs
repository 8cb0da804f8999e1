//! Backend para a API de completions da OpenAI.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::base::{CompletionBackend, GenerationConfig};
use crate::types::config::CompletionConfig;
use crate::{RepoLensError, RepoLensResult};

/// Backend OpenAI (`POST {api_base}/completions`).
pub struct OpenAiCompletion {
    http: Client,
    endpoint: String,
    api_key: SecretString,
    generation: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl OpenAiCompletion {
    /// Cria o backend com a credencial injetada.
    pub fn new(
        config: &CompletionConfig,
        api_key: SecretString,
        timeout: Duration,
    ) -> RepoLensResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepoLensError::config(format!("Cliente HTTP inválido: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/completions", config.api_base.trim_end_matches('/')),
            api_key,
            generation: GenerationConfig::from_config(config),
        })
    }

    /// Política de geração em uso.
    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletion {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, prompt: &str) -> RepoLensResult<String> {
        let body = serde_json::json!({
            "model": self.generation.model,
            "prompt": prompt,
            "max_tokens": self.generation.max_tokens,
            "temperature": self.generation.temperature,
            "n": self.generation.n,
            "stop": self.generation.stop,
        });

        tracing::debug!(
            "Enviando prompt de {} bytes para {}",
            prompt.len(),
            self.endpoint
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| RepoLensError::evaluation(format!("falha de transporte: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RepoLensError::evaluation(format!(
                "status HTTP {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| RepoLensError::evaluation(format!("resposta inválida: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| RepoLensError::evaluation("resposta sem choices"))
    }
}
