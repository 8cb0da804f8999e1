//! Trait base para serviços de completion.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::config::CompletionConfig;
use crate::RepoLensResult;

/// Política fixa de geração enviada em cada chamada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Modelo.
    pub model: String,

    /// Limite de tokens gerados.
    pub max_tokens: u32,

    /// Temperatura de amostragem.
    pub temperature: f32,

    /// Número de candidatos (sempre 1).
    pub n: u8,

    /// Sequência de parada (nenhuma).
    pub stop: Option<Vec<String>>,
}

impl GenerationConfig {
    /// Cria a política a partir da configuração do TOML.
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            n: 1,
            stop: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::from_config(&CompletionConfig::default())
    }
}

/// Serviço que gera texto a partir de um prompt.
///
/// Qualquer falha (cota, resposta malformada, transporte) é um
/// `RepoLensError::Evaluation`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Retorna o nome do backend.
    fn name(&self) -> &str;

    /// Gera a avaliação de um prompt.
    async fn complete(&self, prompt: &str) -> RepoLensResult<String>;
}
