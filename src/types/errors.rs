//! Tipos de erro do RepoLens.

use thiserror::Error;

/// Tipo de resultado padrão do RepoLens.
pub type RepoLensResult<T> = Result<T, RepoLensError>;

/// Erros possíveis no RepoLens.
#[derive(Error, Debug)]
pub enum RepoLensError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Falha de rede em '{url}': {reason}")]
    Network { url: String, reason: String },

    #[error("'{url}' respondeu com status HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Falha na avaliação: {0}")]
    Evaluation(String),

    #[error("Credencial do serviço de completion não encontrada (defina OPENAI_API_KEY ou completion.api_key)")]
    MissingCredential,
}

impl RepoLensError {
    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de rede para a URL informada.
    pub fn network<U: Into<String>, R: std::fmt::Display>(url: U, reason: R) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Cria um erro de avaliação.
    pub fn evaluation<S: Into<String>>(msg: S) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Falhas de busca no forge (transporte ou status não-2xx).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::HttpStatus { .. })
    }

    /// Falhas do serviço de completion.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::Evaluation(_))
    }
}
