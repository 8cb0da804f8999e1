//! Cliente HTTP para a API REST do GitHub.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::base::{resolve_contents_url, ForgeSource};
use crate::types::config::ForgeConfig;
use crate::types::models::{ContentEntry, Repository};
use crate::{RepoLensError, RepoLensResult};

/// Cliente do GitHub.
///
/// Não autentica: apenas dados públicos, sujeitos ao limite de requisições anônimas.
pub struct GitHubClient {
    http: Client,
    api_base: String,
    web_base: String,
}

impl GitHubClient {
    /// Cria um cliente a partir da configuração do TOML.
    pub fn from_config(config: &ForgeConfig, timeout: Duration) -> RepoLensResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RepoLensError::config(format!("Cliente HTTP inválido: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            web_base: config.web_base.trim_end_matches('/').to_string(),
        })
    }

    /// Cria um cliente apontando para a API informada (usado em testes).
    pub fn with_base(api_base: impl Into<String>) -> RepoLensResult<Self> {
        let config = ForgeConfig {
            api_base: api_base.into(),
            ..ForgeConfig::default()
        };
        Self::from_config(&config, Duration::from_secs(10))
    }

    /// GET que exige status 2xx.
    async fn get(&self, url: &str) -> RepoLensResult<reqwest::Response> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RepoLensError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepoLensError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> RepoLensResult<T> {
        self.get(url)
            .await?
            .json::<T>()
            .await
            .map_err(|e| RepoLensError::network(url, format!("resposta inválida: {}", e)))
    }
}

#[async_trait]
impl ForgeSource for GitHubClient {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn list_repositories(&self, username: &str) -> RepoLensResult<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?per_page=100", self.api_base, username);
        tracing::debug!("Listando repositórios: {}", url);
        self.get_json(&url).await
    }

    async fn list_contents(&self, repository: &Repository) -> RepoLensResult<Vec<ContentEntry>> {
        let url = resolve_contents_url(&repository.contents_url);
        tracing::debug!("Listando conteúdo de {}: {}", repository.name, url);
        self.get_json(&url).await
    }

    async fn fetch_raw_file(&self, url: &str) -> RepoLensResult<Vec<u8>> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| RepoLensError::network(url, e))?;
        Ok(bytes.to_vec())
    }

    fn repository_link(&self, username: &str, repository: &Repository) -> String {
        format!("{}/{}/{}", self.web_base, username, repository.name)
    }
}
