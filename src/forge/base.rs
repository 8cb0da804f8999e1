//! Trait base para fontes de repositórios.

use async_trait::async_trait;

use crate::types::models::{ContentEntry, Repository};
use crate::RepoLensResult;

/// Fonte de repositórios e arquivos.
///
/// Falhas de transporte e status não-2xx são reportadas como erros de rede
/// (`RepoLensError::is_network`). Quem chama decide se a falha é fatal.
#[async_trait]
pub trait ForgeSource: Send + Sync {
    /// Retorna o nome da fonte.
    fn name(&self) -> &str;

    /// Lista os repositórios públicos de um usuário.
    async fn list_repositories(&self, username: &str) -> RepoLensResult<Vec<Repository>>;

    /// Lista as entradas da raiz de um repositório.
    async fn list_contents(&self, repository: &Repository) -> RepoLensResult<Vec<ContentEntry>>;

    /// Baixa o conteúdo bruto de um arquivo, byte a byte.
    async fn fetch_raw_file(&self, url: &str) -> RepoLensResult<Vec<u8>>;

    /// Link web de um repositório.
    fn repository_link(&self, username: &str, repository: &Repository) -> String;
}

/// Remove as expressões de template (`{+path}`, `{/sha}`...) de uma URL.
pub fn resolve_contents_url(template: &str) -> String {
    let mut resolved = String::with_capacity(template.len());
    let mut depth = 0usize;

    for c in template.chars() {
        match c {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            _ if depth == 0 => resolved.push(c),
            _ => {}
        }
    }

    resolved
}
