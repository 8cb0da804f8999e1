//! Acesso ao forge de código (GitHub).
//!
//! Lista os repositórios de um usuário, o conteúdo de cada repositório
//! e baixa o conteúdo bruto dos arquivos selecionados.

mod base;
mod github;

pub use base::{resolve_contents_url, ForgeSource};
pub use github::GitHubClient;
