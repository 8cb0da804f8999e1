//! # RepoLens
//!
//! Encontra o repositório tecnicamente mais complexo de um usuário do GitHub.
//!
//! Para cada repositório com descrição e linguagem, o RepoLens baixa os
//! arquivos-fonte da raiz, monta um prompt e pede a um serviço de completion
//! uma avaliação de complexidade. O repositório com a avaliação mais longa vence.
//!
//! ## Módulos
//!
//! - [`cli`] - Interface de linha de comando
//! - [`forge`] - Cliente da API do GitHub
//! - [`prompt`] - Montagem dos prompts
//! - [`cache`] - Cache LRU com TTL para avaliações
//! - [`completion`] - Backends de completion (OpenAI)
//! - [`pipeline`] - Avaliador e orquestrador
//! - [`types`] - Tipos compartilhados

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod completion;
pub mod forge;
pub mod pipeline;
pub mod prompt;
pub mod types;

pub use types::config::Config;
pub use types::errors::{RepoLensError, RepoLensResult};
pub use types::models::{ComplexityResult, ContentEntry, Outcome, Repository};
