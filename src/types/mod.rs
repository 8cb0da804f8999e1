//! Tipos compartilhados do RepoLens.

pub mod config;
pub mod errors;
pub mod models;
