//! Cache LRU para avaliações de complexidade.
//!
//! Guarda o texto retornado pelo serviço de completion para cada prompt,
//! evitando chamadas repetidas para o mesmo conteúdo dentro do TTL.

mod lru;

pub use lru::{CacheStats, CachedAssessment, EvaluationCache};
