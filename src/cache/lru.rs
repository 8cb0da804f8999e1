//! Cache LRU com TTL para avaliações de complexidade.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::types::config::CacheConfig;

/// Avaliação em cache.
#[derive(Debug, Clone)]
pub struct CachedAssessment {
    /// Texto da avaliação.
    pub assessment: String,

    /// Momento em que foi cacheado.
    pub cached_at: Instant,
}

impl CachedAssessment {
    /// Cria uma nova entrada.
    pub fn new(assessment: String) -> Self {
        Self {
            assessment,
            cached_at: Instant::now(),
        }
    }

    /// Verifica se a entrada atingiu o TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() >= ttl
    }
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache LRU de avaliações, indexado pelo texto exato do prompt.
///
/// Uma instância pertence a um único avaliador; não há estado global.
pub struct EvaluationCache {
    cache: LruCache<String, CachedAssessment>,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl EvaluationCache {
    /// Cria um novo cache.
    ///
    /// # Argumentos
    /// - `capacity`: Número máximo de entradas (0 vira 1)
    /// - `ttl`: Tempo de vida das entradas
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(cap),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Cria um cache a partir da configuração.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, Duration::from_secs(config.ttl_secs))
    }

    /// Cria um cache com configuração padrão (100 entradas, 1 hora).
    pub fn default_config() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    /// Gera a chave de cache de um prompt.
    ///
    /// SHA256 do texto completo: prompts idênticos byte a byte compartilham a chave.
    pub fn cache_key(prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Busca a avaliação de um prompt.
    ///
    /// Retorna `None` se não encontrado ou se expirado.
    pub fn get(&mut self, prompt: &str) -> Option<&str> {
        let key = Self::cache_key(prompt);

        // peek não altera a ordem LRU
        let is_expired = self.cache.peek(&key).map(|c| c.is_expired(self.ttl));

        match is_expired {
            Some(true) => {
                self.cache.pop(&key);
                self.misses += 1;
                None
            }
            Some(false) => {
                self.hits += 1;
                self.cache.get(&key).map(|c| c.assessment.as_str())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insere ou renova a avaliação de um prompt.
    ///
    /// Com o cache cheio, a entrada menos usada recentemente é removida.
    pub fn put(&mut self, prompt: &str, assessment: impl Into<String>) {
        let key = Self::cache_key(prompt);
        if let Some((evicted, _)) = self.cache.push(key.clone(), CachedAssessment::new(assessment.into())) {
            if evicted != key {
                tracing::debug!("Cache cheio, entrada {} removida", &evicted[..12]);
            }
        }
    }

    /// Invalida a entrada de um prompt.
    pub fn invalidate(&mut self, prompt: &str) {
        self.cache.pop(&Self::cache_key(prompt));
    }

    /// Limpa todo o cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Remove entradas expiradas.
    pub fn cleanup_expired(&mut self) {
        let expired_keys: Vec<String> = self
            .cache
            .iter()
            .filter(|(_, v)| v.is_expired(self.ttl))
            .map(|(k, _)| k.clone())
            .collect();

        for key in expired_keys {
            self.cache.pop(&key);
        }
    }
}
