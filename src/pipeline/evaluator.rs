//! Avaliador de complexidade com cache.

use crate::cache::{CacheStats, EvaluationCache};
use crate::completion::CompletionBackend;
use crate::prompt::Prompt;
use crate::RepoLensResult;

/// Score de complexidade de uma avaliação: o número de caracteres do texto.
///
/// É uma aproximação grosseira, sem valor semântico.
pub fn complexity_score(assessment: &str) -> usize {
    assessment.chars().count()
}

/// Avaliador de complexidade.
///
/// Consulta o cache antes de chamar o backend; só respostas bem-sucedidas
/// são cacheadas.
pub struct ComplexityEvaluator {
    backend: Box<dyn CompletionBackend>,
    cache: EvaluationCache,
}

impl ComplexityEvaluator {
    /// Cria um avaliador com o backend e o cache informados.
    pub fn new(backend: Box<dyn CompletionBackend>, cache: EvaluationCache) -> Self {
        Self { backend, cache }
    }

    /// Avalia um prompt.
    pub async fn evaluate(&mut self, prompt: &Prompt) -> RepoLensResult<String> {
        if let Some(cached) = self.cache.get(prompt.as_str()) {
            tracing::debug!("Cache hit para prompt de {} bytes", prompt.len());
            return Ok(cached.to_string());
        }

        tracing::debug!("Consultando {} ({} bytes)", self.backend.name(), prompt.len());
        let assessment = self.backend.complete(prompt.as_str()).await?;
        self.cache.put(prompt.as_str(), assessment.clone());

        Ok(assessment)
    }

    /// Estatísticas do cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptAssembler;
    use crate::RepoLensError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct CountingBackend {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl CompletionBackend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        async fn complete(&self, prompt: &str) -> RepoLensResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RepoLensError::evaluation("quota excedida"));
            }
            Ok(format!("avaliação de {} bytes", prompt.len()))
        }
    }

    fn evaluator(fail: bool, ttl: Duration) -> (ComplexityEvaluator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = CountingBackend {
            calls: Arc::clone(&calls),
            fail,
        };
        let evaluator = ComplexityEvaluator::new(Box::new(backend), EvaluationCache::new(10, ttl));
        (evaluator, calls)
    }

    fn prompt(text: &str) -> Prompt {
        PromptAssembler::default().assemble(text.to_string(), Vec::<String>::new())
    }

    #[test]
    fn test_complexity_score_counts_chars() {
        assert_eq!(complexity_score(""), 0);
        assert_eq!(complexity_score("abc"), 3);
        assert_eq!(complexity_score("ação"), 4);
    }

    #[tokio::test]
    async fn test_second_evaluation_hits_cache() {
        let (mut evaluator, calls) = evaluator(false, Duration::from_secs(60));
        let p = prompt("repo");

        let first = evaluator.evaluate(&p).await.unwrap();
        let second = evaluator.evaluate(&p).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(evaluator.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_different_prompts_call_backend() {
        let (mut evaluator, calls) = evaluator(false, Duration::from_secs(60));

        evaluator.evaluate(&prompt("a")).await.unwrap();
        evaluator.evaluate(&prompt("b")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_calls_backend_again() {
        let (mut evaluator, calls) = evaluator(false, Duration::from_secs(0));
        let p = prompt("repo");

        evaluator.evaluate(&p).await.unwrap();
        evaluator.evaluate(&p).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (mut evaluator, calls) = evaluator(true, Duration::from_secs(60));
        let p = prompt("repo");

        let err = evaluator.evaluate(&p).await.unwrap_err();
        assert!(err.is_evaluation());
        assert!(evaluator.evaluate(&p).await.is_err());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(evaluator.cache_stats().size, 0);
    }
}
