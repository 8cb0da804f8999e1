//! Orquestrador do pipeline de complexidade.
//!
//! Percorre os repositórios de um usuário em ordem, monta um prompt por
//! repositório elegível, avalia e retém o de maior score.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::evaluator::ComplexityEvaluator;
use crate::cache::EvaluationCache;
use crate::completion::OpenAiCompletion;
use crate::forge::{ForgeSource, GitHubClient};
use crate::prompt::{Prompt, PromptAssembler};
use crate::types::config::Config;
use crate::types::models::{ComplexityResult, Outcome, Repository};
use crate::RepoLensResult;

/// Contadores de uma execução.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Repositórios retornados pela listagem.
    pub listed: usize,
    /// Ignorados por falta de descrição ou linguagem.
    pub skipped_metadata: usize,
    /// Ignorados por falha na listagem de conteúdo.
    pub skipped_contents: usize,
    /// Arquivos incluídos em prompts.
    pub files_included: usize,
    /// Arquivos cujo download falhou.
    pub files_failed: usize,
    /// Avaliações que falharam.
    pub evaluation_failures: usize,
    /// Repositórios pontuados.
    pub scored: usize,
    /// Avaliações servidas pelo cache.
    pub cache_hits: usize,
}

/// Relatório completo de uma execução.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Usuário analisado.
    pub username: String,

    /// Repositórios encontrados (`None` se a listagem falhou).
    pub repositories_found: Option<usize>,

    /// Resultado final.
    pub outcome: Outcome,

    /// Link web do repositório vencedor.
    pub link: Option<String>,

    /// Contadores da execução.
    pub stats: RunStats,
}

/// Extrai o nome de usuário de um ID ou URL de perfil (último segmento do caminho).
///
/// Query string e fragmento são descartados.
pub fn extract_username(input: &str) -> &str {
    let input = input.trim();
    let path_end = input.find(['?', '#']).unwrap_or(input.len());

    input[..path_end]
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Retém o candidato se o score dele for estritamente maior.
///
/// Em empate o resultado já retido permanece.
pub fn retain_best(best: &mut Option<ComplexityResult>, candidate: ComplexityResult) -> bool {
    let replace = best
        .as_ref()
        .map_or(true, |current| candidate.score > current.score);

    if replace {
        *best = Some(candidate);
    }
    replace
}

/// Pipeline de análise de complexidade.
///
/// Execução estritamente sequencial: uma requisição de cada vez.
pub struct Pipeline {
    forge: Box<dyn ForgeSource>,
    evaluator: ComplexityEvaluator,
    assembler: PromptAssembler,
    pause: Duration,
}

impl Pipeline {
    /// Cria um pipeline com pausa padrão de 1 segundo.
    pub fn new(
        forge: Box<dyn ForgeSource>,
        evaluator: ComplexityEvaluator,
        assembler: PromptAssembler,
    ) -> Self {
        Self {
            forge,
            evaluator,
            assembler,
            pause: Duration::from_secs(1),
        }
    }

    /// Cria o pipeline de produção (GitHub + OpenAI) com a credencial injetada.
    pub fn from_config(config: &Config, credential: SecretString) -> RepoLensResult<Self> {
        let timeout = config.general.timeout();
        let forge = GitHubClient::from_config(&config.forge, timeout)?;
        let backend = OpenAiCompletion::new(&config.completion, credential, timeout)?;
        let evaluator =
            ComplexityEvaluator::new(Box::new(backend), EvaluationCache::from_config(&config.cache));

        Ok(Self::new(
            Box::new(forge),
            evaluator,
            PromptAssembler::from_config(&config.pipeline),
        )
        .with_pause(config.pipeline.pause()))
    }

    /// Define a pausa entre a montagem do prompt e a avaliação.
    #[must_use]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Avaliador em uso.
    pub fn evaluator(&self) -> &ComplexityEvaluator {
        &self.evaluator
    }

    /// Analisa um usuário e retorna apenas o resultado final.
    pub async fn analyze(&mut self, username_or_url: &str) -> Outcome {
        self.run(username_or_url).await.outcome
    }

    /// Analisa um usuário e retorna o relatório completo.
    pub async fn run(&mut self, username_or_url: &str) -> AnalysisReport {
        let username = extract_username(username_or_url).to_string();
        let mut stats = RunStats::default();

        if username.is_empty() {
            tracing::warn!("Nome de usuário vazio em '{}'", username_or_url);
            return AnalysisReport {
                username,
                repositories_found: None,
                outcome: Outcome::NotFound,
                link: None,
                stats,
            };
        }

        let repositories = match self.forge.list_repositories(&username).await {
            Ok(repositories) => repositories,
            Err(e) => {
                tracing::warn!("Falha ao listar repositórios de {}: {}", username, e);
                return AnalysisReport {
                    username,
                    repositories_found: None,
                    outcome: Outcome::NotFound,
                    link: None,
                    stats,
                };
            }
        };

        stats.listed = repositories.len();
        tracing::info!(
            "{} repositórios encontrados para {} em {}",
            repositories.len(),
            username,
            self.forge.name()
        );

        let mut best: Option<ComplexityResult> = None;

        for repository in repositories {
            if !repository.has_metadata() {
                tracing::debug!("{} sem descrição ou linguagem, ignorado", repository.name);
                stats.skipped_metadata += 1;
                continue;
            }

            let prompt = match self.build_prompt(&repository, &mut stats).await {
                Ok(prompt) => prompt,
                Err(e) => {
                    tracing::warn!("Conteúdo de {} indisponível, ignorado: {}", repository.name, e);
                    stats.skipped_contents += 1;
                    continue;
                }
            };

            if !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            let hits_before = self.evaluator.cache_stats().hits;
            let assessment = match self.evaluator.evaluate(&prompt).await {
                Ok(assessment) => assessment,
                Err(e) => {
                    tracing::warn!("Avaliação de {} falhou: {}", repository.name, e);
                    stats.evaluation_failures += 1;
                    continue;
                }
            };

            if self.evaluator.cache_stats().hits > hits_before {
                stats.cache_hits += 1;
            }

            let result = ComplexityResult::new(repository, assessment);
            stats.scored += 1;
            tracing::info!("{} avaliado com score {}", result.repository.name, result.score);

            if retain_best(&mut best, result) {
                tracing::debug!("Novo repositório mais complexo");
            }
        }

        let link = best
            .as_ref()
            .map(|b| self.forge.repository_link(&username, &b.repository));

        let outcome = match best {
            Some(result) => Outcome::Best(result),
            None => Outcome::NotFound,
        };

        AnalysisReport {
            username,
            repositories_found: Some(stats.listed),
            outcome,
            link,
            stats,
        }
    }

    /// Lista o conteúdo e monta o prompt de um repositório.
    ///
    /// Falha apenas se a listagem falhar; arquivos com erro são pulados.
    async fn build_prompt(
        &self,
        repository: &Repository,
        stats: &mut RunStats,
    ) -> RepoLensResult<Prompt> {
        let entries = self.forge.list_contents(repository).await?;
        let header = self.assembler.build_header(repository);
        let mut blocks = Vec::new();

        for entry in entries.iter().filter(|e| self.assembler.is_source_file(e)) {
            let Some(url) = entry.download_url.as_deref() else {
                tracing::debug!("{} sem download_url, ignorado", entry.name);
                continue;
            };

            match self.forge.fetch_raw_file(url).await {
                Ok(content) => {
                    blocks.push(self.assembler.build_file_block(&entry.name, &content));
                    stats.files_included += 1;
                }
                Err(e) => {
                    tracing::warn!("Falha ao baixar {}: {}", entry.name, e);
                    stats.files_failed += 1;
                }
            }
        }

        Ok(self.assembler.assemble(header, blocks))
    }
}
