//! Implementação dos comandos CLI do RepoLens.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::pipeline::{AnalysisReport, Pipeline};
use crate::types::config::{Config, API_KEY_ENV};
use crate::types::models::Outcome;
use crate::{RepoLensError, RepoLensResult};

/// Analisa os repositórios de um usuário e imprime o relatório.
pub async fn analyze(user: &str, json: bool, config: &Config) -> RepoLensResult<()> {
    let credential = config.credential()?;

    tracing::debug!(
        "Configuração carregada: modelo={}, cache={} entradas/{}s, pausa={}ms",
        config.completion.model,
        config.cache.capacity,
        config.cache.ttl_secs,
        config.pipeline.pause_ms
    );

    let mut pipeline = Pipeline::from_config(config, credential)?;

    if !json {
        println!(
            "Buscando repositórios de: {}...",
            crate::pipeline::extract_username(user)
        );
    }

    let report = pipeline.run(user).await;

    let stats = pipeline.evaluator().cache_stats();
    tracing::debug!(
        "Cache: {} hits, {} misses ({} entradas)",
        stats.hits,
        stats.misses,
        stats.size
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

/// Formata o relatório para o terminal.
pub fn render_report(report: &AnalysisReport) -> String {
    ReportView(report).to_string()
}

/// Visão de texto de um relatório.
struct ReportView<'a>(&'a AnalysisReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        let Some(found) = report.repositories_found else {
            return writeln!(
                f,
                "Falha ao buscar repositórios do usuário: {}",
                report.username
            );
        };

        writeln!(f, "{} repositórios encontrados.", found)?;

        match &report.outcome {
            Outcome::Best(best) => {
                let repo = &best.repository;
                writeln!(f, "\nRepositório mais complexo:")?;
                writeln!(f, "  Nome: {}", repo.name)?;
                writeln!(
                    f,
                    "  Descrição: {}",
                    repo.description.as_deref().unwrap_or_default()
                )?;
                writeln!(
                    f,
                    "  Linguagem: {}",
                    repo.language.as_deref().unwrap_or_default()
                )?;
                writeln!(f, "  Score: {}", best.score)?;
                if let Some(link) = &report.link {
                    writeln!(f, "  Link: {}", link)?;
                }
                writeln!(f, "\nAnálise de complexidade técnica:")?;
                writeln!(f, "{}", best.assessment.trim())?;
            }
            Outcome::NotFound => writeln!(f, "Nenhum repositório pôde ser avaliado.")?,
        }

        let stats = &report.stats;
        writeln!(
            f,
            "\n({} avaliados, {} do cache, {} sem descrição/linguagem, {} sem conteúdo, {} falhas de avaliação)",
            stats.scored,
            stats.cache_hits,
            stats.skipped_metadata,
            stats.skipped_contents,
            stats.evaluation_failures
        )
    }
}

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> RepoLensResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("repolens.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("RepoLens initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Export {} (or set completion.api_key)", API_KEY_ENV);
    println!("  2. Check the setup: repolens doctor");
    println!("  3. Run: repolens analyze <user>");

    Ok(())
}

/// Diagnostica problemas de configuração.
pub async fn doctor(config_path: &Path, config: &Config) -> RepoLensResult<()> {
    println!("Diagnosticando configuração do RepoLens...\n");

    let mut issues: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if config_path.exists() {
        match Config::load(config_path) {
            Ok(_) => println!("✓ Configuração carregada de {}", config_path.display()),
            Err(e) => issues.push(format!("{} inválido: {}", config_path.display(), e)),
        }
    } else {
        warnings.push(format!(
            "{} não encontrado, usando valores padrão",
            config_path.display()
        ));
    }

    match config.credential() {
        Ok(_) => println!("✓ Credencial do serviço de completion disponível"),
        Err(RepoLensError::MissingCredential) => issues.push(format!(
            "Credencial ausente: defina {} ou completion.api_key",
            API_KEY_ENV
        )),
        Err(e) => issues.push(e.to_string()),
    }

    println!("✓ Forge: {}", config.forge.api_base);
    println!(
        "✓ Completion: {} (modelo {})",
        config.completion.api_base, config.completion.model
    );

    if config.pipeline.extensions.is_empty() {
        warnings.push("Nenhuma extensão configurada - prompts terão apenas o cabeçalho".to_string());
    }
    if config.cache.capacity == 0 {
        warnings.push("cache.capacity = 0 é tratado como 1".to_string());
    }

    println!();
    if issues.is_empty() && warnings.is_empty() {
        println!("✓ Tudo OK! RepoLens está pronto para uso.");
    } else {
        if !warnings.is_empty() {
            println!("Avisos:");
            for warning in warnings {
                println!("  ⚠ {}", warning);
            }
        }
        if !issues.is_empty() {
            println!("Problemas:");
            for issue in issues {
                println!("  ✗ {}", issue);
            }
        }
    }

    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("repolens {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Análise de complexidade de repositórios do GitHub");
}
