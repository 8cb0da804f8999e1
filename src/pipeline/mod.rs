//! Pipeline de avaliação de complexidade.
//!
//! Lista os repositórios de um usuário, monta um prompt por repositório
//! com descrição e linguagem, avalia via serviço de completion (com cache)
//! e retém o repositório de maior score.
//!
//! ## Exemplo
//!
//! ```rust,ignore
//! use repolens::pipeline::Pipeline;
//! use repolens::Config;
//!
//! let config = Config::load_or_default();
//! let mut pipeline = Pipeline::from_config(&config, config.credential()?)?;
//!
//! match pipeline.analyze("https://github.com/alice").await {
//!     Outcome::Best(result) => println!("{}: {}", result.repository.name, result.score),
//!     Outcome::NotFound => println!("Nenhum repositório avaliado"),
//! }
//! ```

mod engine;
mod evaluator;

pub use engine::{extract_username, retain_best, AnalysisReport, Pipeline, RunStats};
pub use evaluator::{complexity_score, ComplexityEvaluator};
