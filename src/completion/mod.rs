//! Backends de completion usados para avaliar a complexidade.

mod base;
mod openai;

pub use base::{CompletionBackend, GenerationConfig};
pub use openai::OpenAiCompletion;
