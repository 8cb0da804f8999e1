//! Montagem dos prompts de avaliação.

mod assembler;

pub use assembler::{Prompt, PromptAssembler};
