//! Montador de prompts de complexidade.
//!
//! O prompt de um repositório é um cabeçalho (nome, descrição, linguagem)
//! seguido de um bloco por arquivo-fonte, com o conteúdo em base64.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::types::config::PipelineConfig;
use crate::types::models::{ContentEntry, EntryKind, Repository};

/// Prompt completo de um repositório, materializado em memória.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Texto do prompt.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tamanho em bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Verifica se o prompt está vazio.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Montador de prompts.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    extensions: Vec<String>,
}

impl PromptAssembler {
    /// Cria um montador que aceita os sufixos informados.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Cria um montador a partir da configuração do TOML.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.extensions.iter().cloned())
    }

    /// Cabeçalho de três linhas do repositório.
    ///
    /// Campos ausentes saem vazios; o pipeline não chega aqui sem descrição e linguagem.
    pub fn build_header(&self, repository: &Repository) -> String {
        format!(
            "This is the repository: {}\nDescription: {}\nLanguage: {}\n\n",
            repository.name,
            repository.description.as_deref().unwrap_or_default(),
            repository.language.as_deref().unwrap_or_default(),
        )
    }

    /// Bloco de um arquivo: nome e conteúdo codificado em base64.
    pub fn build_file_block(&self, filename: &str, raw_content: &[u8]) -> String {
        format!("File: {}\nCode: {}\n\n", filename, STANDARD.encode(raw_content))
    }

    /// Verifica se a entrada é um arquivo-fonte aceito.
    pub fn is_source_file(&self, entry: &ContentEntry) -> bool {
        entry.kind == EntryKind::File
            && self
                .extensions
                .iter()
                .any(|ext| entry.name.ends_with(ext.as_str()))
    }

    /// Concatena cabeçalho e blocos, na ordem recebida.
    pub fn assemble<I, S>(&self, header: String, file_blocks: I) -> Prompt
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prompt = header;
        for block in file_blocks {
            prompt.push_str(block.as_ref());
        }
        Prompt(prompt)
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> Repository {
        Repository::new("repoA", "https://api/contents/{+path}")
            .with_description("x")
            .with_language("Python")
    }

    #[test]
    fn test_build_header() {
        let header = PromptAssembler::default().build_header(&repo());
        assert_eq!(
            header,
            "This is the repository: repoA\nDescription: x\nLanguage: Python\n\n"
        );
    }

    #[test]
    fn test_build_file_block_is_base64() {
        let block = PromptAssembler::default().build_file_block("a.py", b"print('hi')\n");
        assert_eq!(block, "File: a.py\nCode: cHJpbnQoJ2hpJykK\n\n");
    }

    #[test]
    fn test_file_block_is_ascii_for_unicode_content() {
        let block = PromptAssembler::default().build_file_block("ç.py", "# ação ✓".as_bytes());
        let code = block.lines().nth(1).unwrap();
        assert!(code.is_ascii());
    }

    #[test]
    fn test_is_source_file() {
        let assembler = PromptAssembler::default();

        assert!(assembler.is_source_file(&ContentEntry::file("a.py", "u")));
        assert!(assembler.is_source_file(&ContentEntry::file("nb.ipynb", "u")));
        assert!(assembler.is_source_file(&ContentEntry::file("stats.r", "u")));
        assert!(assembler.is_source_file(&ContentEntry::file("main.cpp", "u")));

        assert!(!assembler.is_source_file(&ContentEntry::file("README.md", "u")));
        assert!(!assembler.is_source_file(&ContentEntry::file("lib.rs", "u")));
        // Sufixo sensível a maiúsculas
        assert!(!assembler.is_source_file(&ContentEntry::file("script.R", "u")));
        // Diretório com nome de arquivo-fonte
        assert!(!assembler.is_source_file(&ContentEntry::dir("pkg.py")));
    }

    #[test]
    fn test_custom_extensions() {
        let assembler = PromptAssembler::new([".rs"]);
        assert!(assembler.is_source_file(&ContentEntry::file("lib.rs", "u")));
        assert!(!assembler.is_source_file(&ContentEntry::file("a.py", "u")));
    }

    #[test]
    fn test_assemble_keeps_order() {
        let assembler = PromptAssembler::default();
        let header = assembler.build_header(&repo());
        let blocks = vec![
            assembler.build_file_block("b.py", b"b"),
            assembler.build_file_block("a.py", b"a"),
        ];

        let prompt = assembler.assemble(header.clone(), &blocks);

        assert!(prompt.as_str().starts_with(&header));
        let b = prompt.as_str().find("File: b.py").unwrap();
        let a = prompt.as_str().find("File: a.py").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_assemble_header_only() {
        let assembler = PromptAssembler::default();
        let header = assembler.build_header(&repo());
        let prompt = assembler.assemble(header.clone(), Vec::<String>::new());
        assert_eq!(prompt.as_str(), header);
    }
}
