//! Tipos de domínio do RepoLens: repositórios, entradas de conteúdo e resultados.

use serde::{Deserialize, Serialize};

/// Repositório retornado pela listagem de um usuário no forge.
///
/// Campos desconhecidos da API são ignorados.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Nome do repositório.
    pub name: String,

    /// Descrição livre.
    #[serde(default)]
    pub description: Option<String>,

    /// Linguagem principal detectada pelo forge.
    #[serde(default)]
    pub language: Option<String>,

    /// Template de URL para listar o conteúdo (ex.: `.../contents/{+path}`).
    pub contents_url: String,
}

impl Repository {
    /// Cria um repositório sem descrição nem linguagem.
    pub fn new(name: impl Into<String>, contents_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            language: None,
            contents_url: contents_url.into(),
        }
    }

    /// Define a descrição.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Define a linguagem.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Descrição e linguagem presentes e não vazias.
    pub fn has_metadata(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.description) && filled(&self.language)
    }
}

/// Tipo de uma entrada de conteúdo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Arquivo regular.
    File,
    /// Diretório.
    Dir,
    /// Symlink, submódulo ou qualquer outro tipo.
    #[serde(other)]
    Other,
}

/// Arquivo ou diretório de uma listagem de conteúdo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentEntry {
    /// Discriminador de tipo.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Nome da entrada.
    pub name: String,

    /// URL do conteúdo bruto (apenas arquivos).
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    /// Cria uma entrada de arquivo.
    pub fn file(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File,
            name: name.into(),
            download_url: Some(download_url.into()),
        }
    }

    /// Cria uma entrada de diretório.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Dir,
            name: name.into(),
            download_url: None,
        }
    }
}

/// Avaliação de complexidade de um repositório.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityResult {
    /// Repositório avaliado.
    pub repository: Repository,

    /// Texto retornado pelo serviço de completion.
    pub assessment: String,

    /// Score derivado do texto (tamanho em caracteres).
    pub score: usize,

    /// Momento da avaliação.
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}

impl ComplexityResult {
    /// Cria um resultado calculando o score a partir da avaliação.
    pub fn new(repository: Repository, assessment: impl Into<String>) -> Self {
        let assessment = assessment.into();
        let score = crate::pipeline::complexity_score(&assessment);
        Self {
            repository,
            assessment,
            score,
            evaluated_at: chrono::Utc::now(),
        }
    }
}

/// Resultado final de uma execução do pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Repositório mais complexo encontrado.
    Best(ComplexityResult),
    /// Nenhum repositório foi pontuado.
    NotFound,
}

impl Outcome {
    /// Retorna o melhor resultado, se houver.
    pub fn best(&self) -> Option<&ComplexityResult> {
        match self {
            Outcome::Best(result) => Some(result),
            Outcome::NotFound => None,
        }
    }

    /// Verifica se nenhum repositório foi pontuado.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound)
    }
}
