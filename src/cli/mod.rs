//! Interface de linha de comando do RepoLens.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RepoLens - encontra o repositório mais complexo de um usuário do GitHub.
#[derive(Parser, Debug)]
#[command(name = "repolens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "repolens.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analisa os repositórios de um usuário.
    Analyze {
        /// Nome de usuário ou URL do perfil (ex.: https://github.com/alice).
        user: String,

        /// Imprime o relatório em JSON.
        #[arg(long)]
        json: bool,
    },

    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Diagnostica problemas de configuração.
    Doctor,

    /// Mostra versão.
    Version,
}
