use std::path::PathBuf;

use thiserror::Error;

use crate::{provider::ProviderError, session::SessionError};

#[derive(Error, Debug)]
pub enum ResumoError {
    #[error("Falha ao exportar para {path}: {reason}")]
    ExportFailed { path: PathBuf, reason: String },

    #[error("Falha ao gerar o PDF: {0}")]
    PdfError(#[from] genpdf::error::Error),

    #[error("Nenhuma fonte utilizável para o PDF (procurado em: {searched})")]
    FontNotFound { searched: String },

    #[error("Erro ao escrever XML: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Erro ao empacotar o DOCX: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Área de transferência indisponível: {reason}")]
    ClipboardFailed { reason: String },

    #[error("Erro de E/S: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Erro ao ler JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuração inválida: {0}")]
    ConfigError(#[from] Box<figment::Error>),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Falha na tarefa em segundo plano: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ResumoError>;
