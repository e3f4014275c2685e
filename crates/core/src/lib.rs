pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod provider;
pub mod sample;
pub mod session;
pub mod types;
pub mod view;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use config::{Config, load_config};
pub use error::{Result, ResumoError};
pub use export::{ExportFormat, Exporter, PdfSettings};
pub use format::format_report_text;
pub use provider::{AnalysisProvider, ProviderError, SampleProvider};
pub use session::{AnalysisRequest, AnalysisSession, SessionError};
pub use types::{
    AnalysisDocument, ImportantContexts, KeyConcept, LearningStructure, MainPoint, Metadata,
    StudyQuestion, StudyTechnique,
};
pub use view::{Block, CalloutKind, ReportView, Section, SectionKey, SectionToggles};
