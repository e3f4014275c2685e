//! Interactive projection of an [`AnalysisDocument`].
//!
//! A [`ReportView`] turns the document into eight sections of display blocks
//! and keeps the per-section open/closed state plus the "copied"
//! acknowledgement of the copy action. Frontends draw the blocks; the PDF
//! export captures them.

use std::{
    fmt,
    str::FromStr,
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    clipboard::Clipboard,
    format::format_report_text,
    types::{AnalysisDocument, split_paragraphs},
};

pub const REPORT_TITLE: &str = "Relatório de Análise";

/// How long the copy action reports "copied" before reverting.
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(2000);

/// The six sections a reader can collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    KeyConcepts,
    MainPoints,
    ImportantContexts,
    LearningStructure,
    StudyTechniques,
    StudyQuestions,
}

impl SectionKey {
    pub const ALL: [SectionKey; 6] = [
        SectionKey::KeyConcepts,
        SectionKey::MainPoints,
        SectionKey::ImportantContexts,
        SectionKey::LearningStructure,
        SectionKey::StudyTechniques,
        SectionKey::StudyQuestions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::KeyConcepts => "keyConcepts",
            SectionKey::MainPoints => "mainPoints",
            SectionKey::ImportantContexts => "importantContexts",
            SectionKey::LearningStructure => "learningStructure",
            SectionKey::StudyTechniques => "studyTechniques",
            SectionKey::StudyQuestions => "studyQuestions",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("seção desconhecida do relatório: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for SectionKey {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// All eight report sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    ExecutiveSummary,
    Collapsible(SectionKey),
    Metadata,
}

impl Section {
    pub const ORDER: [Section; 8] = [
        Section::ExecutiveSummary,
        Section::Collapsible(SectionKey::KeyConcepts),
        Section::Collapsible(SectionKey::MainPoints),
        Section::Collapsible(SectionKey::ImportantContexts),
        Section::Collapsible(SectionKey::LearningStructure),
        Section::Collapsible(SectionKey::StudyTechniques),
        Section::Collapsible(SectionKey::StudyQuestions),
        Section::Metadata,
    ];

    pub fn key(&self) -> Option<SectionKey> {
        match self {
            Section::Collapsible(key) => Some(*key),
            Section::ExecutiveSummary | Section::Metadata => None,
        }
    }

    /// Display title. The important-contexts section is titled by the document.
    pub fn title(&self, doc: &AnalysisDocument) -> String {
        match self {
            Section::ExecutiveSummary => "Resumo Executivo".into(),
            Section::Collapsible(SectionKey::KeyConcepts) => "Conceitos Chave".into(),
            Section::Collapsible(SectionKey::MainPoints) => "Pontos Principais".into(),
            Section::Collapsible(SectionKey::ImportantContexts) => {
                doc.important_contexts.title.clone()
            }
            Section::Collapsible(SectionKey::LearningStructure) => {
                "Estrutura de Aprendizado".into()
            }
            Section::Collapsible(SectionKey::StudyTechniques) => "Técnicas de Estudo".into(),
            Section::Collapsible(SectionKey::StudyQuestions) => "Perguntas de Estudo".into(),
            Section::Metadata => "Informações das Notas".into(),
        }
    }
}

/// Open/closed state of the collapsible sections. Everything starts open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionToggles {
    key_concepts: bool,
    main_points: bool,
    important_contexts: bool,
    learning_structure: bool,
    study_techniques: bool,
    study_questions: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            key_concepts: true,
            main_points: true,
            important_contexts: true,
            learning_structure: true,
            study_techniques: true,
            study_questions: true,
        }
    }
}

impl SectionToggles {
    fn slot(&mut self, key: SectionKey) -> &mut bool {
        match key {
            SectionKey::KeyConcepts => &mut self.key_concepts,
            SectionKey::MainPoints => &mut self.main_points,
            SectionKey::ImportantContexts => &mut self.important_contexts,
            SectionKey::LearningStructure => &mut self.learning_structure,
            SectionKey::StudyTechniques => &mut self.study_techniques,
            SectionKey::StudyQuestions => &mut self.study_questions,
        }
    }

    pub fn is_open(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::KeyConcepts => self.key_concepts,
            SectionKey::MainPoints => self.main_points,
            SectionKey::ImportantContexts => self.important_contexts,
            SectionKey::LearningStructure => self.learning_structure,
            SectionKey::StudyTechniques => self.study_techniques,
            SectionKey::StudyQuestions => self.study_questions,
        }
    }

    pub fn set_open(&mut self, key: SectionKey, open: bool) {
        *self.slot(key) = open;
    }

    pub fn toggle(&mut self, key: SectionKey) {
        let slot = self.slot(key);
        *slot = !*slot;
    }

    /// Toggle by wire name (`"keyConcepts"`, ...). Unknown names change nothing.
    pub fn toggle_named(&mut self, name: &str) -> bool {
        match name.parse::<SectionKey>() {
            Ok(key) => {
                self.toggle(key);
                true
            }
            Err(e) => {
                tracing::debug!("ignoring toggle: {e}");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Example,
    Tip,
    MemoryTechnique,
}

/// One display element inside a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Item title inside a section (a concept, a question, ...).
    Heading(String),
    Paragraph(String),
    Field {
        label: String,
        value: String,
    },
    Callout {
        kind: CalloutKind,
        label: String,
        text: String,
    },
    List {
        label: String,
        ordered: bool,
        items: Vec<String>,
    },
}

impl Block {
    fn field(label: &str, value: &str) -> Self {
        Block::Field {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    fn callout(kind: CalloutKind, label: &str, text: &str) -> Self {
        Block::Callout {
            kind,
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    fn list(label: &str, ordered: bool, items: &[String]) -> Self {
        Block::List {
            label: label.to_string(),
            ordered,
            items: items.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub section: Section,
    pub title: String,
    pub collapsible: bool,
    pub open: bool,
    /// Empty while the section is collapsed.
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub title: String,
    pub word_count: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAck {
    copied_at: Option<Instant>,
}

impl CopyAck {
    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_ACK_DURATION)
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.copied_at.map(|at| at + COPY_ACK_DURATION)
    }
}

#[derive(Debug, Clone)]
pub struct ReportView {
    document: Arc<AnalysisDocument>,
    toggles: SectionToggles,
    copy_ack: CopyAck,
}

impl ReportView {
    pub fn new(document: Arc<AnalysisDocument>) -> Self {
        Self {
            document,
            toggles: SectionToggles::default(),
            copy_ack: CopyAck::default(),
        }
    }

    pub fn document(&self) -> &AnalysisDocument {
        &self.document
    }

    pub fn shared_document(&self) -> Arc<AnalysisDocument> {
        Arc::clone(&self.document)
    }

    pub fn toggles(&self) -> &SectionToggles {
        &self.toggles
    }

    pub fn toggles_mut(&mut self) -> &mut SectionToggles {
        &mut self.toggles
    }

    pub fn header(&self) -> ReportHeader {
        ReportHeader {
            title: REPORT_TITLE.to_string(),
            word_count: format!("{} palavras", self.document.metadata.word_count),
        }
    }

    pub fn render(&self) -> Vec<RenderedSection> {
        Section::ORDER
            .iter()
            .map(|section| self.render_section(*section))
            .collect()
    }

    pub fn render_section(&self, section: Section) -> RenderedSection {
        let open = section.key().is_none_or(|key| self.toggles.is_open(key));
        let blocks = if open {
            section_blocks(&self.document, section)
        } else {
            Vec::new()
        };

        RenderedSection {
            section,
            title: section.title(&self.document),
            collapsible: section.key().is_some(),
            open,
            blocks,
        }
    }

    /// Copy the full plain-text report. Failures are logged, not surfaced.
    pub fn copy_report(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> bool {
        let text = format_report_text(&self.document);
        match clipboard.set_text(&text) {
            Ok(()) => {
                self.copy_ack.mark(now);
                true
            }
            Err(e) => {
                tracing::warn!("copy to clipboard failed: {e}");
                false
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copy_ack.is_active(now)
    }

    pub fn copy_ack(&self) -> &CopyAck {
        &self.copy_ack
    }
}

fn section_blocks(doc: &AnalysisDocument, section: Section) -> Vec<Block> {
    let mut blocks = Vec::new();

    match section {
        Section::ExecutiveSummary => {
            blocks.extend(
                split_paragraphs(&doc.executive_summary)
                    .map(|p| Block::Paragraph(p.to_string())),
            );
        }
        Section::Collapsible(SectionKey::KeyConcepts) => {
            for concept in &doc.key_concepts {
                blocks.push(Block::Heading(concept.title.clone()));
                blocks.push(Block::Paragraph(concept.description.clone()));
                blocks.push(Block::field("Importância", &concept.importance));
                blocks.push(Block::field("Dificuldade", &concept.difficulty));
                if !concept.example.is_empty() {
                    blocks.push(Block::callout(
                        CalloutKind::Example,
                        "Exemplo",
                        &concept.example,
                    ));
                }
                if let Some(tip) = &concept.tip {
                    blocks.push(Block::callout(CalloutKind::Tip, "Dica", tip));
                }
            }
        }
        Section::Collapsible(SectionKey::MainPoints) => {
            for point in &doc.main_points {
                blocks.push(Block::Heading(point.title.clone()));
                blocks.push(Block::Paragraph(point.description.clone()));
                blocks.push(Block::field("Contexto", &point.context));
                blocks.push(Block::field("Aplicação", &point.application));
                if !point.memory_technique.is_empty() {
                    blocks.push(Block::callout(
                        CalloutKind::MemoryTechnique,
                        "Técnica de Memória",
                        &point.memory_technique,
                    ));
                }
            }
        }
        Section::Collapsible(SectionKey::ImportantContexts) => {
            let ctx = &doc.important_contexts;
            blocks.push(Block::Paragraph(ctx.description.clone()));
            blocks.push(Block::field("Relevância", &ctx.relevance));
            blocks.push(Block::list("Exemplos", false, &ctx.examples));
        }
        Section::Collapsible(SectionKey::LearningStructure) => {
            let learning = &doc.learning_structure;
            blocks.push(Block::list("Pré-requisitos", false, &learning.prerequisites));
            blocks.push(Block::list(
                "Sequência de Aprendizado",
                true,
                &learning.learning_sequence,
            ));
        }
        Section::Collapsible(SectionKey::StudyTechniques) => {
            for tech in &doc.study_techniques {
                blocks.push(Block::Heading(tech.name.clone()));
                blocks.push(Block::field("Quando usar", &tech.when_to_use));
                blocks.push(Block::field("Eficácia", &tech.effectiveness));
            }
        }
        Section::Collapsible(SectionKey::StudyQuestions) => {
            for q in &doc.study_questions {
                blocks.push(Block::Heading(q.question.clone()));
                blocks.push(Block::field("Resposta", &q.answer));
                blocks.push(Block::field("Nível", &q.level));
                if let Some(tip) = &q.tip {
                    blocks.push(Block::callout(CalloutKind::Tip, "Dica", tip));
                }
            }
        }
        Section::Metadata => {
            let meta = &doc.metadata;
            blocks.push(Block::field("Data", &meta.date));
            blocks.push(Block::field("Palavras", &meta.word_count.to_string()));
            blocks.push(Block::field("Segmentos", &meta.segments.to_string()));
            blocks.push(Block::field("Fonte", &meta.source));
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clipboard::MemoryClipboard,
        error::{Result, ResumoError},
        sample::sample_document,
    };

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            Err(ResumoError::ClipboardFailed {
                reason: "permission denied".into(),
            })
        }
    }

    fn view() -> ReportView {
        ReportView::new(Arc::new(sample_document("19/10/2026")))
    }

    #[test]
    fn sections_render_in_fixed_order() {
        let titles: Vec<_> = view().render().into_iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Resumo Executivo",
                "Conceitos Chave",
                "Pontos Principais",
                "Startups",
                "Estrutura de Aprendizado",
                "Técnicas de Estudo",
                "Perguntas de Estudo",
                "Informações das Notas",
            ]
        );
    }

    #[test]
    fn summary_and_metadata_are_not_collapsible() {
        let rendered = view().render();
        assert!(!rendered[0].collapsible);
        assert!(!rendered[7].collapsible);
        assert!(rendered[1..7].iter().all(|s| s.collapsible && s.open));
    }

    #[test]
    fn toggling_twice_restores_and_leaves_others_alone() {
        for key in SectionKey::ALL {
            let mut toggles = SectionToggles::default();
            toggles.toggle(key);
            for other in SectionKey::ALL {
                assert_eq!(toggles.is_open(other), other != key);
            }
            toggles.toggle(key);
            assert_eq!(toggles, SectionToggles::default());
        }
    }

    #[test]
    fn unknown_toggle_name_is_a_no_op() {
        let mut toggles = SectionToggles::default();
        assert!(!toggles.toggle_named("transcript"));
        assert!(!toggles.toggle_named("metadata"));
        assert_eq!(toggles, SectionToggles::default());

        assert!(toggles.toggle_named("studyQuestions"));
        assert!(!toggles.is_open(SectionKey::StudyQuestions));
    }

    #[test]
    fn collapsed_section_keeps_header_only() {
        let mut view = view();
        view.toggles_mut().toggle(SectionKey::MainPoints);
        let section = view.render_section(Section::Collapsible(SectionKey::MainPoints));
        assert!(!section.open);
        assert!(section.blocks.is_empty());
        assert_eq!(section.title, "Pontos Principais");
    }

    #[test]
    fn summary_line_breaks_become_paragraphs() {
        let mut doc = sample_document("19/10/2026");
        doc.executive_summary = "Primeiro.\nSegundo.".into();
        let view = ReportView::new(Arc::new(doc));
        let section = view.render_section(Section::ExecutiveSummary);
        assert_eq!(
            section.blocks,
            vec![
                Block::Paragraph("Primeiro.".into()),
                Block::Paragraph("Segundo.".into()),
            ]
        );
    }

    #[test]
    fn absent_tip_renders_no_callout() {
        let mut doc = sample_document("19/10/2026");
        doc.study_questions[0].tip = None;
        let view = ReportView::new(Arc::new(doc));
        let section = view.render_section(Section::Collapsible(SectionKey::StudyQuestions));
        let tips = section
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Callout { kind: CalloutKind::Tip, .. }))
            .count();
        assert_eq!(tips, 1);
    }

    #[test]
    fn copy_matches_text_export_and_acknowledges_for_two_seconds() {
        let mut view = view();
        let mut clipboard = MemoryClipboard::default();
        let t0 = Instant::now();

        assert!(view.copy_report(&mut clipboard, t0));
        assert_eq!(
            clipboard.contents(),
            Some(format_report_text(view.document()).as_str())
        );
        assert!(view.is_copied(t0));
        assert!(view.is_copied(t0 + Duration::from_millis(1999)));
        assert!(!view.is_copied(t0 + COPY_ACK_DURATION));
    }

    #[test]
    fn denied_clipboard_leaves_ack_unset() {
        let mut view = view();
        let now = Instant::now();
        assert!(!view.copy_report(&mut DeniedClipboard, now));
        assert!(!view.is_copied(now));
    }

    #[test]
    fn header_shows_word_count() {
        assert_eq!(view().header().word_count, "4702 palavras");
    }
}
