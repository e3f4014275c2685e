use serde::{Deserialize, Serialize};

/// A complete analysis report, as produced by an [`AnalysisProvider`].
///
/// Field order here is the field order of the JSON export.
///
/// [`AnalysisProvider`]: crate::provider::AnalysisProvider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub executive_summary: String,
    pub key_concepts: Vec<KeyConcept>,
    pub main_points: Vec<MainPoint>,
    pub important_contexts: ImportantContexts,
    pub learning_structure: LearningStructure,
    pub study_techniques: Vec<StudyTechnique>,
    pub study_questions: Vec<StudyQuestion>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyConcept {
    pub title: String,
    pub description: String,
    pub importance: String,
    pub difficulty: String,
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainPoint {
    pub title: String,
    pub description: String,
    pub context: String,
    pub application: String,
    pub memory_technique: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportantContexts {
    pub title: String,
    pub description: String,
    pub relevance: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStructure {
    pub prerequisites: Vec<String>,
    /// Strictly ordered; rendered as a 1-based numbered list.
    pub learning_sequence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTechnique {
    pub name: String,
    pub when_to_use: String,
    pub effectiveness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyQuestion {
    pub question: String,
    pub answer: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub date: String,
    pub word_count: u64,
    pub segments: u64,
    pub source: String,
}

/// Split free text into paragraphs on line breaks.
///
/// Shared by the report view and the DOCX export so both agree on where
/// paragraphs start. Blank lines do not produce empty paragraphs.
pub fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}
