//! Property-based tests for the report model, text rendering and toggles.

use std::sync::Arc;

use proptest::prelude::*;

use resumo_core::export::json::{from_json, to_json};
use resumo_core::{
    AnalysisDocument, ImportantContexts, KeyConcept, LearningStructure, MainPoint, Metadata,
    ReportView, SectionKey, SectionToggles, StudyQuestion, StudyTechnique, format_report_text,
};

/// Printable text of any script, plus a class heavy in characters that need
/// escaping or break lines.
fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,24}",
        "[a-zA-Zçãéô0-9 &<>\"'\\\\\n\t]{0,24}",
    ]
}

fn key_concept() -> impl Strategy<Value = KeyConcept> {
    (text(), text(), text(), text(), text(), prop::option::of(text())).prop_map(
        |(title, description, importance, difficulty, example, tip)| KeyConcept {
            title,
            description,
            importance,
            difficulty,
            example,
            tip,
        },
    )
}

fn main_point() -> impl Strategy<Value = MainPoint> {
    (text(), text(), text(), text(), text()).prop_map(
        |(title, description, context, application, memory_technique)| MainPoint {
            title,
            description,
            context,
            application,
            memory_technique,
        },
    )
}

fn study_question() -> impl Strategy<Value = StudyQuestion> {
    (text(), text(), text(), prop::option::of(text())).prop_map(
        |(question, answer, level, tip)| StudyQuestion {
            question,
            answer,
            level,
            tip,
        },
    )
}

fn document() -> impl Strategy<Value = AnalysisDocument> {
    (
        text(),
        prop::collection::vec(key_concept(), 0..4),
        prop::collection::vec(main_point(), 0..4),
        (text(), text(), text(), prop::collection::vec(text(), 0..4)),
        (
            prop::collection::vec(text(), 0..4),
            prop::collection::vec(text(), 0..4),
        ),
        prop::collection::vec((text(), text(), text()), 0..3),
        prop::collection::vec(study_question(), 0..4),
        (text(), any::<u32>(), any::<u16>()),
    )
        .prop_map(
            |(summary, concepts, points, ctx, learning, techniques, questions, meta)| {
                AnalysisDocument {
                    executive_summary: summary,
                    key_concepts: concepts,
                    main_points: points,
                    important_contexts: ImportantContexts {
                        title: ctx.0,
                        description: ctx.1,
                        relevance: ctx.2,
                        examples: ctx.3,
                    },
                    learning_structure: LearningStructure {
                        prerequisites: learning.0,
                        learning_sequence: learning.1,
                    },
                    study_techniques: techniques
                        .into_iter()
                        .map(|(name, when_to_use, effectiveness)| StudyTechnique {
                            name,
                            when_to_use,
                            effectiveness,
                        })
                        .collect(),
                    study_questions: questions,
                    metadata: Metadata {
                        date: meta.0,
                        word_count: u64::from(meta.1),
                        segments: u64::from(meta.2),
                        source: "OpenAI".into(),
                    },
                }
            },
        )
}

proptest! {
    #[test]
    fn json_export_reloads_to_the_same_document(doc in document()) {
        let json = to_json(&doc).unwrap();
        let reloaded = from_json(&json).unwrap();
        prop_assert_eq!(&reloaded, &doc);
        prop_assert_eq!(to_json(&reloaded).unwrap(), json);
    }

    #[test]
    fn one_tip_line_per_present_tip(doc in document()) {
        let expected = doc.key_concepts.iter().filter(|c| c.tip.is_some()).count()
            + doc.study_questions.iter().filter(|q| q.tip.is_some()).count();
        let text = format_report_text(&doc);
        prop_assert_eq!(text.matches("💡 Dica:").count(), expected);
    }

    #[test]
    fn each_concept_has_its_own_tip_line(doc in document()) {
        let text = format_report_text(&doc);
        let intro = format!(
            "=== RESUMO EXECUTIVO ===\n\n{}\n\n=== CONCEITOS CHAVE ===\n\n",
            doc.executive_summary
        );
        prop_assert!(text.starts_with(&intro));

        let mut rest = &text[intro.len()..];
        for concept in &doc.key_concepts {
            let body = format!(
                "{}\n{}\nImportância: {}\nDificuldade: {}\nExemplo:\n{}\n\n",
                concept.title,
                concept.description,
                concept.importance,
                concept.difficulty,
                concept.example
            );
            prop_assert!(rest.starts_with(&body), "concept {:?} out of place", concept.title);
            rest = &rest[body.len()..];

            match &concept.tip {
                Some(tip) => {
                    let line = format!("💡 Dica: {}\n\n", tip);
                    prop_assert!(rest.starts_with(&line));
                    rest = &rest[line.len()..];
                }
                None => prop_assert!(!rest.starts_with("💡 Dica:")),
            }
        }
        prop_assert!(rest.starts_with("=== PONTOS PRINCIPAIS ==="));
    }

    #[test]
    fn text_sections_keep_their_order(doc in document()) {
        let text = format_report_text(&doc);
        let contexts = format!("=== {} ===", doc.important_contexts.title.to_uppercase());
        let headers = [
            "=== RESUMO EXECUTIVO ===",
            "=== CONCEITOS CHAVE ===",
            "=== PONTOS PRINCIPAIS ===",
            contexts.as_str(),
            "=== ESTRUTURA DE APRENDIZADO ===",
            "=== TÉCNICAS DE ESTUDO ===",
            "=== PERGUNTAS DE ESTUDO ===",
            "=== INFORMAÇÕES DAS NOTAS ===",
        ];
        let mut from = 0;
        for header in headers {
            let found = text[from..].find(header);
            prop_assert!(found.is_some(), "missing {}", header);
            from += found.unwrap_or(0) + header.len();
        }
    }

    #[test]
    fn numbered_sequence_matches_item_count(doc in document()) {
        let text = format_report_text(&doc);
        let n = doc.learning_structure.learning_sequence.len();
        for i in 1..=n {
            let prefix = format!("\n{}. ", i);
            prop_assert!(text.contains(&prefix));
        }
    }

    #[test]
    fn toggles_follow_parity(keys in prop::collection::vec(0usize..6, 0..32)) {
        let mut toggles = SectionToggles::default();
        for k in &keys {
            toggles.toggle(SectionKey::ALL[*k]);
        }
        for (i, key) in SectionKey::ALL.into_iter().enumerate() {
            let flips = keys.iter().filter(|k| **k == i).count();
            prop_assert_eq!(toggles.is_open(key), flips % 2 == 0);
        }
    }

    #[test]
    fn copy_ignores_collapsed_sections(
        doc in document(),
        keys in prop::collection::vec(0usize..6, 0..8),
    ) {
        let mut view = ReportView::new(Arc::new(doc.clone()));
        for k in &keys {
            view.toggles_mut().toggle(SectionKey::ALL[*k]);
        }
        let mut clipboard = resumo_core::MemoryClipboard::default();
        view.copy_report(&mut clipboard, std::time::Instant::now());
        let expected = format_report_text(&doc);
        prop_assert_eq!(clipboard.contents(), Some(expected.as_str()));
        prop_assert_eq!(view.render().len(), 8);
    }
}
