use crate::types::AnalysisDocument;

pub const TIP_MARKER: &str = "💡";
pub const FIELD_MARKER: &str = "📍";
pub const EXAMPLE_MARKER: &str = "➤";
pub const BULLET_MARKER: &str = "•";

/// Literal section header line, e.g. `=== RESUMO EXECUTIVO ===`
pub fn section_header(name: &str) -> String {
    format!("=== {} ===", name)
}

/// Format an analysis document as plain text.
///
/// This is the only text rendering of a report: the text export and the
/// "copy full report" action both call it.
pub fn format_report_text(doc: &AnalysisDocument) -> String {
    let mut output = String::new();

    // Executive summary
    output.push_str(&format!("{}\n\n", section_header("RESUMO EXECUTIVO")));
    output.push_str(&format!("{}\n\n", doc.executive_summary));

    // Key concepts
    output.push_str(&format!("{}\n\n", section_header("CONCEITOS CHAVE")));
    for concept in &doc.key_concepts {
        output.push_str(&format!("{}\n", concept.title));
        output.push_str(&format!("{}\n", concept.description));
        output.push_str(&format!("Importância: {}\n", concept.importance));
        output.push_str(&format!("Dificuldade: {}\n", concept.difficulty));
        output.push_str(&format!("Exemplo:\n{}\n\n", concept.example));
        if let Some(tip) = &concept.tip {
            output.push_str(&format!("{} Dica: {}\n\n", TIP_MARKER, tip));
        }
    }

    // Main points
    output.push_str(&format!("{}\n\n", section_header("PONTOS PRINCIPAIS")));
    for point in &doc.main_points {
        output.push_str(&format!("{}\n", point.title));
        output.push_str(&format!("{}\n", point.description));
        output.push_str(&format!("{} Contexto: {}\n", FIELD_MARKER, point.context));
        output.push_str(&format!(
            "{} Aplicação: {}\n",
            FIELD_MARKER, point.application
        ));
        output.push_str(&format!(
            "{} Técnica de Memória: {}\n\n",
            FIELD_MARKER, point.memory_technique
        ));
    }

    // Important contexts, headed by the document's own title
    let ctx = &doc.important_contexts;
    output.push_str(&format!(
        "{}\n\n",
        section_header(&ctx.title.to_uppercase())
    ));
    output.push_str(&format!("{}\n", ctx.description));
    output.push_str(&format!("Relevância: {}\n", ctx.relevance));
    output.push_str("Exemplos:\n");
    for example in &ctx.examples {
        output.push_str(&format!("{} {}\n", EXAMPLE_MARKER, example));
    }
    output.push('\n');

    // Learning structure
    let learning = &doc.learning_structure;
    output.push_str(&format!(
        "{}\n\n",
        section_header("ESTRUTURA DE APRENDIZADO")
    ));
    output.push_str("Pré-requisitos:\n");
    for prereq in &learning.prerequisites {
        output.push_str(&format!("{} {}\n", BULLET_MARKER, prereq));
    }
    output.push('\n');
    output.push_str("Sequência de Aprendizado:\n");
    for (i, step) in learning.learning_sequence.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, step));
    }
    output.push('\n');

    // Study techniques
    output.push_str(&format!("{}\n\n", section_header("TÉCNICAS DE ESTUDO")));
    for tech in &doc.study_techniques {
        output.push_str(&format!("{}\n", tech.name));
        output.push_str(&format!(
            "{} Quando usar: {}\n",
            FIELD_MARKER, tech.when_to_use
        ));
        output.push_str(&format!(
            "{} Eficácia: {}\n\n",
            FIELD_MARKER, tech.effectiveness
        ));
    }

    // Study questions
    output.push_str(&format!("{}\n\n", section_header("PERGUNTAS DE ESTUDO")));
    for q in &doc.study_questions {
        output.push_str(&format!("{}\n", q.question));
        output.push_str(&format!("Resposta:\n{}\n", q.answer));
        output.push_str(&format!("{} Nível: {}\n", FIELD_MARKER, q.level));
        if let Some(tip) = &q.tip {
            output.push_str(&format!("{} Dica: {}\n", TIP_MARKER, tip));
        }
        output.push('\n');
    }

    // Metadata
    let meta = &doc.metadata;
    output.push_str(&format!(
        "{}\n\n",
        section_header("INFORMAÇÕES DAS NOTAS")
    ));
    output.push_str(&format!("Data: {}\n", meta.date));
    output.push_str(&format!("Palavras: {}\n", meta.word_count));
    output.push_str(&format!("Segmentos: {}\n", meta.segments));
    output.push_str(&format!("Fonte: {}\n", meta.source));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_document;

    fn header_positions(text: &str) -> Vec<usize> {
        [
            "=== RESUMO EXECUTIVO ===",
            "=== CONCEITOS CHAVE ===",
            "=== PONTOS PRINCIPAIS ===",
            "=== STARTUPS ===",
            "=== ESTRUTURA DE APRENDIZADO ===",
            "=== TÉCNICAS DE ESTUDO ===",
            "=== PERGUNTAS DE ESTUDO ===",
            "=== INFORMAÇÕES DAS NOTAS ===",
        ]
        .iter()
        .map(|h| text.find(h).unwrap_or_else(|| panic!("missing header {h}")))
        .collect()
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let text = format_report_text(&sample_document("19/10/2026"));
        let positions = header_positions(&text);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn contexts_header_comes_from_document_title() {
        let mut doc = sample_document("19/10/2026");
        doc.important_contexts.title = "Mercado de capitais".into();
        let text = format_report_text(&doc);
        assert!(text.contains("=== MERCADO DE CAPITAIS ===\n"));
        assert!(!text.contains("=== STARTUPS ==="));
    }

    #[test]
    fn empty_concepts_keep_header_without_body() {
        let mut doc = sample_document("19/10/2026");
        doc.key_concepts.clear();
        let text = format_report_text(&doc);
        assert!(text.contains("=== CONCEITOS CHAVE ===\n\n=== PONTOS PRINCIPAIS ==="));
    }

    #[test]
    fn learning_structure_uses_bullets_then_numbers() {
        let text = format_report_text(&sample_document("19/10/2026"));
        assert!(text.contains("Pré-requisitos:\n• Conhecimento básico de startups\n"));
        assert!(text.contains(
            "Sequência de Aprendizado:\n1. Entenda o conceito de fazer coisas que não escalam\n2. "
        ));
    }

    #[test]
    fn examples_are_one_line_each() {
        let text = format_report_text(&sample_document("19/10/2026"));
        assert!(text.contains("Exemplos:\n➤ Airbnb\n➤ Brex\n\n"));
    }

    #[test]
    fn metadata_block_closes_the_report() {
        let text = format_report_text(&sample_document("19/10/2026"));
        assert!(text.ends_with(
            "Data: 19/10/2026\nPalavras: 4702\nSegmentos: 30\nFonte: OpenAI\n"
        ));
    }
}
