//! Terminal rendering of a [`ReportView`].

use console::style;
use resumo_core::{Block, CalloutKind, ReportView, view::RenderedSection};

fn callout_marker(kind: CalloutKind) -> &'static str {
    match kind {
        CalloutKind::Example => "➤",
        CalloutKind::Tip => "💡",
        CalloutKind::MemoryTechnique => "🧠",
    }
}

fn push_block(output: &mut String, block: &Block) {
    match block {
        Block::Heading(text) => {
            output.push_str(&format!("\n  {}\n", style(text).bold()));
        }
        Block::Paragraph(text) => {
            output.push_str(&format!("  {}\n", text));
        }
        Block::Field { label, value } => {
            output.push_str(&format!("  {} {}\n", style(format!("{}:", label)).bold(), value));
        }
        Block::Callout { kind, label, text } => {
            output.push_str(&format!(
                "  {} {} {}\n",
                callout_marker(*kind),
                style(format!("{}:", label)).yellow().bold(),
                style(text).italic()
            ));
        }
        Block::List {
            label,
            ordered,
            items,
        } => {
            output.push_str(&format!("  {}\n", style(format!("{}:", label)).bold()));
            for (i, item) in items.iter().enumerate() {
                if *ordered {
                    output.push_str(&format!("    {}. {}\n", i + 1, item));
                } else {
                    output.push_str(&format!("    • {}\n", item));
                }
            }
        }
    }
}

fn push_section(output: &mut String, section: &RenderedSection) {
    let marker = match (section.collapsible, section.open) {
        (false, _) => " ",
        (true, true) => "▾",
        (true, false) => "▸",
    };
    output.push_str(&format!(
        "\n{} {}\n",
        style(marker).dim(),
        style(&section.title).cyan().bold()
    ));
    for block in &section.blocks {
        push_block(output, block);
    }
}

/// Header line plus every section; collapsed sections show their title only.
pub fn render_report(view: &ReportView) -> String {
    let header = view.header();
    let mut output = format!(
        "{}  {}\n",
        style(&header.title).cyan().bold(),
        style(&header.word_count).dim()
    );
    output.push_str(&format!("{}\n", style("─".repeat(60)).dim()));

    for section in view.render() {
        push_section(&mut output, &section);
    }
    output
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use resumo_core::{SectionKey, sample::sample_document};

    use super::*;

    fn plain(view: &ReportView) -> String {
        console::strip_ansi_codes(&render_report(view)).into_owned()
    }

    #[test]
    fn header_and_all_section_titles_are_shown() {
        let view = ReportView::new(Arc::new(sample_document("19/10/2026")));
        let text = plain(&view);
        assert!(text.starts_with("Relatório de Análise  4702 palavras\n"));
        for title in ["Resumo Executivo", "Startups", "Informações das Notas"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.contains("    1. Entenda o conceito de fazer coisas que não escalam\n"));
        assert!(text.contains("💡 Dica: Pense no exemplo da Airbnb"));
    }

    #[test]
    fn collapsed_section_hides_its_body() {
        let mut view = ReportView::new(Arc::new(sample_document("19/10/2026")));
        view.toggles_mut().toggle(SectionKey::StudyQuestions);
        let text = plain(&view);
        assert!(text.contains("▸ Perguntas de Estudo\n"));
        assert!(!text.contains("Pense no exemplo da Airbnb"));
        assert!(text.contains("▾ Conceitos Chave\n"));
    }
}
