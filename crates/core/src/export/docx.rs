//! DOCX export: rebuilds the report from the document model as a
//! WordprocessingML package.
//!
//! Every section follows the same pattern: a level-2 heading, then a level-3
//! heading per item followed by labeled paragraphs.

use std::{
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    error::Result,
    export::download::save_as,
    types::{AnalysisDocument, split_paragraphs},
    view::{REPORT_TITLE, Section, SectionKey},
};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// One paragraph of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Para {
    Heading { level: u8, text: String },
    Body(String),
    Labeled { label: String, value: String },
    Bullet(String),
    Numbered { number: usize, text: String },
}

impl Para {
    fn heading(level: u8, text: &str) -> Self {
        Para::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn labeled(label: &str, value: &str) -> Self {
        Para::Labeled {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Walk the document in section order and produce the paragraphs to write.
pub fn build_paragraphs(doc: &AnalysisDocument) -> Vec<Para> {
    let mut paras = vec![Para::heading(1, REPORT_TITLE)];

    for section in Section::ORDER {
        paras.push(Para::heading(2, &section.title(doc)));

        match section {
            Section::ExecutiveSummary => {
                paras.extend(
                    split_paragraphs(&doc.executive_summary).map(|p| Para::Body(p.to_string())),
                );
            }
            Section::Collapsible(SectionKey::KeyConcepts) => {
                for concept in &doc.key_concepts {
                    paras.push(Para::heading(3, &concept.title));
                    paras.push(Para::Body(concept.description.clone()));
                    paras.push(Para::labeled("Importância", &concept.importance));
                    paras.push(Para::labeled("Dificuldade", &concept.difficulty));
                    paras.push(Para::labeled("Exemplo", &concept.example));
                    if let Some(tip) = &concept.tip {
                        paras.push(Para::labeled("Dica", tip));
                    }
                }
            }
            Section::Collapsible(SectionKey::MainPoints) => {
                for point in &doc.main_points {
                    paras.push(Para::heading(3, &point.title));
                    paras.push(Para::Body(point.description.clone()));
                    paras.push(Para::labeled("Contexto", &point.context));
                    paras.push(Para::labeled("Aplicação", &point.application));
                    paras.push(Para::labeled("Técnica de Memória", &point.memory_technique));
                }
            }
            Section::Collapsible(SectionKey::ImportantContexts) => {
                let ctx = &doc.important_contexts;
                paras.push(Para::Body(ctx.description.clone()));
                paras.push(Para::labeled("Relevância", &ctx.relevance));
                paras.push(Para::heading(3, "Exemplos"));
                paras.extend(ctx.examples.iter().cloned().map(Para::Bullet));
            }
            Section::Collapsible(SectionKey::LearningStructure) => {
                let learning = &doc.learning_structure;
                paras.push(Para::heading(3, "Pré-requisitos"));
                paras.extend(learning.prerequisites.iter().cloned().map(Para::Bullet));
                paras.push(Para::heading(3, "Sequência de Aprendizado"));
                paras.extend(
                    learning
                        .learning_sequence
                        .iter()
                        .enumerate()
                        .map(|(i, step)| Para::Numbered {
                            number: i + 1,
                            text: step.clone(),
                        }),
                );
            }
            Section::Collapsible(SectionKey::StudyTechniques) => {
                for tech in &doc.study_techniques {
                    paras.push(Para::heading(3, &tech.name));
                    paras.push(Para::labeled("Quando usar", &tech.when_to_use));
                    paras.push(Para::labeled("Eficácia", &tech.effectiveness));
                }
            }
            Section::Collapsible(SectionKey::StudyQuestions) => {
                for q in &doc.study_questions {
                    paras.push(Para::heading(3, &q.question));
                    paras.push(Para::labeled("Resposta", &q.answer));
                    paras.push(Para::labeled("Nível", &q.level));
                    if let Some(tip) = &q.tip {
                        paras.push(Para::labeled("Dica", tip));
                    }
                }
            }
            Section::Metadata => {
                let meta = &doc.metadata;
                paras.push(Para::labeled("Data", &meta.date));
                paras.push(Para::labeled("Palavras", &meta.word_count.to_string()));
                paras.push(Para::labeled("Segmentos", &meta.segments.to_string()));
                paras.push(Para::labeled("Fonte", &meta.source));
            }
        }
    }

    paras
}

fn write_empty<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

fn write_run<W: Write>(writer: &mut Writer<W>, text: &str, bold: bool) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    if bold {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        write_empty(writer, "w:b", &[])?;
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }
    let text = xml_safe(text);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            write_empty(writer, "w:br", &[])?;
        }
        let mut t = BytesStart::new("w:t");
        t.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(t))?;
        writer.write_event(Event::Text(BytesText::new(line)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Characters allowed in XML 1.0 content, with `\r\n` and lone `\r` folded
/// to `\n`.
fn xml_safe(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| {
            matches!(*c, '\t' | '\n' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
                || *c >= '\u{10000}'
        })
        .collect()
}

fn write_paragraph<W: Write>(
    writer: &mut Writer<W>,
    style: Option<&str>,
    runs: &[(&str, bool)],
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    if let Some(style) = style {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        write_empty(writer, "w:pStyle", &[("w:val", style)])?;
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }
    for (text, bold) in runs {
        write_run(writer, text, *bold)?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_para<W: Write>(writer: &mut Writer<W>, para: &Para) -> Result<()> {
    match para {
        Para::Heading { level, text } => {
            let style = format!("Heading{}", level);
            write_paragraph(writer, Some(&style), &[(text.as_str(), false)])
        }
        Para::Body(text) => write_paragraph(writer, None, &[(text.as_str(), false)]),
        Para::Labeled { label, value } => {
            let label = format!("{}: ", label);
            write_paragraph(writer, None, &[(label.as_str(), true), (value.as_str(), false)])
        }
        Para::Bullet(text) => {
            let text = format!("• {}", text);
            write_paragraph(writer, Some("ListParagraph"), &[(text.as_str(), false)])
        }
        Para::Numbered { number, text } => {
            let text = format!("{}. {}", number, text);
            write_paragraph(writer, Some("ListParagraph"), &[(text.as_str(), false)])
        }
    }
}

fn document_xml(paras: &[Para]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", W_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for para in paras {
        write_para(&mut writer, para)?;
    }

    // A4 portrait, 2.5 cm margins (twentieths of a point)
    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    write_empty(&mut writer, "w:pgSz", &[("w:w", "11906"), ("w:h", "16838")])?;
    write_empty(
        &mut writer,
        "w:pgMar",
        &[
            ("w:top", "1417"),
            ("w:right", "1417"),
            ("w:bottom", "1417"),
            ("w:left", "1417"),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner())
}

struct ParagraphStyle {
    id: &'static str,
    name: &'static str,
    size_half_points: &'static str,
    bold: bool,
    space_before: &'static str,
    space_after: &'static str,
}

const STYLES: &[ParagraphStyle] = &[
    ParagraphStyle {
        id: "Heading1",
        name: "heading 1",
        size_half_points: "36",
        bold: true,
        space_before: "0",
        space_after: "200",
    },
    ParagraphStyle {
        id: "Heading2",
        name: "heading 2",
        size_half_points: "30",
        bold: true,
        space_before: "240",
        space_after: "120",
    },
    ParagraphStyle {
        id: "Heading3",
        name: "heading 3",
        size_half_points: "26",
        bold: true,
        space_before: "200",
        space_after: "80",
    },
    ParagraphStyle {
        id: "ListParagraph",
        name: "List Paragraph",
        size_half_points: "22",
        bold: false,
        space_before: "0",
        space_after: "60",
    },
];

fn styles_xml() -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:styles");
    root.push_attribute(("xmlns:w", W_NS));
    writer.write_event(Event::Start(root))?;

    // Normal
    let mut normal = BytesStart::new("w:style");
    normal.push_attribute(("w:type", "paragraph"));
    normal.push_attribute(("w:default", "1"));
    normal.push_attribute(("w:styleId", "Normal"));
    writer.write_event(Event::Start(normal))?;
    write_empty(&mut writer, "w:name", &[("w:val", "Normal")])?;
    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    write_empty(&mut writer, "w:spacing", &[("w:after", "120")])?;
    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    write_empty(&mut writer, "w:sz", &[("w:val", "22")])?;
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    writer.write_event(Event::End(BytesEnd::new("w:style")))?;

    for style_def in STYLES {
        let mut style = BytesStart::new("w:style");
        style.push_attribute(("w:type", "paragraph"));
        style.push_attribute(("w:styleId", style_def.id));
        writer.write_event(Event::Start(style))?;
        write_empty(&mut writer, "w:name", &[("w:val", style_def.name)])?;
        write_empty(&mut writer, "w:basedOn", &[("w:val", "Normal")])?;
        write_empty(&mut writer, "w:next", &[("w:val", "Normal")])?;
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        if style_def.id == "ListParagraph" {
            write_empty(&mut writer, "w:ind", &[("w:left", "720")])?;
        } else {
            write_empty(&mut writer, "w:keepNext", &[])?;
        }
        write_empty(
            &mut writer,
            "w:spacing",
            &[("w:before", style_def.space_before), ("w:after", style_def.space_after)],
        )?;
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if style_def.bold {
            write_empty(&mut writer, "w:b", &[])?;
        }
        write_empty(&mut writer, "w:sz", &[("w:val", style_def.size_half_points)])?;
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        writer.write_event(Event::End(BytesEnd::new("w:style")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:styles")))?;
    Ok(writer.into_inner())
}

fn core_properties_xml() -> Result<Vec<u8>> {
    let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("cp:coreProperties");
    root.push_attribute((
        "xmlns:cp",
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
    ));
    root.push_attribute(("xmlns:dc", "http://purl.org/dc/elements/1.1/"));
    root.push_attribute(("xmlns:dcterms", "http://purl.org/dc/terms/"));
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("dc:title")))?;
    writer.write_event(Event::Text(BytesText::new(REPORT_TITLE)))?;
    writer.write_event(Event::End(BytesEnd::new("dc:title")))?;

    let mut created_elem = BytesStart::new("dcterms:created");
    created_elem.push_attribute(("xsi:type", "dcterms:W3CDTF"));
    writer.write_event(Event::Start(created_elem))?;
    writer.write_event(Event::Text(BytesText::new(&created)))?;
    writer.write_event(Event::End(BytesEnd::new("dcterms:created")))?;

    writer.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
    Ok(writer.into_inner())
}

/// Encode `doc` as the bytes of a `.docx` file.
pub fn encode_docx(doc: &AnalysisDocument) -> Result<Vec<u8>> {
    let paras = build_paragraphs(doc);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, Vec<u8>); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
        ("docProps/core.xml", core_properties_xml()?),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes().to_vec()),
        ("word/styles.xml", styles_xml()?),
        ("word/document.xml", document_xml(&paras)?),
    ];

    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Encode on a blocking thread, then save.
pub async fn export_docx(doc: &AnalysisDocument, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let doc = doc.clone();
    let bytes = tokio::task::spawn_blocking(move || encode_docx(&doc)).await??;
    save_as(dir, file_name, &bytes).await
}
