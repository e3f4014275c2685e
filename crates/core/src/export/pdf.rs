//! PDF export by capturing the rendered report view.
//!
//! Unlike the DOCX export this does not walk the document model: it lays out
//! whatever [`ReportView::render`] currently shows, so collapsed sections
//! appear as bare headers.

use std::path::{Path, PathBuf};

use genpdf::{
    Document, Element, PaperSize, SimplePageDecorator,
    elements::{Break, OrderedList, Paragraph, UnorderedList},
    fonts::{FontData, FontFamily},
    style::{Style, StyledString},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ResumoError},
    export::download::save_as,
    view::{Block, RenderedSection, ReportHeader, ReportView},
};

/// Font families tried, in order, when none is configured.
const FONT_SEARCH_PATH: &[(&str, &str)] = &[
    ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
    ("/usr/share/fonts/liberation", "LiberationSans"),
    ("/usr/share/fonts/liberation-sans", "LiberationSans"),
    ("/usr/share/fonts/truetype/dejavu", "DejaVuSans"),
    ("/usr/share/fonts/dejavu", "DejaVuSans"),
    ("/usr/share/fonts/TTF", "DejaVuSans"),
    ("/usr/local/share/fonts", "LiberationSans"),
    ("/Library/Fonts", "LiberationSans"),
    ("C:\\Windows\\Fonts", "LiberationSans"),
];

// File name suffixes accepted for each face, first match wins.
const REGULAR: &[&str] = &["-Regular", ""];
const BOLD: &[&str] = &["-Bold"];
const ITALIC: &[&str] = &["-Italic", "-Oblique"];
const BOLD_ITALIC: &[&str] = &["-BoldItalic", "-BoldOblique"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    /// Directory holding `<family>-Regular.ttf`, `-Bold.ttf`, `-Italic.ttf`
    /// and `-BoldItalic.ttf`.
    pub font_dir: Option<PathBuf>,
    pub font_family: Option<String>,
    pub margin_mm: i32,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            font_dir: None,
            font_family: None,
            margin_mm: 10,
        }
    }
}

/// Snapshot of the report view at the moment of export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub header: ReportHeader,
    pub sections: Vec<RenderedSection>,
}

pub fn capture(view: Option<&ReportView>) -> Option<PageLayout> {
    let view = view?;
    Some(PageLayout {
        header: view.header(),
        sections: view.render(),
    })
}

fn load_face(dir: &Path, family: &str, suffixes: &[&str]) -> Option<FontData> {
    suffixes.iter().find_map(|suffix| {
        let path = dir.join(format!("{}{}.ttf", family, suffix));
        let bytes = std::fs::read(&path).ok()?;
        match FontData::new(bytes, None) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::debug!(path = %path.display(), "unreadable font file: {e}");
                None
            }
        }
    })
}

/// Load all four faces of `family` from `dir`.
fn load_family_from(dir: &Path, family: &str) -> Option<FontFamily<FontData>> {
    Some(FontFamily {
        regular: load_face(dir, family, REGULAR)?,
        bold: load_face(dir, family, BOLD)?,
        italic: load_face(dir, family, ITALIC)?,
        bold_italic: load_face(dir, family, BOLD_ITALIC)?,
    })
}

fn load_font_family(settings: &PdfSettings) -> Result<FontFamily<FontData>> {
    let family = settings.font_family.as_deref().unwrap_or("LiberationSans");
    let mut searched = Vec::new();

    if let Some(dir) = &settings.font_dir {
        if let Some(fonts) = load_family_from(dir, family) {
            return Ok(fonts);
        }
        tracing::debug!(dir = %dir.display(), family, "configured font not usable");
        searched.push(format!("{}/{}", dir.display(), family));
    }

    for (dir, name) in FONT_SEARCH_PATH {
        if let Some(fonts) = load_family_from(Path::new(dir), name) {
            tracing::debug!(dir, family = name, "using system font");
            return Ok(fonts);
        }
        searched.push(format!("{}/{}", dir, name));
    }

    Err(ResumoError::FontNotFound {
        searched: searched.join(", "),
    })
}

fn labeled(label: &str, value: &str, label_style: Style) -> Paragraph {
    let mut paragraph = Paragraph::default();
    paragraph.push_styled(format!("{}: ", label), label_style);
    paragraph.push(value.to_string());
    paragraph
}

fn push_block(doc: &mut Document, block: &Block) {
    match block {
        Block::Heading(text) => {
            doc.push(Break::new(0.5));
            doc.push(Paragraph::new(StyledString::new(
                text.clone(),
                Style::new().bold().with_font_size(12),
            )));
        }
        Block::Paragraph(text) => doc.push(Paragraph::new(text.clone())),
        Block::Field { label, value } => doc.push(labeled(label, value, Style::new().bold())),
        Block::Callout { label, text, .. } => {
            doc.push(labeled(label, text, Style::new().bold().italic()));
        }
        Block::List {
            label,
            ordered,
            items,
        } => {
            doc.push(Paragraph::new(StyledString::new(
                format!("{}:", label),
                Style::new().bold(),
            )));
            if *ordered {
                let mut list = OrderedList::new();
                for item in items {
                    list.push(Paragraph::new(item.clone()));
                }
                doc.push(list);
            } else {
                let mut list = UnorderedList::new();
                for item in items {
                    list.push(Paragraph::new(item.clone()));
                }
                doc.push(list);
            }
        }
    }
}

/// Lay out a captured view on A4 portrait pages.
pub fn render_pdf(layout: &PageLayout, settings: &PdfSettings) -> Result<Vec<u8>> {
    let fonts = load_font_family(settings)?;

    let mut doc = Document::new(fonts);
    doc.set_title(layout.header.title.clone());
    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(10);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(settings.margin_mm);
    doc.set_page_decorator(decorator);

    doc.push(Paragraph::new(StyledString::new(
        layout.header.title.clone(),
        Style::new().bold().with_font_size(18),
    )));
    doc.push(Paragraph::new(layout.header.word_count.clone()).styled(Style::new().italic()));
    doc.push(Break::new(1));

    for section in &layout.sections {
        doc.push(Paragraph::new(StyledString::new(
            section.title.clone(),
            Style::new().bold().with_font_size(14),
        )));
        for block in &section.blocks {
            push_block(&mut doc, block);
        }
        doc.push(Break::new(1));
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer)?;
    Ok(buffer)
}

/// Capture `view` and save it as a PDF. No view means nothing to capture:
/// the export is skipped and `None` returned.
pub async fn export_pdf(
    view: Option<&ReportView>,
    settings: &PdfSettings,
    dir: &Path,
    file_name: &str,
) -> Result<Option<PathBuf>> {
    let Some(layout) = capture(view) else {
        tracing::debug!("no rendered report to capture, skipping PDF export");
        return Ok(None);
    };

    let settings = settings.clone();
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&layout, &settings)).await??;
    Ok(Some(save_as(dir, file_name, &bytes).await?))
}
