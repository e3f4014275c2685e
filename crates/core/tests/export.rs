use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use resumo_core::{
    Exporter, PdfSettings, ReportView, ResumoError, format_report_text,
    export::json::load_document,
    sample::sample_document,
};

fn exporter(dir: &TempDir) -> Exporter {
    Exporter::new(dir.path(), PdfSettings::default())
        .with_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
}

fn files_in(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn json_then_text_produces_two_files() {
    let dir = TempDir::new().unwrap();
    let exporter = exporter(&dir);
    let doc = sample_document("19/10/2026");

    let json = exporter.export("json", &doc, None).await.unwrap().unwrap();
    let text = exporter.export("text", &doc, None).await.unwrap().unwrap();

    assert_eq!(
        files_in(&dir),
        vec!["analise-2026-10-19.json", "analise-2026-10-19.txt"]
    );
    assert_eq!(load_document(&json).await.unwrap(), doc);
    assert_eq!(std::fs::read_to_string(&text).unwrap(), format_report_text(&doc));
}

#[tokio::test]
async fn unknown_tag_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let saved = exporter(&dir)
        .export("xlsx", &sample_document("19/10/2026"), None)
        .await
        .unwrap();
    assert!(saved.is_none());
    assert!(files_in(&dir).is_empty());
}

#[tokio::test]
async fn copied_text_equals_text_export() {
    let dir = TempDir::new().unwrap();
    let doc = sample_document("19/10/2026");
    let mut view = ReportView::new(Arc::new(doc.clone()));
    let mut clipboard = resumo_core::MemoryClipboard::default();
    view.copy_report(&mut clipboard, std::time::Instant::now());

    let path = exporter(&dir)
        .export("txt", &doc, Some(&view))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        clipboard.contents(),
        Some(std::fs::read_to_string(path).unwrap().as_str())
    );
}

#[tokio::test]
async fn docx_export_is_a_zip_package() {
    let dir = TempDir::new().unwrap();
    let path = exporter(&dir)
        .export("docx", &sample_document("19/10/2026"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "analise-2026-10-19.docx");
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn repeated_export_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let exporter = exporter(&dir);
    let doc = sample_document("19/10/2026");
    exporter.export("json", &doc, None).await.unwrap();
    exporter.export("json", &doc, None).await.unwrap();
    assert_eq!(
        files_in(&dir),
        vec!["analise-2026-10-19 (1).json", "analise-2026-10-19.json"]
    );
}

#[tokio::test]
async fn pdf_export_captures_the_view() {
    let dir = TempDir::new().unwrap();
    let view = ReportView::new(Arc::new(sample_document("19/10/2026")));
    let saved = exporter(&dir)
        .export("pdf", view.document(), Some(&view))
        .await;
    let path = match saved {
        Ok(path) => path.unwrap(),
        Err(ResumoError::FontNotFound { searched }) => {
            eprintln!("skipping PDF export check, no font family in {searched}");
            return;
        }
        Err(e) => panic!("pdf export failed: {e}"),
    };
    assert_eq!(files_in(&dir), vec!["analise-2026-10-19.pdf"]);
    assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
}
