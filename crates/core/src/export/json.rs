use std::path::Path;

use tokio::fs;

use crate::{error::Result, types::AnalysisDocument};

/// Pretty-printed JSON in model field order.
pub fn to_json(doc: &AnalysisDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn from_json(json: &str) -> Result<AnalysisDocument> {
    Ok(serde_json::from_str(json)?)
}

/// Load a previously exported report
pub async fn load_document(path: &Path) -> Result<AnalysisDocument> {
    let json_content = fs::read_to_string(path).await?;
    from_json(&json_content)
}
