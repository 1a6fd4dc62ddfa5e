use std::path::Path;

use lopdf::Document;
use serde_json::Value;
use tracing::debug;

/// Read the raw text of a policy document.
///
/// PDFs yield their page text joined with newlines. Anything that does not parse
/// as a PDF is decoded as UTF-8 with invalid sequences replaced.
pub fn document_text<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    match Document::load_mem(&bytes) {
        Ok(document) => Ok(pdf_page_text(&document)),
        Err(err) => {
            debug!(error = %err, "not a PDF; reading policy document as text");
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn pdf_page_text(document: &Document) -> String {
    document
        .get_pages()
        .keys()
        .map(|page| document.extract_text(&[*page]).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pull a JSON value out of a service response that may wrap it in prose or
/// markdown fences. The whole response is tried first, then the span from the
/// first `{` to the last `}`.
pub fn json_block(response: &str) -> Option<Value> {
    let trimmed = response.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&trimmed[start..=end]).ok()
}
