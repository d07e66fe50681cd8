//! Document readers: turn source files into plain text for the parser.

use crate::domain::ports::DocumentReader;
use crate::utils::error::{ReportError, Result};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;
use zip::ZipArchive;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["docx", "txt", "md"];

const DOCX_BODY: &str = "word/document.xml";

static PARAGRAPH_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("valid pattern"));
static TAB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<w:tab\s*/>").expect("valid pattern"));
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid pattern"));

/// Reads UTF-8 text files as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn read_text(&self, source_name: &str, data: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(data).map_err(|e| {
            ReportError::document_read(source_name, format!("not valid UTF-8: {e}"))
        })?;
        // 去掉 BOM
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

/// Extracts paragraph text from an Office Open XML (.docx) package.
///
/// Styling, tables and images are discarded; each paragraph becomes one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read_text(&self, source_name: &str, data: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            ReportError::document_read(source_name, format!("not a .docx package: {e}"))
        })?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY)
            .map_err(|e| ReportError::document_read(source_name, format!("{DOCX_BODY}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ReportError::document_read(source_name, e.to_string()))?;

        tracing::debug!("Read {} bytes of document XML from '{}'", xml.len(), source_name);
        Ok(xml_to_text(&xml))
    }
}

fn xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = ANY_TAG.replace_all(&text, "");
    unescape_xml(&text)
}

fn unescape_xml(text: &str) -> String {
    // &amp; 最後處理，避免 "&amp;lt;" 被解成 "<"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Picks a reader by file extension.
pub fn reader_for_path(path: &str) -> Result<Box<dyn DocumentReader>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "docx" => Ok(Box::new(DocxReader)),
        "txt" | "md" => Ok(Box::new(PlainTextReader)),
        _ => Err(ReportError::UnsupportedDocument {
            source_name: path.to_string(),
            extension,
        }),
    }
}
