//! Boundary-detection parser.
//!
//! Splits plain text into titled sections. A title line starts with an
//! uppercase letter and ends with a colon, e.g. `Objetivos:`. When the line
//! holds more than one colon, nothing before the first colon may be
//! lowercase, so `RESULTADOS: FASE 1:` is a title and `Nota: ver anexo:` is
//! not. Everything up to the next title line is that section's content. The
//! split is a pure function of the input text.

use crate::domain::model::ParsedSection;
use crate::utils::error::{ReportError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// 全大寫的縮寫行（例如 "PEI:"）也會被當成標題
static TITLE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Lu}.*:\s*$").expect("title line pattern is valid"));

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryParser;

impl BoundaryParser {
    pub fn new() -> Self {
        Self
    }

    pub fn is_title_line(&self, line: &str) -> bool {
        if !TITLE_SHAPE.is_match(line) {
            return false;
        }

        let head = line.trim_end().strip_suffix(':').unwrap_or(line);
        match head.split_once(':') {
            None => true,
            // 多個冒號：第一個冒號前不可有小寫
            Some((before, _)) => !before.chars().any(char::is_lowercase),
        }
    }

    /// Splits `text` into sections.
    ///
    /// Text before the first title line is dropped. When no title line is
    /// found the whole (trimmed) text becomes one section titled after
    /// `source_name`.
    pub fn parse(&self, source_name: &str, text: &str) -> Vec<ParsedSection> {
        let mut sections = Vec::new();
        let mut current: Option<(String, Vec<&str>)> = None;
        let mut preamble_lines = 0usize;

        for line in text.lines() {
            if self.is_title_line(line) {
                if let Some((title, body)) = current.take() {
                    sections.push(build_section(title, &body, sections.len()));
                }
                current = Some((clean_title(line), Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            } else {
                preamble_lines += 1;
            }
        }

        if let Some((title, body)) = current {
            sections.push(build_section(title, &body, sections.len()));
        }

        if sections.is_empty() {
            tracing::warn!(
                "No title lines detected in '{}', importing as a single section",
                source_name
            );
            return vec![ParsedSection {
                title: fallback_title(source_name),
                content: text.trim().to_string(),
                order: 0,
            }];
        }

        if preamble_lines > 0 {
            tracing::debug!(
                "Dropped {} line(s) before the first title in '{}'",
                preamble_lines,
                source_name
            );
        }
        tracing::debug!("Detected {} section(s) in '{}'", sections.len(), source_name);
        sections
    }

    /// Decodes `data` as UTF-8 and parses it.
    pub fn parse_bytes(&self, source_name: &str, data: &[u8]) -> Result<Vec<ParsedSection>> {
        let text = std::str::from_utf8(data)
            .map_err(|e| ReportError::document_read(source_name, format!("not valid UTF-8: {e}")))?;
        Ok(self.parse(source_name, text))
    }
}

fn build_section(title: String, body: &[&str], order: usize) -> ParsedSection {
    let is_blank = |line: &&str| line.trim().is_empty();
    let start = body.iter().position(|l| !is_blank(l)).unwrap_or(body.len());
    let end = body.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);

    ParsedSection {
        title,
        content: body[start..end].join("\n"),
        order,
    }
}

fn clean_title(line: &str) -> String {
    line.trim()
        .trim_end_matches(|c: char| c == ':' || c == '.' || c == ';' || c.is_whitespace())
        .to_string()
}

fn fallback_title(source_name: &str) -> String {
    Path::new(source_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(source_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<ParsedSection> {
        BoundaryParser::new().parse("informe.docx", text)
    }

    #[test]
    fn test_two_titled_sections() {
        let sections = parse("Objetivos:\nTexto A\n\nMetodología:\nTexto B");

        assert_eq!(
            sections,
            vec![
                ParsedSection {
                    title: "Objetivos".to_string(),
                    content: "Texto A".to_string(),
                    order: 0,
                },
                ParsedSection {
                    title: "Metodología".to_string(),
                    content: "Texto B".to_string(),
                    order: 1,
                },
            ]
        );
    }

    #[test]
    fn test_title_line_detection() {
        let parser = BoundaryParser::new();
        assert!(parser.is_title_line("Objetivos:"));
        assert!(parser.is_title_line("Índice general:"));
        assert!(parser.is_title_line("MARCO TEÓRICO:  "));
        assert!(parser.is_title_line("PEI:"));
        assert!(parser.is_title_line("RESULTADOS: FASE 1:"));
        assert!(parser.is_title_line("NOTA: VER ANEXO:"));
        assert!(!parser.is_title_line("objetivos:"));
        assert!(!parser.is_title_line("  Objetivos:"));
        assert!(!parser.is_title_line("Fecha: 12 de marzo"));
        assert!(!parser.is_title_line("Nota: ver anexo:"));
        assert!(!parser.is_title_line("Texto A"));
    }

    #[test]
    fn test_all_caps_title_with_inner_colon_starts_section() {
        let sections = parse("Intro:\nuno\nRESULTADOS: FASE 1:\ndos");

        let split: Vec<(&str, &str)> = sections
            .iter()
            .map(|s| (s.title.as_str(), s.content.as_str()))
            .collect();
        assert_eq!(split, vec![("Intro", "uno"), ("RESULTADOS: FASE 1", "dos")]);
        assert_eq!(sections[1].order, 1);
    }

    #[test]
    fn test_preamble_is_dropped() {
        let sections = parse("Informe preliminar\nsin título\n\nResumen:\nUno");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Resumen");
        assert_eq!(sections[0].content, "Uno");
    }

    #[test]
    fn test_blank_lines_trimmed_but_inner_kept() {
        let sections = parse("Resumen:\n\n\nPárrafo uno\n\nPárrafo dos\n   \n");
        assert_eq!(sections[0].content, "Párrafo uno\n\nPárrafo dos");
    }

    #[test]
    fn test_empty_sections_between_titles() {
        let sections = parse("Uno:\nDos:\nTexto\nTres:");
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Uno", "Dos", "Tres"]);
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[1].content, "Texto");
        assert_eq!(sections[2].content, "");
        assert_eq!(sections[2].order, 2);
    }

    #[test]
    fn test_trailing_punctuation_stripped_from_title() {
        let sections = parse("I. INTRODUCCIÓN.:\ncontenido");
        assert_eq!(sections[0].title, "I. INTRODUCCIÓN");
    }

    #[test]
    fn test_crlf_line_endings() {
        let sections = parse("Objetivos:\r\nTexto A\r\n\r\nMetodología:\r\nTexto B\r\n");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "Texto A");
        assert_eq!(sections[1].content, "Texto B");
    }

    #[test]
    fn test_fallback_single_section() {
        let text = "\n  un texto sin títulos\ncon dos líneas  \n\n";
        let sections = parse(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].order, 0);
        assert_eq!(sections[0].title, "informe");
        assert_eq!(sections[0].content, text.trim());
    }

    #[test]
    fn test_fallback_on_empty_input() {
        let sections = parse("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "A:\nuno\nB:\ndos\nC:\ntres";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let result = BoundaryParser::new().parse_bytes("roto.txt", &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(ReportError::DocumentRead { .. })));
    }
}
