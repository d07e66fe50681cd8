use crate::adapters::readers::reader_for_path;
use crate::core::export::sections_to_csv;
use crate::core::parser::BoundaryParser;
use crate::core::report_store;
use crate::domain::model::{LoadResult, ParsedSection};
use crate::domain::ports::{ExtractedDocument, ImportPipeline, Storage};
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

/// A document to import and the name used as fallback section title.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub path: String,
    pub source_name: Option<String>,
}

impl DocumentSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_name: None,
        }
    }

    pub fn display_name(&self) -> String {
        self.source_name.clone().unwrap_or_else(|| {
            Path::new(&self.path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&self.path)
                .to_string()
        })
    }
}

#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub report_path: String,
    pub report_title: String,
    pub report_description: Option<String>,
    pub output_formats: Vec<OutputFormat>,
    pub csv_filename: String,
}

/// Imports one or more documents into a single report.
///
/// Documents are read and parsed in the listed order; the report is loaded,
/// merged and saved only once every document has been parsed.
pub struct DocumentImportPipeline<S: Storage> {
    storage: S,
    documents: Vec<DocumentSource>,
    settings: ImportSettings,
    parser: BoundaryParser,
}

impl<S: Storage> DocumentImportPipeline<S> {
    pub fn new(storage: S, documents: Vec<DocumentSource>, settings: ImportSettings) -> Self {
        Self {
            storage,
            documents,
            settings,
            parser: BoundaryParser::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> ImportPipeline for DocumentImportPipeline<S> {
    async fn extract(&self) -> Result<Vec<ExtractedDocument>> {
        let mut extracted = Vec::with_capacity(self.documents.len());

        for document in &self.documents {
            let source_name = document.display_name();
            let reader = reader_for_path(&document.path)?;

            tracing::debug!("Reading '{}' as '{}'", document.path, source_name);
            let data = self.storage.read_file(&document.path).await?;
            let text = reader.read_text(&source_name, &data)?;

            extracted.push(ExtractedDocument { source_name, text });
        }

        Ok(extracted)
    }

    async fn transform(&self, documents: Vec<ExtractedDocument>) -> Result<Vec<ParsedSection>> {
        let mut sections = Vec::new();

        for document in documents {
            let parsed = self.parser.parse(&document.source_name, &document.text);
            tracing::debug!(
                "'{}' produced {} section(s)",
                document.source_name,
                parsed.len()
            );
            sections.extend(parsed);
        }

        Ok(sections)
    }

    async fn load(&self, sections: Vec<ParsedSection>) -> Result<LoadResult> {
        let settings = &self.settings;
        let mut report =
            report_store::load_or_new(&self.storage, &settings.report_path, &settings.report_title)
                .await?;

        if let Some(description) = &settings.report_description {
            if report.description.is_empty() {
                report.description = description.clone();
            }
        }

        let sections_added = report.sections.merge_append(sections);
        report.touch();

        if settings.output_formats.contains(&OutputFormat::Csv) {
            let csv = sections_to_csv(&report.sections)?;
            self.storage
                .write_file(&settings.csv_filename, csv.as_bytes())
                .await?;
            tracing::debug!("CSV export written to '{}'", settings.csv_filename);
        }

        // JSON 報告永遠會寫出，它是下次匯入的來源
        report_store::save(&self.storage, &settings.report_path, &report).await?;

        Ok(LoadResult {
            sections_added,
            total_sections: report.sections.len(),
            output_path: settings.report_path.clone(),
        })
    }
}
