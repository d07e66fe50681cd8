use crate::domain::model::ImportSummary;
use crate::domain::ports::ImportPipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ImportEngine<P: ImportPipeline> {
    pipeline: P,
}

impl<P: ImportPipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Reads, parses and merges.
    ///
    /// The report is only written in the load phase, so a failure while
    /// reading or parsing leaves it untouched.
    pub async fn run(&self) -> Result<ImportSummary> {
        let started = Instant::now();
        tracing::info!("Starting section import...");

        // Extract
        let documents = self.pipeline.extract().await?;
        let source_names: Vec<String> = documents.iter().map(|d| d.source_name.clone()).collect();
        tracing::info!("📥 Read {} document(s)", documents.len());

        // Transform
        let sections = self.pipeline.transform(documents).await?;
        tracing::info!("🧩 Detected {} section(s)", sections.len());

        // Load
        let loaded = self.pipeline.load(sections).await?;
        tracing::info!(
            "💾 Merged {} section(s), report now has {} ({:?})",
            loaded.sections_added,
            loaded.total_sections,
            started.elapsed()
        );

        Ok(ImportSummary {
            source_names,
            sections_added: loaded.sections_added,
            total_sections: loaded.total_sections,
            output_path: loaded.output_path,
        })
    }
}
