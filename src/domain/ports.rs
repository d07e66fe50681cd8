use crate::domain::model::{LoadResult, ParsedSection};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Turns a binary document into plain text.
///
/// Any failure to obtain text is reported as `ReportError::DocumentRead`.
pub trait DocumentReader: Send + Sync {
    fn read_text(&self, source_name: &str, data: &[u8]) -> Result<String>;
}

/// Raw document text together with the name used as fallback title.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub source_name: String,
    pub text: String,
}

#[async_trait]
pub trait ImportPipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ExtractedDocument>>;
    async fn transform(&self, documents: Vec<ExtractedDocument>) -> Result<Vec<ParsedSection>>;
    async fn load(&self, sections: Vec<ParsedSection>) -> Result<LoadResult>;
}
