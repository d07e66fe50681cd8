pub mod export;
pub mod import;
pub mod ledger;
pub mod parser;
pub mod report_store;

pub use crate::app::pipelines::document_import::DocumentImportPipeline;
pub use crate::domain::model::{ParsedSection, Report, Section, SectionId};
pub use crate::domain::ports::{DocumentReader, ImportPipeline, Storage};
pub use crate::utils::error::Result;
