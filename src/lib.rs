pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, Command};

pub use crate::core::{
    import::ImportEngine, ledger::SectionLedger, parser::BoundaryParser, DocumentImportPipeline,
};
pub use domain::model::{ParsedSection, Report, Section, SectionDraft, SectionId};
pub use utils::error::{ReportError, Result};
