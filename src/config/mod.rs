pub mod cli;
pub mod toml_config;

use crate::adapters::readers::SUPPORTED_EXTENSIONS;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "report-sections"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Assemble report sections from documents and edit their order")
)]
pub struct CliConfig {
    /// Report JSON file, relative to --base-dir
    #[cfg_attr(feature = "cli", arg(long, default_value = "report.json"))]
    pub report: String,

    /// Title used when the report file does not exist yet
    #[cfg_attr(feature = "cli", arg(long, default_value = "Informe"))]
    pub title: String,

    /// Directory all paths are resolved against
    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub base_dir: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub json_logs: bool,

    #[cfg_attr(feature = "cli", command(subcommand))]
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Subcommand))]
pub enum Command {
    /// Parse documents and append their sections to the report
    Import {
        /// Documents to import (.docx, .txt, .md), in order
        #[cfg_attr(feature = "cli", arg(required = true))]
        files: Vec<String>,

        /// Fallback title for a document without title lines (single file only)
        #[cfg_attr(feature = "cli", arg(long))]
        source_name: Option<String>,

        /// Also write a CSV export of the sections
        #[cfg_attr(feature = "cli", arg(long))]
        csv: Option<String>,
    },
    /// Print the sections in order
    List,
    /// Insert a section (appends when no index is given)
    Insert {
        #[cfg_attr(feature = "cli", arg(long))]
        index: Option<usize>,
        #[cfg_attr(feature = "cli", arg(long, default_value = ""))]
        title: String,
        #[cfg_attr(feature = "cli", arg(long, default_value = ""))]
        content: String,
    },
    /// Replace a section's title and content
    Update {
        id: String,
        #[cfg_attr(feature = "cli", arg(long, default_value = ""))]
        title: String,
        #[cfg_attr(feature = "cli", arg(long, default_value = ""))]
        content: String,
    },
    /// Delete a section by id
    Delete { id: String },
    /// Move a section to a new zero-based position
    Move { id: String, to_index: usize },
    /// Write the sections as CSV
    ExportCsv { output: String },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("report", &self.report)?;
        validate_path("base_dir", &self.base_dir)?;

        match &self.command {
            Command::Import {
                files,
                source_name,
                csv,
            } => {
                validate_file_extensions("files", files, SUPPORTED_EXTENSIONS)?;
                if let Some(name) = source_name {
                    if files.len() > 1 {
                        return Err(ReportError::InvalidConfigValueError {
                            field: "source_name".to_string(),
                            value: name.clone(),
                            reason: format!(
                                "applies to a single document, got {} files",
                                files.len()
                            ),
                        });
                    }
                }
                if let Some(csv) = csv {
                    validate_path("csv", csv)?;
                }
            }
            Command::ExportCsv { output } => validate_path("output", output)?,
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(command: Command) -> CliConfig {
        CliConfig {
            report: "report.json".to_string(),
            title: "Informe".to_string(),
            base_dir: ".".to_string(),
            verbose: false,
            json_logs: false,
            command,
        }
    }

    #[test]
    fn test_import_rejects_unsupported_files() {
        let ok = config(Command::Import {
            files: vec!["plan.docx".to_string(), "notas.md".to_string()],
            source_name: None,
            csv: None,
        });
        assert!(ok.validate().is_ok());

        let bad = config(Command::Import {
            files: vec!["plan.pdf".to_string()],
            source_name: None,
            csv: None,
        });
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_source_name_needs_single_file() {
        let single = config(Command::Import {
            files: vec!["notas.txt".to_string()],
            source_name: Some("Notas".to_string()),
            csv: None,
        });
        assert!(single.validate().is_ok());

        let several = config(Command::Import {
            files: vec!["a.txt".to_string(), "b.txt".to_string()],
            source_name: Some("Notas".to_string()),
            csv: None,
        });
        assert!(matches!(
            several.validate(),
            Err(ReportError::InvalidConfigValueError { ref field, .. }) if field == "source_name"
        ));
    }

    #[test]
    fn test_empty_report_path_is_invalid() {
        let mut cfg = config(Command::List);
        cfg.report = String::new();
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_move_command() {
        let cfg = CliConfig::parse_from([
            "report-sections",
            "--report",
            "anual.json",
            "move",
            "9b2f6f3e-2a4e-4f55-9d55-5b1f1f6e8a10",
            "0",
        ]);
        assert_eq!(cfg.report, "anual.json");
        assert!(matches!(cfg.command, Command::Move { to_index: 0, .. }));
    }
}
