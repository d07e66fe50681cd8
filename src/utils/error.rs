use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not read document '{source_name}': {reason}")]
    DocumentRead { source_name: String, reason: String },

    #[error("Unsupported document '{source_name}' (extension: {extension})")]
    UnsupportedDocument {
        source_name: String,
        extension: String,
    },

    #[error("Section ledger is corrupt: {reason}")]
    CorruptLedger { reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Document,
    Storage,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a command that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl ReportError {
    pub fn document_read(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DocumentRead {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn corrupt_ledger(reason: impl Into<String>) -> Self {
        Self::CorruptLedger {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DocumentRead { .. } | Self::UnsupportedDocument { .. } => ErrorCategory::Document,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::CorruptLedger { .. } | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Data
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 換一個檔案就能重試
            Self::DocumentRead { .. } | Self::UnsupportedDocument { .. } => ErrorSeverity::Medium,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::CorruptLedger { .. } | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DocumentRead { .. } => {
                "Try a different file, or re-save the document and import it again"
            }
            Self::UnsupportedDocument { .. } => "Convert the document to .docx, .txt or .md",
            Self::CorruptLedger { .. } => {
                "The report file was edited by hand or truncated; restore it from a backup"
            }
            Self::IoError(_) => "Check that the path exists and is readable/writable",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Check the report file is valid JSON produced by this tool"
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Check the configuration file or command flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DocumentRead { source_name, .. } => {
                format!("The document '{}' could not be read", source_name)
            }
            Self::UnsupportedDocument {
                source_name,
                extension,
            } => format!(
                "'{}' is not a supported document type (.{})",
                source_name, extension
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_read_is_retryable() {
        let err = ReportError::document_read("informe.docx", "not a zip archive");
        assert_eq!(err.category(), ErrorCategory::Document);
        assert!(err.is_retryable());
        assert!(err.user_friendly_message().contains("informe.docx"));
    }

    #[test]
    fn test_corrupt_ledger_is_critical() {
        let err = ReportError::corrupt_ledger("duplicate order 1");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_every_failure_has_a_nonzero_severity() {
        let errors = [
            ReportError::document_read("plan.docx", "broken"),
            ReportError::UnsupportedDocument {
                source_name: "plan.pdf".to_string(),
                extension: "pdf".to_string(),
            },
            ReportError::MissingConfigError {
                field: "documents".to_string(),
            },
            ReportError::IoError(std::io::Error::other("disk full")),
        ];
        let severities: Vec<ErrorSeverity> = errors.iter().map(ReportError::severity).collect();

        assert_eq!(
            severities,
            vec![
                ErrorSeverity::Medium,
                ErrorSeverity::Medium,
                ErrorSeverity::High,
                ErrorSeverity::Critical,
            ]
        );
        assert!(severities.iter().all(|s| s.exit_code() > 0));
    }
}
