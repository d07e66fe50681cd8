use crate::adapters::readers::SUPPORTED_EXTENSIONS;
use crate::app::pipelines::document_import::{DocumentSource, ImportSettings, OutputFormat};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub report: ReportConfig,
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub path: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub path: String,
    pub source_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub csv_filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl ImportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REPORTS_DIR})，未設定的保留原文
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn output_path(&self) -> &str {
        &self.load.output_path
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn output_formats(&self) -> Result<Vec<OutputFormat>> {
        self.load
            .output_formats
            .iter()
            .map(|format| match format.as_str() {
                "json" => Ok(OutputFormat::Json),
                "csv" => Ok(OutputFormat::Csv),
                other => Err(ReportError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported format. Valid formats: json, csv".to_string(),
                }),
            })
            .collect()
    }

    pub fn document_sources(&self) -> Vec<DocumentSource> {
        self.documents
            .iter()
            .map(|doc| DocumentSource {
                path: doc.path.clone(),
                source_name: doc.source_name.clone(),
            })
            .collect()
    }

    pub fn import_settings(&self) -> Result<ImportSettings> {
        Ok(ImportSettings {
            report_path: self.report.path.clone(),
            report_title: self.report.title.clone(),
            report_description: self.report.description.clone(),
            output_formats: self.output_formats()?,
            csv_filename: self
                .load
                .csv_filename
                .clone()
                .unwrap_or_else(|| "sections.csv".to_string()),
        })
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        validate_path("report.path", &self.report.path)?;
        validate_non_empty_string("report.title", &self.report.title)?;
        validate_path("load.output_path", &self.load.output_path)?;

        if self.documents.is_empty() {
            return Err(ReportError::MissingConfigError {
                field: "documents".to_string(),
            });
        }
        let paths: Vec<String> = self.documents.iter().map(|d| d.path.clone()).collect();
        validate_file_extensions("documents.path", &paths, SUPPORTED_EXTENSIONS)?;

        self.output_formats()?;
        Ok(())
    }
}
