use clap::Parser;
use report_sections::app::editing::{apply_edit, EditCommand, EditOutcome};
use report_sections::app::pipelines::document_import::{
    DocumentSource, ImportSettings, OutputFormat,
};
use report_sections::core::{export, report_store};
use report_sections::domain::ports::Storage;
use report_sections::utils::{logger, validation::Validate};
use report_sections::{
    CliConfig, Command, DocumentImportPipeline, ImportEngine, LocalStorage, ReportError, SectionId,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run(config: CliConfig) -> report_sections::Result<()> {
    let storage = LocalStorage::new(config.base_dir.clone());

    match config.command {
        Command::Import {
            files,
            source_name,
            csv,
        } => {
            let documents = files
                .into_iter()
                .map(|path| DocumentSource {
                    path,
                    source_name: source_name.clone(),
                })
                .collect();

            let mut output_formats = vec![OutputFormat::Json];
            if csv.is_some() {
                output_formats.push(OutputFormat::Csv);
            }
            let settings = ImportSettings {
                report_path: config.report.clone(),
                report_title: config.title.clone(),
                report_description: None,
                output_formats,
                csv_filename: csv.unwrap_or_default(),
            };

            let pipeline = DocumentImportPipeline::new(storage, documents, settings);
            let summary = ImportEngine::new(pipeline).run().await?;

            println!(
                "✅ Imported {} section(s) from {}",
                summary.sections_added,
                summary.source_names.join(", ")
            );
            println!(
                "📁 {} now has {} section(s)",
                summary.output_path, summary.total_sections
            );
        }
        Command::List => {
            let report = report_store::load_or_new(&storage, &config.report, &config.title).await?;
            println!("📋 {} ({} sections)", report.title, report.sections.len());
            for section in report.sections.to_ordered_list() {
                println!("  {:>3}  {}  {}", section.order(), section.id(), section.title());
            }
        }
        Command::ExportCsv { output } => {
            let report = report_store::load_or_new(&storage, &config.report, &config.title).await?;
            let csv = export::sections_to_csv(&report.sections)?;
            storage.write_file(&output, csv.as_bytes()).await?;
            println!("📁 CSV saved to: {}", output);
        }
        Command::Insert {
            index,
            title,
            content,
        } => {
            let outcome = apply_edit(
                &storage,
                &config.report,
                &config.title,
                EditCommand::Insert {
                    index,
                    title,
                    content,
                },
            )
            .await?;
            print_outcome(&outcome);
        }
        Command::Update { id, title, content } => {
            let id = parse_id(&id)?;
            let outcome = apply_edit(
                &storage,
                &config.report,
                &config.title,
                EditCommand::Update { id, title, content },
            )
            .await?;
            print_outcome(&outcome);
        }
        Command::Delete { id } => {
            let id = parse_id(&id)?;
            let outcome =
                apply_edit(&storage, &config.report, &config.title, EditCommand::Delete { id })
                    .await?;
            print_outcome(&outcome);
        }
        Command::Move { id, to_index } => {
            let id = parse_id(&id)?;
            let outcome = apply_edit(
                &storage,
                &config.report,
                &config.title,
                EditCommand::Move { id, to_index },
            )
            .await?;
            print_outcome(&outcome);
        }
    }

    Ok(())
}

fn parse_id(value: &str) -> report_sections::Result<SectionId> {
    value
        .parse()
        .map_err(|e: uuid::Error| ReportError::InvalidConfigValueError {
            field: "id".to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn print_outcome(outcome: &EditOutcome) {
    match outcome {
        EditOutcome::Inserted { id, order } => println!("✅ Inserted {} at {}", id, order),
        EditOutcome::Updated => println!("✅ Section updated"),
        EditOutcome::Deleted => println!("✅ Section deleted"),
        EditOutcome::Moved { order } => println!("✅ Section moved to {}", order),
        EditOutcome::Unchanged => println!("ℹ️ Nothing to change"),
    }
}
