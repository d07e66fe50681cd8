use clap::Parser;
use report_sections::config::toml_config::ImportConfig;
use report_sections::utils::{logger, validation::Validate};
use report_sections::{DocumentImportPipeline, ImportEngine, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-import")]
#[command(about = "Batch import documents into a report from a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "import.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - parse the documents and show the detected sections without saving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match ImportConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }

    tracing::info!("🚀 Starting TOML-based section import");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = DocumentImportPipeline::new(
        storage,
        config.document_sources(),
        config.import_settings()?,
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the report will not be written");
        perform_dry_run(&pipeline).await?;
        return Ok(());
    }

    match ImportEngine::new(pipeline).run().await {
        Ok(summary) => {
            tracing::info!("✅ Import completed successfully!");
            println!(
                "✅ Imported {} section(s) from {} document(s)",
                summary.sections_added,
                summary.source_names.len()
            );
            println!(
                "📁 {} now has {} section(s)",
                summary.output_path, summary.total_sections
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &ImportConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {} ({})", config.report.title, config.report.path);
    println!("  Base path: {}", config.output_path());
    println!("  Documents: {}", config.documents.len());
    for document in &config.documents {
        println!("    - {}", document.path);
    }
    println!("  Formats: {}", config.load.output_formats.join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<S>(pipeline: &DocumentImportPipeline<S>) -> anyhow::Result<()>
where
    S: report_sections::domain::ports::Storage,
{
    use report_sections::domain::ports::ImportPipeline;

    let documents = pipeline.extract().await?;
    let sections = pipeline.transform(documents).await?;

    println!("🔍 Detected sections:");
    for (position, section) in sections.iter().enumerate() {
        println!(
            "  {:>3}  {}  ({} chars)",
            position,
            section.title,
            section.content.chars().count()
        );
    }
    println!();
    println!("✅ Dry run complete. {} section(s) would be appended.", sections.len());

    Ok(())
}
