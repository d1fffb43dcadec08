use clap::Parser;
use elevate_interior::config::toml_config::BatchConfig;
use elevate_interior::utils::{logger, validation::Validate};
use elevate_interior::{BatchRunner, EstimateEngine, LocalStorage, OutputFormat};

#[derive(Parser)]
#[command(name = "batch-estimate")]
#[command(about = "Run a TOML file of estimates and write the results")]
struct Args {
    /// Path to TOML batch file
    #[arg(short, long, default_value = "estimates.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Override the output directory from the batch file
    #[arg(short, long)]
    output: Option<String>,

    /// Override the output formats from the batch file
    #[arg(long, value_enum, value_delimiter = ',')]
    format: Vec<OutputFormat>,

    /// Dry run - validate and list jobs without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting batch estimator");
    tracing::info!("📁 Loading batch file from: {}", args.config);

    let mut config = match BatchConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load batch file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(output) = &args.output {
        config.output.path = output.clone();
        tracing::info!("🔧 Output path overridden to: {}", output);
    }
    if !args.format.is_empty() {
        config.set_output_formats(&args.format);
        tracing::info!("🔧 Output formats overridden to: {}", config.output.formats.join(", "));
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Batch file validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Batch file loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        perform_dry_run(&config);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let runner = BatchRunner::new(storage, config);

    match runner.run() {
        Ok(summary) => {
            tracing::info!("✅ Batch completed successfully!");
            println!(
                "✅ {} job(s) completed, {} failed",
                summary.report.completed_count(),
                summary.report.failed_count()
            );
            for path in &summary.written_files {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &BatchConfig, args: &Args) {
    println!("📋 Batch Summary:");
    println!("  Project: {}", config.project.name);
    if let Some(description) = &config.project.description {
        println!("  Description: {}", description);
    }
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));
    println!("  Jobs: {}", config.jobs.len());
    println!("  On job error: {:?}", config.job_error_policy());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &BatchConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    let engine = EstimateEngine::new();
    let mut failed = 0;
    for job in &config.jobs {
        match engine.run(&job.request) {
            Ok(_) => println!("  ✅ {} -> {}", job.name, job.request.kind().title()),
            Err(e) => {
                failed += 1;
                println!("  ❌ {} -> {}: {}", job.name, job.request.kind().title(), e);
            }
        }
    }

    println!();
    println!("💾 Would write:");
    for format in &config.output.formats {
        println!("  {}/{}.{}", config.output_path(), config.file_stem(), format);
    }
    println!("{} of {} job(s) would fail", failed, config.jobs.len());
}
