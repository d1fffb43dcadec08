use clap::Parser;
use elevate_interior::core::report::{render_estimate_text, render_json};
use elevate_interior::utils::logger;
use elevate_interior::{CliConfig, EstimateEngine, EstimateRequest};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting elevate CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let json_output = config.json;
    let request = EstimateRequest::from(config.command);
    let engine = EstimateEngine::new();

    match engine.run(&request) {
        Ok(estimate) => {
            if json_output {
                match render_json(&estimate) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("❌ {}", e.user_friendly_message());
                        std::process::exit(e.exit_code());
                    }
                }
            } else {
                println!("{}", render_estimate_text(&estimate));
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ {} estimate failed: {} (Category: {:?}, Severity: {:?})",
                request.kind(),
                e,
                e.category(),
                e.severity()
            );

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
