use boxofports::app;
use boxofports::utils::error::ErrorSeverity;
use boxofports::utils::{logger, validation::Validate};
use boxofports::{CliConfig, EngineConfig};
use clap::Parser;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    // 驗證參數與配置
    let config = match EngineConfig::load(cli.config.as_deref())
        .and_then(|config| config.validate().map(|_| config))
        .and_then(|config| cli.validate().map(|_| config))
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match app::run(&cli.command, &config) {
        Ok(output) => {
            for warning in &output.warnings {
                tracing::warn!("⚠️  {}", warning);
                eprintln!("⚠️  {}", warning);
            }
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", output.stdout)?;
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 依錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
