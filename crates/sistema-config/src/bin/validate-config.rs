//! Config validation CLI tool
//!
//! Validates a sistema configuration file and reports any errors.

use sistema_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a sistema configuration file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match sistema_config::load_config(&config_path) {
        Ok(policy) => {
            let rules = &policy.rules;
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", sistema_config::CURRENT_CONFIG_VERSION);
            println!("  Data directory: {}", policy.app.data_dir.display());
            println!();
            println!("Rules:");
            println!("  Freeze length: {}h", rules.freeze_hours);
            println!("  Cycle length: {} days", rules.cycle_length_days);
            println!("  Bad day after: {} failures", rules.bad_day_failures);
            println!(
                "  Self-control bonus: +{} after {} digital days",
                rules.digital_bonus, rules.digital_bonus_streak
            );
            println!("  Record history: {}", rules.record_history);

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                sistema_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                sistema_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                sistema_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                sistema_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        sistema_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
