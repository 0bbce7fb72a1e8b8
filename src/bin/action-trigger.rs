//! Action Trigger CLI
//!
//! Authenticated single-shot workflow trigger

use action_trigger::core::config_loader::{CliOverrides, ConfigLoadOptions, ConfigLoader};
use action_trigger::core::error::TriggerError;
use action_trigger::orchestration::TriggerRunner;
use anyhow::Result;
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;
use std::process;

/// Authenticated single-shot workflow trigger
#[derive(Parser)]
#[command(name = "action-trigger")]
#[command(version = "0.1.0")]
#[command(about = "Authenticated GitHub Actions workflow trigger", long_about = None)]
struct Cli {
    /// Access code authenticating this run
    #[arg(value_name = "ACCESS_CODE")]
    access_code: Option<String>,

    /// Workflow file to run
    #[arg(long)]
    workflow: Option<String>,

    /// Log file to analyze instead of the embedded sample
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Deadline in seconds for the dispatched command
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Historical behavior: a missing access code prints usage and is not an
    // error exit.
    let Some(access_code) = cli.access_code else {
        println!("Usage: action-trigger <ACCESS_CODE>");
        return Ok(0);
    };
    let access_code = SecretString::new(access_code.into());

    println!("\n🎯 action-trigger\n");

    let options = ConfigLoadOptions {
        project_path: PathBuf::from("."),
        cli: CliOverrides {
            workflow: cli.workflow,
            deadline_secs: cli.timeout_secs,
            log_file: cli.log_file,
        },
        env: std::env::vars().collect(),
    };

    let config = match ConfigLoader::load(options).await {
        Ok(config) => config,
        Err(e) => return Ok(fail(&e)),
    };

    let runner = TriggerRunner::from_config(config);

    match runner.run(access_code).await {
        Ok(report) => Ok(report.exit_code),
        Err(e) => Ok(fail(&e)),
    }
}

fn fail(error: &TriggerError) -> i32 {
    eprintln!("\n❌ {}", error);
    for action in error.suggested_actions() {
        eprintln!("  - {}", action);
    }
    1
}
