mod cli;
mod config;
mod errors;
mod extraction;
mod generation;
mod layout;
mod llm_client;
mod matching;
mod models;
mod outline;
mod output;
mod render;
mod report;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{collect_direct_input, read_description, Cli, Command};
use crate::config::Config;
use crate::errors::DprError;
use crate::extraction::{parse_extraction, LlmFieldExtractor};
use crate::generation::generator::{generate_dpr, generate_from_description, GenerateOptions};
use crate::llm_client::LlmClient;
use crate::report::RunReport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize structured logging; stdout is kept for the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting DPR generator v{}", env!("CARGO_PKG_VERSION"));

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.log();
            eprintln!("✗ {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli, config: &Config) -> Result<(), DprError> {
    let json = cli.json;
    let options = GenerateOptions {
        output_dir: cli.output_dir.unwrap_or_else(|| config.output_dir.clone()),
        format: cli.format,
    };

    match cli.command {
        Command::Direct(args) => {
            let input = collect_direct_input(&args, &mut io::stdin().lock(), &mut io::stderr())?;
            let report = generate_dpr(&input, &options)?;
            print_report(&report, json)?;
        }
        Command::Natural { input } => {
            let api_key = config
                .require_api_key()
                .map_err(|e| DprError::Validation(e.to_string()))?;
            let llm = LlmClient::new(api_key.to_string())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);

            let description = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => read_description(&mut io::stdin().lock(), &mut io::stderr())?,
            };
            let extractor = LlmFieldExtractor::new(llm);
            let report = generate_from_description(&extractor, &description, &options).await?;
            print_report(&report, json)?;
        }
        Command::Validate { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let input = parse_extraction(&raw)?;
            input.validate()?;
            if json {
                let canonical = serde_json::to_string_pretty(&input)
                    .map_err(|e| DprError::Internal(e.into()))?;
                println!("{canonical}");
            } else {
                println!(
                    "✓ {} is valid: '{}' with {} field(s)",
                    file.display(),
                    input.project_name,
                    input.fields.len()
                );
            }
        }
    }
    Ok(())
}

fn print_report(report: &RunReport, json: bool) -> Result<(), DprError> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}
