//! cardiorisk: score a clinical input and print the assessment.
//!
//! # Usage
//!
//! ```bash
//! cardiorisk [--input <path>] [--local-only] [--format json|text] [--no-validate]
//! ```
//!
//! Reads a JSON object with the 13 clinical fields from `--input` or stdin.

use std::io::IsTerminal;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiorisk::adapters::sanitize::SanitizingMakeWriter;
use cardiorisk::application::read_input;
use cardiorisk::config::{LogMode, Settings};
use cardiorisk::{AssessmentReport, AssessmentService, ScoringPolicy};

const USAGE: &str =
    "Usage: cardiorisk [--input <path>] [--local-only] [--format json|text] [--no-validate]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Text,
}

struct Args {
    input: Option<std::path::PathBuf>,
    local_only: bool,
    format: Format,
    validate: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        input: None,
        local_only: false,
        format: Format::Json,
        validate: true,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let path = args.next().unwrap_or_default();
                if path.is_empty() {
                    bail!("--input needs a path\n{USAGE}");
                }
                parsed.input = Some(path.into());
            }
            "--local-only" => parsed.local_only = true,
            "--no-validate" => parsed.validate = false,
            "--format" => {
                parsed.format = match args.next().as_deref() {
                    Some("json") => Format::Json,
                    Some("text") => Format::Text,
                    _ => bail!("--format must be 'json' or 'text'\n{USAGE}"),
                };
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("Unknown argument: {other}\n{USAGE}"),
        }
    }

    Ok(parsed)
}

fn render_text(report: &AssessmentReport) -> String {
    let assessment = &report.assessment;
    let mut out = format!(
        "{}\nRisk score: {}%\n{}\n",
        assessment.headline(),
        assessment.risk_score(),
        assessment.description()
    );

    if !assessment.risk_factors().is_empty() {
        out.push_str("\nRisk factors:\n");
        for factor in assessment.risk_factors() {
            out.push_str(&format!("  - {factor}\n"));
        }
    }

    out.push_str("\nRecommendations:\n");
    for rec in report.recommendations.iter() {
        out.push_str(&format!("  - {rec}\n"));
    }

    out.push_str(&format!("\nScored by: {}", report.source));
    if report.fell_back {
        out.push_str(" (remote scorer unavailable)");
    }
    if let Some(message) = &report.provenance.message {
        out.push_str(&format!("\nNote: {message}"));
    }
    out.push('\n');
    out
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let mut settings = Settings::from_env()?;
    if args.local_only {
        settings.policy = ScoringPolicy::LocalOnly;
    }

    // Stdout carries the report, so logs go to stderr or a file.
    let (writer, _guard) = match settings.log_mode {
        LogMode::File => {
            if let Some(parent) = settings.log_file.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&settings.log_file)
                .with_context(|| format!("Cannot open log file {:?}", settings.log_file))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(settings.log_mode == LogMode::Stderr && std::io::stderr().is_terminal())
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    let input = match &args.input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Cannot open input {path:?}"))?;
            read_input(file, args.validate)?
        }
        None => read_input(std::io::stdin().lock(), args.validate)?,
    };

    let service = AssessmentService::from_settings(&settings);
    tracing::info!("Scoring with policy {:?}", service.policy());
    let report = service.assess(&input);

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print!("{}", render_text(&report)),
    }

    Ok(())
}
