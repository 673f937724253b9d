//! Shopwalk CLI - Main Entry Point
//!
//! Runs scripted end-to-end scenarios against the storefront UI through a
//! WebDriver server and leaves one HTML report per run plus a suite
//! summary JSON, whatever the outcome.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use shopwalk_engine::executor::{RunResult, ScenarioRunner};
use shopwalk_engine::report::HtmlReport;
use shopwalk_engine::webdriver::{WebDriverConfig, WebDriverSession};

mod scenarios;

/// Scenario-driven end-to-end checker for the storefront UI
#[derive(Parser, Debug)]
#[command(name = "shopwalk")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run a single scenario by name (default: run all)
    #[arg(short, long)]
    scenario: Option<String>,

    /// List available scenarios and exit
    #[arg(long)]
    list: bool,

    /// WebDriver server to connect to
    #[arg(long, default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Base URL of the storefront under test
    #[arg(long, default_value = "https://www.saucedemo.com")]
    base_url: String,

    /// Directory for reports and machine-readable results
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,

    /// Run the browser headless
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Summary written alongside the per-scenario reports
#[derive(Debug, Serialize)]
struct SuiteResult {
    total: usize,
    passed: usize,
    failed: usize,
    results: Vec<RunResult>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    if args.list {
        for scenario in scenarios::all(&args.base_url) {
            println!("{:<18} {}", scenario.name, scenario.description);
        }
        return;
    }

    match run_scenarios(&args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

async fn run_scenarios(args: &Args) -> anyhow::Result<bool> {
    let selected = match &args.scenario {
        Some(name) => vec![scenarios::by_name(name, &args.base_url)
            .with_context(|| format!("unknown scenario: {name}"))?],
        None => scenarios::all(&args.base_url),
    };

    let driver_config = WebDriverConfig {
        server_url: args.webdriver_url.clone(),
        headless: args.headless,
    };

    let mut results = Vec::new();
    for scenario in &selected {
        info!("Running scenario: {}", scenario.name);

        // Each scenario gets a fresh browser; a crash in one run cannot
        // leak into the next.
        let session = WebDriverSession::connect(&driver_config)
            .await
            .with_context(|| format!("could not start a browser session for {}", scenario.name))?;
        let report = HtmlReport::new(args.output.join(format!("{}-report.html", scenario.name)));

        let result = ScenarioRunner::new(session).run(scenario, &report).await;
        if result.passed() {
            info!("✓ {} ({} ms)", result.scenario, result.duration_ms);
        } else {
            error!(
                "✗ {} - {}",
                result.scenario,
                result.failure.as_deref().unwrap_or("unknown error")
            );
        }
        results.push(result);
    }

    let passed = results.iter().filter(|r| r.passed()).count();
    let failed = results.len() - passed;
    let suite = SuiteResult {
        total: results.len(),
        passed,
        failed,
        results,
    };

    std::fs::create_dir_all(&args.output)?;
    let summary_path = args.output.join("suite-results.json");
    std::fs::write(&summary_path, serde_json::to_string_pretty(&suite)?)?;
    info!("Results written to: {}", summary_path.display());

    info!("");
    info!("Scenario results: {} passed, {} failed", passed, failed);

    Ok(failed == 0)
}
