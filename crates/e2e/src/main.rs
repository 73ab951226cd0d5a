//! Suite entry point
//!
//! Exit status: 0 when every case passed, 1 when any case failed or errored,
//! 2 when the suite itself could not run or report.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reporter_e2e::report::{self, ReportFormat};
use reporter_e2e::selenium::{SeleniumConfig, SeleniumLauncher, DEFAULT_BROWSER};
use reporter_e2e::session::ScopeConfig;
use reporter_e2e::{cases, RunnerConfig, SuitePlan, SuiteRunner};

#[derive(Parser, Debug)]
#[command(name = "reporter-e2e")]
#[command(about = "E2E suite for the JiraTestResultReporter configuration page")]
#[command(version)]
struct Args {
    /// Credentials and site config file
    #[arg(short, long, env = "REPORTER_E2E_CREDENTIALS", default_value = "myCredentials.txt")]
    credentials: PathBuf,

    /// Selenium RC browser launcher string
    #[arg(long, default_value = DEFAULT_BROWSER)]
    browser: String,

    /// How long each page load may take
    #[arg(long, default_value = "30000")]
    page_load_timeout_ms: u64,

    /// Output directory for the report
    #[arg(short, long, default_value = "test-reports")]
    output: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Junit)]
    format: ReportFormat,

    /// Run only these cases (and whatever they require)
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Run cases even when a prerequisite did not pass
    #[arg(long)]
    no_skip_dependents: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let plan = SuitePlan::new(cases::all(), &args.only)?;
    info!("Plan: {}", plan.names().join(" -> "));

    let page_load_timeout = Duration::from_millis(args.page_load_timeout_ms);
    let launcher = SeleniumLauncher::new(SeleniumConfig {
        browser: args.browser,
        request_timeout: page_load_timeout + Duration::from_secs(60),
    })?;

    let config = RunnerConfig {
        scope: ScopeConfig {
            config_path: args.credentials,
            page_load_timeout,
        },
        skip_dependents: !args.no_skip_dependents,
    };

    let results = SuiteRunner::new(launcher, config).run(&plan).await;
    report::write_report(&results, &args.output, args.format)?;

    Ok(results.success())
}
