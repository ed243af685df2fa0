use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use insights_core::PollSettings;
use insights_engine::{ApiSettings, DEFAULT_BASE_URL};
use insights_logging::LogDestination;
use log::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "insights")]
#[command(version)]
#[command(about = "Submit a pricing page and browse the generated insights")]
pub struct Config {
    /// Analyse this URL without the terminal UI and print the insights
    #[arg(short, long)]
    pub url: Option<String>,

    /// Base URL of the pricing-insights service
    #[arg(long, env = "INSIGHTS_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Delay between status polls, in milliseconds
    #[arg(
        long,
        env = "INSIGHTS_POLL_INTERVAL_MS",
        default_value_t = 2000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_ms: u64,

    /// Give up after this many pending polls (default: keep polling)
    #[arg(long, env = "INSIGHTS_MAX_POLLS", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_polls: Option<u32>,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: u64,

    /// Log file used while the terminal UI is running
    #[arg(long, env = "INSIGHTS_LOG_FILE", default_value = "insights.log")]
    pub log_file: PathBuf,

    /// With --url, also append the log to --log-file
    #[arg(long)]
    pub log_to_file: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, env = "INSIGHTS_LOG_LEVEL", default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_polls: self.max_polls,
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ApiSettings::default()
        }
    }

    /// The terminal UI owns the screen, so it logs to a file; headless runs
    /// log to stderr to keep stdout for the report.
    pub fn log_destination(&self, headless: bool) -> LogDestination {
        match (headless, self.log_to_file) {
            (false, _) => LogDestination::File(self.log_file.clone()),
            (true, false) => LogDestination::Stderr,
            (true, true) => LogDestination::Both(self.log_file.clone()),
        }
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level '{raw}'"))
}
