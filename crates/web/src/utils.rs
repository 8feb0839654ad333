use anyhow::anyhow;
use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::{debug, LevelFilter};
use std::{env, fs, net::SocketAddr, time::Duration};
use time::{format_description::well_known::Iso8601, Date, OffsetDateTime};
use trend_pipeline::{
    parse_date, today, DEFAULT_FORECAST_URL, DEFAULT_MAX_IN_FLIGHT, DEFAULT_WINDOW_SIZE,
};

#[derive(Parser, Clone, Debug, serde::Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to Settings.toml file holding the rest of the cli options
    #[arg(short, long)]
    pub config: Option<String>,

    /// Set the log level (default: info)
    #[arg(short, long)]
    pub level: Option<String>,

    /// Host to listen at (default: 127.0.0.1)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Port to listen on (default: 9100)
    #[arg(short, long)]
    pub port: Option<String>,

    /// 4-day weather forecast endpoint (default: https://api.data.gov.sg/v1/environment/4-day-weather-forecast)
    #[arg(short, long)]
    pub forecast_url: Option<String>,

    /// Number of forecasts to request, each 4 days apart (default: 8)
    #[arg(short, long)]
    pub window_size: Option<usize>,

    /// Max forecast requests in flight at once (default: 8)
    #[arg(short, long)]
    pub max_in_flight: Option<usize>,

    /// Seconds before a forecast request is abandoned (default: 30)
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn socket_addr(&self) -> Result<SocketAddr, anyhow::Error> {
        let address = format!(
            "{}:{}",
            self.domain.as_deref().unwrap_or("127.0.0.1"),
            self.port.as_deref().unwrap_or("9100")
        );
        address
            .parse()
            .map_err(|e| anyhow!("invalid listen address {}: {}", address, e))
    }

    pub fn forecast_url(&self) -> String {
        self.forecast_url
            .clone()
            .unwrap_or(String::from(DEFAULT_FORECAST_URL))
    }

    pub fn window_size(&self) -> usize {
        self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.unwrap_or(DEFAULT_MAX_IN_FLIGHT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(30))
    }
}

/// Command line options, replaced wholesale by the `--config` file when one is given.
pub fn get_config_info() -> Result<Cli, anyhow::Error> {
    let cli = Cli::parse();
    match cli.config.as_deref() {
        Some(config_path) => read_config_file(config_path),
        None => Ok(cli),
    }
}

pub fn read_config_file(config_path: &str) -> Result<Cli, anyhow::Error> {
    let content = fs::read_to_string(config_path)
        .map_err(|e| anyhow!("error reading config file {}: {}", config_path, e))?;
    toml::from_str(&content)
        .map_err(|e| anyhow!("error deserializing config file {}: {}", config_path, e))
}

/// Anchor date from user input, today when missing or not `YYYY-MM-DD`.
pub fn resolve_anchor(raw: Option<&str>) -> Date {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_date(value).unwrap_or_else(|e| {
            debug!("invalid start date {:?}, using today: {}", value, e);
            today()
        }),
        None => today(),
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level = match cli.level.as_ref() {
        Some(level) => level.to_lowercase(),
        None => env::var("RUST_LOG")
            .unwrap_or_else(|_| String::from(""))
            .to_lowercase(),
    };
    match level.as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
