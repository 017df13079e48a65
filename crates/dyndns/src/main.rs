// # dyndns - Dynamic DNS updater
//
// Thin command-line layer over dyndns-core. It is responsible for:
// 1. Reading client configuration from environment variables
// 2. Initializing logging
// 3. Parsing the `action key=value...` command line
// 4. Running one action on a single-threaded runtime
// 5. Mapping the outcome to an exit code
//
// ## Usage
//
// ```bash
// dyndns list token=<T>
// dyndns listRecords token=<T> zone=<Z>
// dyndns ip
// dyndns update token=<T> zone=<Z> hostname=<H>
// ```
//
// ## Configuration
//
// - `DYNDNS_API_BASE`: DNS provider API base URL
// - `DYNDNS_IP_LOOKUP_URL`: IP echo endpoint
// - `DYNDNS_API_TIMEOUT_SECS`: Provider request timeout in seconds
// - `DYNDNS_IP_TIMEOUT_SECS`: IP lookup timeout in seconds
// - `DYNDNS_LOG_LEVEL`: trace, debug, info, warn or error (logs go to stderr)

use anyhow::Result;
use dyndns_core::config::ClientConfig;
use dyndns_core::{Dispatcher, InvocationParams};
use dyndns_ip_http::HttpIpResolver;
use dyndns_provider_netlify::NetlifyClient;
use std::env;
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "\
usage:
  dyndns list token=<token>
  dyndns listRecords token=<token> zone=<zone>
  dyndns ip
  dyndns update token=<token> zone=<zone> hostname=<hostname>";

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DyndnsExitCode {
    /// The action completed, or stopped on a missing parameter
    Success = 0,
    /// Unknown action or invalid configuration
    UsageError = 1,
    /// Network, decode or provider failure while running the action
    RuntimeError = 2,
}

impl From<DyndnsExitCode> for ExitCode {
    fn from(code: DyndnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&dyndns_core::Error> for DyndnsExitCode {
    fn from(err: &dyndns_core::Error) -> Self {
        if matches!(err, dyndns_core::Error::Precondition(_)) {
            DyndnsExitCode::Success
        } else if err.is_usage() {
            DyndnsExitCode::UsageError
        } else {
            DyndnsExitCode::RuntimeError
        }
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    client: ClientConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ClientConfig::default();

        let client = ClientConfig {
            api_base: lookup("DYNDNS_API_BASE").unwrap_or(defaults.api_base),
            ip_lookup_url: lookup("DYNDNS_IP_LOOKUP_URL").unwrap_or(defaults.ip_lookup_url),
            api_timeout_secs: parse_secs(&lookup, "DYNDNS_API_TIMEOUT_SECS")?
                .unwrap_or(defaults.api_timeout_secs),
            ip_timeout_secs: parse_secs(&lookup, "DYNDNS_IP_TIMEOUT_SECS")?
                .unwrap_or(defaults.ip_timeout_secs),
        };

        Ok(Self {
            client,
            log_level: lookup("DYNDNS_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.client.validate()?;

        if parse_level(&self.log_level).is_none() {
            anyhow::bail!(
                "DYNDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            );
        }

        Ok(())
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} must be a number of seconds. Got: {}", key, raw)),
    }
}

fn parse_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DyndnsExitCode::UsageError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return DyndnsExitCode::UsageError.into();
    }

    // Initialize tracing; stdout is reserved for command output
    let log_level = parse_level(&config.log_level).unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DyndnsExitCode::UsageError.into();
    }

    let params = match InvocationParams::from_args(env::args().skip(1)) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return DyndnsExitCode::UsageError.into();
        }
    };

    // Every step awaits the previous one, so a single thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DyndnsExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(&config, &params).await {
            Ok(()) => DyndnsExitCode::Success,
            // Precondition messages are command output, not failures
            Err(e @ dyndns_core::Error::Precondition(_)) => {
                println!("{}", e);
                DyndnsExitCode::from(&e)
            }
            Err(e) => {
                eprintln!("{}", e);
                DyndnsExitCode::from(&e)
            }
        }
    });

    code.into()
}

/// Build the HTTP collaborators and run the requested action
async fn run(config: &Config, params: &InvocationParams) -> dyndns_core::Result<()> {
    debug!("Client configuration: {:?}", config.client);

    let ip_resolver = HttpIpResolver::from_config(&config.client)?;
    let zone_client = NetlifyClient::from_config(&config.client)?;
    let dispatcher = Dispatcher::new(Box::new(ip_resolver), Box::new(zone_client));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatcher.run(params, &mut out).await
}
