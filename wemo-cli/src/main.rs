use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use soap_client::SoapClient;
use tracing::{debug, info, warn};
use wemo_api::{
    command, ApiError, CommandRequest, DispatchReport, Dispatcher, TagMatching, TargetAddress,
    DEFAULT_PACING,
};

mod logging;

use logging::LoggingMode;

/// Sends commands to Wemo devices.
///
/// Commands run in the order given, one request at a time, with a pause
/// between requests. The first failure stops the batch.
#[derive(Parser, Debug)]
#[command(name = "wemo")]
#[command(version)]
pub struct Args {
    /// IP address of the target device
    #[arg(short, long, env = "WEMO_IP")]
    pub ip: String,

    /// Port of the target device
    #[arg(short, long, env = "WEMO_PORT", default_value = "49153")]
    pub port: String,

    #[arg(
        short,
        long = "command",
        value_name = "COMMAND",
        help = format!(
            "Command(s) to send to the target device; possible commands: {}",
            command::COMMAND_HELP
        )
    )]
    pub commands: Vec<String>,

    /// Pause between consecutive commands, in milliseconds
    #[arg(long, env = "WEMO_DELAY_MS", default_value_t = DEFAULT_PACING.as_millis() as u64)]
    pub delay_ms: u64,

    /// Overall HTTP timeout per command, in seconds (default: 5s connect, 10s read)
    #[arg(long, env = "WEMO_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Accept the first known value element in a reply, whatever the command
    #[arg(long)]
    pub lenient_tags: bool,

    /// Log output mode
    #[arg(long, env = "WEMO_LOG_MODE", value_enum, default_value_t = LoggingMode::default())]
    pub log: LoggingMode,
}

/// Validated run configuration
#[derive(Debug)]
pub struct RunConfig {
    pub target: TargetAddress,
    pub requests: Vec<CommandRequest>,
    pub pacing: Duration,
    pub timeout: Option<Duration>,
    pub matching: TagMatching,
}

impl Args {
    /// Validate arguments and resolve every command before any network activity
    pub fn to_config(&self) -> wemo_api::Result<RunConfig> {
        let target = TargetAddress::parse(&self.ip, &self.port)?;
        let requests = command::resolve_all(&self.commands)?;

        Ok(RunConfig {
            target,
            requests,
            pacing: Duration::from_millis(self.delay_ms),
            timeout: self.timeout_secs.map(Duration::from_secs),
            matching: if self.lenient_tags {
                TagMatching::Any
            } else {
                TagMatching::Expected
            },
        })
    }
}

impl RunConfig {
    fn log(&self) {
        debug!("Configuration:");
        debug!("  Target: {}", self.target);
        debug!("  Commands: {}", self.requests.len());
        debug!("  Pacing: {:?}", self.pacing);
        debug!("  Timeout: {:?}", self.timeout);
        debug!("  Tag matching: {:?}", self.matching);
    }
}

fn run(config: &RunConfig) -> Result<DispatchReport> {
    config.log();

    if config.requests.is_empty() {
        warn!("No commands given; nothing to send");
    }

    let client = match config.timeout {
        Some(timeout) => SoapClient::with_timeout(timeout),
        None => SoapClient::new(),
    };
    let dispatcher = Dispatcher::new(client)
        .with_pacing(config.pacing)
        .with_tag_matching(config.matching);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = dispatcher.run(&config.target, &config.requests, &mut out)?;
    Ok(report)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.log).context("Logging setup failed") {
        eprintln!("{:#}", e);
    }

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            report_input_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(report) => {
            info!(
                endpoint = %report.endpoint,
                completed = report.completed,
                "All commands completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn report_input_error(error: &ApiError) {
    eprintln!("{}", error);
    eprintln!("Try `wemo --help' for more information.");
}
