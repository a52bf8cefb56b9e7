use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use parkboard::sync::CycleOutcome;
use parkboard::{
    logging, poll_once, ApiClient, Board, ConfigError, DashboardConfig, FileSource, HtmlBoard,
    SnapshotPoller, SnapshotSource, TerminalBoard,
};

#[derive(Parser)]
#[command(name = "parkboard", version, about = "Live parking slot dashboard")]
struct Cli {
    /// Log every poll cycle
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the snapshot until interrupted
    Watch {
        #[command(flatten)]
        target: TargetArgs,

        /// Milliseconds between polls (default 5000, or PARKBOARD_INTERVAL_MS)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Fetch and draw the snapshot once
    Once {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Base URL serving data/slots.json (or PARKBOARD_URL)
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read the snapshot from a local file instead of over HTTP
    #[arg(long)]
    file: Option<PathBuf>,

    /// Snapshot path relative to the base URL
    #[arg(long)]
    snapshot_path: Option<String>,

    /// Request timeout in milliseconds (none by default)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Write an HTML page here instead of drawing in the terminal
    #[arg(long)]
    html: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Command::Watch {
            target,
            interval_ms,
        } => match build_config(&target, interval_ms) {
            Ok(config) => watch(target, config).await,
            Err(e) => Err(e),
        },
        Command::Once { target } => match build_config(&target, None) {
            Ok(config) => once(target, config).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn build_config(
    target: &TargetArgs,
    interval_ms: Option<u64>,
) -> Result<DashboardConfig, ConfigError> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(url) = &target.url {
        config.base_url = url.clone();
    }
    if let Some(path) = &target.snapshot_path {
        config.snapshot_path = path.clone();
    }
    if let Some(ms) = target.timeout_ms {
        config.timeout = Some(Duration::from_millis(ms));
    }
    if let Some(ms) = interval_ms {
        config.interval = Duration::from_millis(ms);
    }
    config.validate()?;
    Ok(config)
}

fn make_board(
    html: Option<PathBuf>,
    reload_after: Option<Duration>,
    clear_screen: bool,
) -> Box<dyn Board> {
    match html {
        Some(path) => {
            log::info!("Writing dashboard to {}", path.display());
            Box::new(HtmlBoard::new(path, reload_after))
        }
        None => Box::new(TerminalBoard::new(std::io::stdout(), clear_screen)),
    }
}

async fn watch(target: TargetArgs, config: DashboardConfig) -> Result<ExitCode, ConfigError> {
    let board = make_board(target.html.clone(), Some(config.interval), true);
    match target.file {
        Some(path) => Ok(watch_source(FileSource::new(path), board, config.interval).await),
        None => {
            let api = ApiClient::from_config(&config)?;
            Ok(watch_source(api, board, config.interval).await)
        }
    }
}

async fn watch_source<S: SnapshotSource>(
    source: S,
    board: Box<dyn Board>,
    interval: Duration,
) -> ExitCode {
    let handle = SnapshotPoller::start(source, Arc::new(Mutex::new(board)), interval);

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
    }

    let status = handle.stop().await;
    log::info!("Watch mode interrupted after {} cycles", status.cycles);
    ExitCode::SUCCESS
}

async fn once(target: TargetArgs, config: DashboardConfig) -> Result<ExitCode, ConfigError> {
    let board = Mutex::new(make_board(target.html.clone(), None, false));
    let outcome = match target.file {
        Some(path) => poll_once(&FileSource::new(path), &board).await,
        None => poll_once(&ApiClient::from_config(&config)?, &board).await,
    };

    Ok(match outcome {
        CycleOutcome::Rendered { .. } => ExitCode::SUCCESS,
        CycleOutcome::Failed { .. } => ExitCode::FAILURE,
    })
}
