//! hatecheck - Main Entry Point
//!
//! Terminal front-end for the remote hate-speech classifier.
//!
//! Usage:
//!     hatecheck health
//!     hatecheck analyze "some text to check"
//!     echo "some text" | hatecheck analyze --json
//!     hatecheck --api-url http://localhost:5000 interactive

use clap::{Parser, Subcommand};
use hatecheck::tracing::prefix;
use hatecheck_client::report;
use hatecheck_client::{
    AnalysisSession, ClassificationClient, ClientConfig, ClientError, Outcome, SubmitError,
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "hatecheck")]
#[command(about = "Classify short texts with a remote hate-speech detection service")]
#[command(version)]
struct Args {
    /// Service base URL (overrides HATECHECK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in milliseconds (overrides HATECHECK_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is up and its model is loaded
    Health,

    /// Classify one text (from the argument, or stdin when omitted)
    Analyze {
        text: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read texts line by line and classify each
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "error" => "error",
        _ => "warn",
    };
    hatecheck::tracing::init_with_filter(log_level);

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &args.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(millis) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(millis))?;
    }

    info!("{} hatecheck v{}", prefix::OPEN, env!("CARGO_PKG_VERSION"));
    info!("  API URL: {}", config.base_url);
    info!("  Timeout: {:?}", config.timeout);

    let client = Arc::new(ClassificationClient::new(config)?);

    let code = match args.command {
        Command::Health => run_health(&client).await,
        Command::Analyze { text, json } => run_analyze(&client, text, json).await?,
        Command::Interactive => run_interactive(client).await?,
    };

    info!("{} hatecheck done", prefix::CLOSE);
    Ok(code)
}

async fn run_health(client: &ClassificationClient) -> ExitCode {
    match client.check_health().await {
        Ok(health) => {
            println!("{}", report::render_health(&health));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", report::render_health_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run_analyze(
    client: &ClassificationClient,
    text: Option<String>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    match client.analyze(&text).await {
        Ok(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(result) => {
            println!("{}", report::render_result(&result));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", report::render_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

enum Event {
    Shutdown,
    Line(Option<String>),
    Resolved(Option<Outcome>),
}

async fn run_interactive(
    client: Arc<ClassificationClient>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Advisory only: a dead service does not stop the session.
    match client.check_health().await {
        Ok(health) => println!("{}", report::render_health(&health)),
        Err(e) => println!("{}", report::render_health_error(&e)),
    }

    let mut session = AnalysisSession::new(client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    println!("Enter text to analyze, one per line (Ctrl+D to quit)");

    loop {
        let busy = session.is_busy();
        let event = tokio::select! {
            _ = &mut shutdown => Event::Shutdown,
            outcome = session.next_outcome(), if busy => Event::Resolved(outcome),
            line = lines.next_line() => Event::Line(line?),
        };

        match event {
            Event::Shutdown => break,
            Event::Resolved(outcome) => print_outcome(outcome),
            Event::Line(Some(line)) => match session.submit(&line) {
                Ok(id) => println!("🔄 Analyzing... (#{})", id),
                Err(SubmitError::Busy(id)) => {
                    println!("⏳ Still analyzing #{}, try again when it finishes", id)
                }
                Err(SubmitError::Rejected(e)) => {
                    println!("{}", report::render_error(&ClientError::from(e)))
                }
            },
            Event::Line(None) => {
                // stdin closed: let the outstanding call finish unless a signal comes first
                print_outcome(session.drain_until(&mut shutdown).await);
                break;
            }
        }
    }

    if let Some(id) = session.cancel() {
        info!("Cancelled request #{} on shutdown", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_outcome(outcome: Option<Outcome>) {
    let Some(outcome) = outcome else {
        return;
    };
    match outcome.result {
        Ok(result) => println!("[#{}] {}", outcome.id, report::render_result(&result)),
        Err(e) => println!("[#{}] {}", outcome.id, report::render_error(&e)),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
