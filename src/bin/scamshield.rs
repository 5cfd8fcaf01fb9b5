//! ScamShield CLI binary.
//!
//! LLM-backed security risk analysis.
//!
//! # Commands
//!
//! - `analyze` - Analyze a URL, email, transaction, code snippet or password
//! - `modes` - List analysis modes
//! - `server` - Start the HTTP analysis server

use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use scamshield::{
    analysis::{require_input, AnalysisMode, Analyzer, ScanReport},
    config::Config,
    inference::{GeminiBackend, InferenceBackend},
    server::{serve, AppState, ServerConfig, SharedBackend},
    VERSION,
};

#[derive(Parser)]
#[command(name = "scamshield")]
#[command(version = VERSION)]
#[command(about = "ScamShield - LLM-backed security risk analysis", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/scamshield/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a submission
    Analyze {
        /// Mode: url, email, transaction, code, password
        mode: String,

        /// Input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Analyze the mode's sample input
        #[arg(long, conflicts_with_all = ["input", "file"])]
        sample: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List analysis modes
    Modes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP analysis server
    Server {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,

        /// Disable CORS
        #[arg(long)]
        no_cors: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Analyze {
            mode,
            input,
            file,
            sample,
            json,
        } => cmd_analyze(cli.config, &mode, input, file, sample, json),

        Commands::Modes { json } => cmd_modes(json),

        Commands::Server {
            port,
            host,
            bind_all,
            no_cors,
        } => cmd_server(cli.config, port, host, bind_all, no_cors),
    }
}

fn init_logging(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_analyzer(config: &Config) -> anyhow::Result<Analyzer<SharedBackend>> {
    let backend: SharedBackend = Arc::new(GeminiBackend::from_config(&config.backend)?);
    Ok(Analyzer::new(backend).with_model(config.backend.model.clone()))
}

fn cmd_analyze(
    config_path: Option<PathBuf>,
    mode: &str,
    input: Option<String>,
    file: Option<PathBuf>,
    sample: bool,
    json_output: bool,
) -> anyhow::Result<()> {
    let mode = AnalysisMode::from_str(mode)?;
    let content = if sample {
        mode.sample_input().to_string()
    } else {
        read_input(input, file)?
    };
    let content = require_input(&content)?;

    let config = Config::load(config_path.as_deref())?;
    let analyzer = build_analyzer(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(analyzer.scan(mode, content));

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ScanReport) {
    let result = &report.result;

    println!("{}", report.mode.title());
    println!();
    println!("  Verdict:       {}", result.risk_level);
    println!(
        "  Safety Score:  {}/100 ({:?})",
        result.score,
        report.safety_band
    );
    println!();
    println!("Analysis Summary:");
    println!("  {}", result.summary);

    if !result.details.is_empty() {
        println!();
        println!("Technical Details:");
        for detail in &result.details {
            println!("  - {detail}");
        }
    }

    println!();
    println!("Recommendation:");
    println!("  {}", result.recommendation);
    println!();
    println!(
        "SCAN_ID: {}  TIME: {}",
        report.scan_id,
        report.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn cmd_modes(json_output: bool) -> anyhow::Result<()> {
    if json_output {
        let modes: Vec<_> = AnalysisMode::ALL
            .into_iter()
            .map(|mode| {
                serde_json::json!({
                    "mode": mode,
                    "title": mode.title(),
                    "description": mode.description(),
                    "sample": mode.sample_input(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&modes)?);
        return Ok(());
    }

    println!("{:<12} {}", "MODE", "TITLE");
    println!("{}", "-".repeat(48));
    for mode in AnalysisMode::ALL {
        println!("{:<12} {}", mode.as_str().to_lowercase(), mode.title());
        println!("{:<12} {}", "", mode.description());
    }

    Ok(())
}

fn cmd_server(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
    bind_all: bool,
    no_cors: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let mut server_config = ServerConfig::from_settings(&config.server)?;
    if bind_all {
        server_config = server_config.bind_all();
    }
    if no_cors {
        server_config = server_config.without_cors();
    }

    let analyzer = build_analyzer(&config)?;

    tracing::info!("Starting ScamShield server on {}", server_config.addr);
    tracing::info!(
        "Backend: {} (model {}, timeout {:?})",
        analyzer.backend().name(),
        analyzer.model(),
        config.backend.timeout()
    );

    let state = Arc::new(AppState::new(server_config, analyzer));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { serve(state).await.map_err(|e| anyhow::anyhow!("{}", e)) })
}

// Helper functions

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        Ok(std::fs::read_to_string(path)?)
    } else if let Some(s) = input {
        if s == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        } else {
            Ok(s)
        }
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
