//! TravelGuide binary.
//!
//! Usage:
//!   travelguide                          # serve the HTTP API
//!   travelguide --port 8080 serve
//!   travelguide --config config.toml ask "What's the weather in Paris?"
//!
//! Configuration is also read from `TRAVELGUIDE_*` environment variables,
//! e.g. `TRAVELGUIDE_SERVER__PORT=8080` or `TRAVELGUIDE_LOGGING__FORMAT=json`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use travelguide::{Coordinator, TravelGuideConfig, TravelGuideError, telemetry, web};

enum Command {
    Serve,
    Ask(String),
    Help,
}

struct Args {
    config_path: Option<PathBuf>,
    port: Option<u16>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut config_path = None;
    let mut port = None;
    let mut command = Command::Serve;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let value = args.get(i + 1).context("--config requires a file path")?;
                config_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--port" | "-p" => {
                let value = args.get(i + 1).context("--port requires a number")?;
                port = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid port number '{value}'"))?,
                );
                i += 1;
            }
            "--help" | "-h" | "help" => {
                command = Command::Help;
                break;
            }
            "serve" => command = Command::Serve,
            "ask" => {
                let query = args[i + 1..].join(" ");
                if query.trim().is_empty() {
                    bail!("ask requires a query, e.g. ask \"What can I see in Rome?\"");
                }
                command = Command::Ask(query);
                break;
            }
            other => bail!("Unknown argument '{other}'. Try --help"),
        }
        i += 1;
    }

    Ok(Args {
        config_path,
        port,
        command,
    })
}

fn print_help() {
    println!("TravelGuide - multi-agent tourism assistant");
    println!();
    println!("Usage: travelguide [OPTIONS] [serve | ask <QUERY>...]");
    println!();
    println!("Commands:");
    println!("  serve                    Run the HTTP API (default)");
    println!("  ask <QUERY>...           Answer one question and exit");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>      Path to config.toml file");
    println!("  -p, --port <PORT>        Port to listen on (default: 3000)");
    println!("  -h, --help               Show this help message");
    println!();
    println!("Environment variables:");
    println!("  TRAVELGUIDE_SERVER__PORT       Port to listen on");
    println!("  TRAVELGUIDE_LOGGING__LEVEL     error, warn, info, debug or trace");
    println!("  TRAVELGUIDE_LOGGING__FORMAT    pretty or json");
    println!("  RUST_LOG                       Overrides the configured log filter");
}

async fn run(args: Args) -> Result<bool> {
    let mut config = TravelGuideConfig::load_from_path(args.config_path)?;
    if let Some(port) = args.port {
        config.server.port = port;
        config.validate()?;
    }

    let _telemetry = telemetry::init(&config.logging)?;
    let coordinator = Arc::new(
        Coordinator::from_config(&config).with_context(|| "Failed to set up agents")?,
    );

    match args.command {
        Command::Serve => {
            tracing::info!("Starting TravelGuide v{}", travelguide::VERSION);
            web::run(&config.server, coordinator).await?;
            Ok(true)
        }
        Command::Ask(query) => {
            let reply = coordinator.process_query(&query).await;
            println!("{}", reply.message);
            Ok(reply.success)
        }
        Command::Help => {
            print_help();
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(2);
        }
    };

    if matches!(args.command, Command::Help) {
        print_help();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            match e.downcast_ref::<TravelGuideError>() {
                Some(app_error) => eprintln!("Error: {}", app_error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            tracing::debug!("Detailed error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
