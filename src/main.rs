//! cwl-inputs-parser CLI Entry Point
//!
//! Extracts the declared inputs of a CWL workflow as JSON, either as a
//! one-shot command or as a REST API server.
//!
//! # Usage
//!
//! ```bash
//! # One-shot: print the input fields of a workflow
//! cwl-inputs-parser workflow.cwl
//!
//! # Remote documents work too
//! cwl-inputs-parser https://example.com/workflow.cwl
//!
//! # Run the REST API server
//! cwl-inputs-parser --server --host 0.0.0.0 --port 8080
//! ```

use std::env;
use std::process::ExitCode;

use log::{error, info};

use cwl_inputs_parser::{create_router, inputs_from_location, APP_NAME, VERSION};

/// Default host for the REST API server.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port for the REST API server.
const DEFAULT_PORT: u16 = 8080;

/// Command-line configuration parsed from arguments.
#[derive(Debug)]
struct Config {
    workflow_location: Option<String>,
    server: bool,
    host: String,
    port: u16,
    debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow_location: None,
            server: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("CWL Workflow Inputs Extractor");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: cwl-inputs-parser [OPTIONS] [WORKFLOW_LOCATION]");
    println!();
    println!("Arguments:");
    println!("  [WORKFLOW_LOCATION]  Path or URL of the workflow file");
    println!();
    println!("Options:");
    println!("  -s, --server        Run in REST API server mode");
    println!("      --host HOST     Host name of the REST API server (default: {})", DEFAULT_HOST);
    println!("      --port PORT     Port number of the REST API server (default: {})", DEFAULT_PORT);
    println!("  -d, --debug         Enable debug logging (also via DEBUG env var)");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!();
    println!("Examples:");
    println!("  cwl-inputs-parser workflow.cwl");
    println!("  cwl-inputs-parser https://example.com/workflow.cwl");
    println!("  cwl-inputs-parser --server --port 1121");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut positional_index = 0;
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--server" | "-s" => {
                config.server = true;
            }
            "--debug" | "-d" => {
                config.debug = true;
            }
            "--host" => {
                i += 1;
                if i >= args.len() {
                    return Err("--host requires a host argument".to_string());
                }
                config.host = args[i].clone();
            }
            "--port" => {
                i += 1;
                if i >= args.len() {
                    return Err("--port requires a number argument".to_string());
                }
                config.port = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid port value: {}", args[i]))?;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                // Positional argument
                match positional_index {
                    0 => config.workflow_location = Some(arg.clone()),
                    _ => return Err(format!("Unexpected argument: {}", arg)),
                }
                positional_index += 1;
            }
        }
        i += 1;
    }

    Ok(config)
}

/// True when the DEBUG environment variable is set to a truthy value.
fn debug_env_enabled() -> bool {
    match env::var("DEBUG") {
        Ok(val) => !matches!(
            val.to_lowercase().as_str(),
            "" | "false" | "no" | "n" | "0"
        ),
        Err(_) => false,
    }
}

/// Runs the REST API server until interrupted.
async fn run_server(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    print_banner();

    let app = create_router();

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("Server listening on {}:{}", host, port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Main application entry point.
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    // Setup logging
    setup_logging(config.debug || debug_env_enabled());

    if config.server {
        return run_server(&config.host, config.port).await;
    }

    // One-shot mode
    let Some(location) = config.workflow_location else {
        eprintln!("Error: The location of the workflow file is not specified.");
        eprintln!();
        print_usage();
        return Err("missing workflow location".into());
    };

    info!("Loading workflow: {}", location);
    let fields = inputs_from_location(&location).await.map_err(|e| {
        error!("Failed to parse workflow inputs: {}", e);
        e
    })?;

    info!("Extracted {} input field(s)", fields.len());
    println!("{}", serde_json::to_string_pretty(&fields)?);

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
