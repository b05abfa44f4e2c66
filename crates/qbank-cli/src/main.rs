//! QBank CLI - command-line front end for the question-bank application
//!
//! This is the composition root: it loads configuration, builds the local and
//! marketplace clients once and hands them to the command handlers.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod notify;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use notify::ConsoleNotifier;
use output::OutputWriter;
use qbank_core::{ApiClients, ClientConfig};
use std::process;
use std::sync::Arc;
use tracing::instrument;

#[tokio::main]
async fn main() {
    // Missing .env is fine
    let _ = dotenv::dotenv();

    let cli = Cli::parse_args();
    control::set_override(cli.use_color());

    let file_config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, cli.use_color()));
            process::exit(e.exit_code());
        }
    };

    let log_guard = match init_logging(&cli, &file_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let use_color = cli.use_color();
    match run(cli, file_config).await {
        Ok(()) => {}
        Err(e) => {
            if !e.already_reported() {
                eprintln!("{}", error::format_error(&e, use_color));
            }
            drop(log_guard);
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
async fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let client_config: ClientConfig = config.client_config(
        |name| std::env::var(name).ok(),
        cli.local_url.as_deref(),
        cli.market_url.as_deref(),
    );

    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet, config.output.progress);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Config(args) => handlers::handle_config(args, &config, &client_config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
        Commands::Banks(command) => {
            let clients = connect(&client_config, use_color)?;
            handlers::handle_banks(command, &clients, &mut output).await
        }
        Commands::Papers(command) => {
            let clients = connect(&client_config, use_color)?;
            handlers::handle_papers(command, &clients, &mut output).await
        }
        Commands::Results(command) => {
            let clients = connect(&client_config, use_color)?;
            handlers::handle_results(command, &clients, &mut output).await
        }
        Commands::Favorites(command) => {
            let clients = connect(&client_config, use_color)?;
            handlers::handle_favorites(command, &clients, &mut output).await
        }
        Commands::Ai(command) => {
            let clients = connect(&client_config, use_color)?;
            handlers::handle_ai(command, &clients, &mut output).await
        }
        Commands::System(command) => {
            let clients = connect(&client_config, use_color)?;
            handlers::handle_system(command, &clients, &mut output).await
        }
        Commands::Market(command) => {
            let clients = connect(&client_config, use_color)?;
            handlers::handle_market(command, &clients, &mut output).await
        }
    }
}

/// Build the clients for commands that talk to a server
fn connect(client_config: &ClientConfig, use_color: bool) -> Result<ApiClients> {
    let notifier = Arc::new(ConsoleNotifier::new(use_color));
    Ok(ApiClients::from_config(client_config, notifier)?)
}

/// Initialize the logging system
fn init_logging(
    cli: &Cli,
    config: &Config,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_file(&config.logging);
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
