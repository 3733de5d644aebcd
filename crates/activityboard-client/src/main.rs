//! activityboard CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use activityboard_client::api::ApiClient;
use activityboard_client::board::ActivityBoard;
use activityboard_client::cli::{Cli, Command, ConfigAction};
use activityboard_client::commands::{self, board::Printer};
use activityboard_client::config::ClientConfig;
use activityboard_client::confirm::{AlwaysConfirm, Confirm, TerminalConfirm};
use activityboard_client::error::ClientResult;
use activityboard_core::{BoardFormatter, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let mut config = if cli.config.is_some() {
        ClientConfig::load_from(&config_path)?
    } else {
        ClientConfig::load()?
    };
    apply_overrides(&mut config, &cli);

    if let Err(e) = init_tracing(cli.log_format.tracing_config(config.debug)) {
        eprintln!("warning: {}", e);
    }
    debug!(base_url = %config.server.base_url, "configuration loaded");

    match cli.command.unwrap_or(Command::List) {
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
        Command::List => {
            let (board, printer) = connect(&config, false)?;
            commands::board::list(&board, &printer).await
        }
        Command::Show { name } => {
            let (board, printer) = connect(&config, false)?;
            commands::board::show(board.api(), &printer, &name).await
        }
        Command::Signup { activity, email } => {
            let (board, printer) = connect(&config, false)?;
            commands::board::signup(&board, &printer, &activity, &email).await
        }
        Command::Remove {
            activity,
            email,
            yes,
        } => {
            let (board, printer) = connect(&config, yes)?;
            commands::board::remove(&board, &printer, &activity, &email).await
        }
    }
}

fn apply_overrides(config: &mut ClientConfig, cli: &Cli) {
    if cli.debug {
        config.debug = true;
    }
    if let Some(ref url) = cli.base_url {
        config.server.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.server.timeout = timeout;
    }
    if let Some(max) = cli.max_description_length {
        config.display.max_description_length = Some(max);
    }
    if let Some(format) = cli.output_format() {
        config.display.format = format;
    }
}

fn connect(config: &ClientConfig, assume_yes: bool) -> ClientResult<(ActivityBoard, Printer)> {
    let api = ApiClient::new(config.server.url()?, config.server.request_timeout())?;
    let confirm: Arc<dyn Confirm> = if assume_yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(TerminalConfirm)
    };
    let board = ActivityBoard::new(api)
        .with_confirm(confirm)
        .with_message_timeout(config.display.message_timeout());
    let printer = Printer::new(
        BoardFormatter::new(config.display.format_options()),
        config.display.format,
    );
    Ok((board, printer))
}
