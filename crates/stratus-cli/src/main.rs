//! Stratus CLI binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stratus_actor::Actor;
use stratus_api::HttpClient;
use stratus_cli::cli::{Cli, Commands};
use stratus_cli::commands::{
    BindSecurityGroupCommand, CreateAppCommand, DeleteCommand, RestartAppInstanceCommand,
    ScaleCommand, SecurityGroupsCommand, UnbindSecurityGroupCommand,
};
use stratus_cli::config::Config;
use stratus_cli::ui::Ui;
use stratus_cli::CliError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(tip) = e.suggestion() {
                eprintln!("{tip}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::load()?;
    let endpoint = config.api_endpoint(cli.api.as_deref())?;
    tracing::debug!(endpoint, "targeting API");
    let client = HttpClient::new(endpoint, config.access_token.clone())?;
    let actor = Actor::new(client);
    let mut ui = Ui::stdio();

    match cli.command {
        Commands::Scale(args) => {
            ScaleCommand::new(args)
                .execute(&actor, &config, &mut ui)
                .await
        }
        Commands::RestartAppInstance(args) => {
            RestartAppInstanceCommand::new(args)
                .execute(&actor, &config, &mut ui)
                .await
        }
        Commands::CreateApp { name } => {
            CreateAppCommand::new(name)
                .execute(&actor, &config, &mut ui)
                .await
        }
        Commands::Delete { name, force } => {
            DeleteCommand::new(name, force)
                .execute(&actor, &config, &mut ui)
                .await
        }
        Commands::BindSecurityGroup(args) => {
            BindSecurityGroupCommand::new(args)
                .execute(&actor, &config, &mut ui)
                .await
        }
        Commands::UnbindSecurityGroup(args) => {
            UnbindSecurityGroupCommand::new(args)
                .execute(&actor, &config, &mut ui)
                .await
        }
        Commands::SecurityGroups => {
            SecurityGroupsCommand::new()
                .execute(&actor, &config, &mut ui)
                .await
        }
    }
}
