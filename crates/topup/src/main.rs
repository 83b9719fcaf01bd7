#![doc = include_str!("../README.md")]

use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use topup_cli::install_color_eyre;
use topup_core::Client;
use tracing_subscriber::{
    EnvFilter, prelude::__tracing_subscriber_SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::{command::*, render::CommandResult};

mod bill;
mod card;
mod command;
mod config;
mod render;
mod validate;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - if RUST_LOG is provided at compile time
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(
            option_env!("RUST_LOG")
                .unwrap_or("info")
                .parse()
                .expect("should provide valid log level at compile time."),
        )
        // parse directives from the RUST_LOG environment variable,
        // overriding the default directive for matching targets.
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    install_color_eyre(cli.color)?;
    let render_config = render::RenderConfig::new(&cli);

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()?;
        return Ok(());
    };

    let settings = config::load_settings(cli.config.as_deref())?;
    let client = Client::new(Some(settings))?;

    let result = process_commands(command, &client).await;

    // Render the result of the command
    render_config.render_result(result)
}

async fn process_commands(command: Commands, client: &Client) -> CommandResult {
    match command {
        Commands::Bill(args) => args.run(client).await,
        Commands::Pin(args) => args.run(client).await,
        Commands::Encode(args) => args.run(client).await,
        Commands::Decode(args) => args.run(client).await,
    }
}
