mod cli;
mod error;
mod output;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fundscope_core::{EdgarConfig, LookupPipeline, ReqwestHttpClient, Throttle};

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut config = match cli.user_agent.as_deref() {
        Some(user_agent) => EdgarConfig::new(user_agent),
        None => EdgarConfig::default(),
    };
    config = config
        .with_timeout(Duration::from_millis(cli.timeout_ms))
        .with_throttle(Throttle::new(Duration::from_millis(cli.delay_ms)));

    tracing::info!(
        identifier = %cli.identifier,
        sort = cli.sort.as_param(),
        "starting lookup"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        let http = Arc::new(ReqwestHttpClient::new());
        let pipeline = LookupPipeline::new(http, config);
        pipeline.run(&cli.identifier, cli.sort.as_param()).await
    });

    output::render(&result, cli.format, cli.pretty, cli.limit)?;

    if let Some(message) = result.error {
        return Err(CliError::Lookup(message));
    }

    Ok(())
}
