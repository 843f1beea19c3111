use anyhow::{Context as _, Result};
use clap::Parser;
use pscan::cli::Cli;
use pscan::output;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = cli.context().context("failed to load configuration")?;
    tracing::debug!(hosts_file = %ctx.hosts_file.display(), "using host list");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli.command.execute(&mut out, &ctx).await?;

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins when set; otherwise the level follows
/// `-v`/`--quiet`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter),
        )
        .init();
}
