mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

/// Log filter for a verbosity count, unless `RUST_LOG` is set
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "piratedb=debug,piratedb_db=debug,piratedb_cli=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let explicit = cli.config.as_deref();

    match cli.command {
        Commands::Build {
            archive,
            output,
            locale,
        } => {
            let config = Config::load(explicit)?;
            commands::build::handle(&config, &archive, output, locale)?;
        }

        Commands::Classify { archive, path } => {
            let config = Config::load(explicit)?;
            commands::classify::handle(&config, &archive, &path)?;
        }

        Commands::Scan { archive, json } => {
            let config = Config::load(explicit)?;
            commands::scan::handle(&config, &archive, json)?;
        }

        Commands::Config { show, init } => {
            commands::configure::handle(explicit, show, init)?;
        }
    }

    Ok(())
}
