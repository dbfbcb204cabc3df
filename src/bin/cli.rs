//! Citation profile scraper CLI
//!
//! Scrapes the configured profile and prints the rendered publication list.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scholar::{
    error::Result,
    models::Config,
    pipeline,
    render::OutputFormat,
    services::IdentifierResolver,
    utils::http,
};

/// scholar - Citation profile to publication list
#[derive(Parser, Debug)]
#[command(
    name = "scholar",
    version,
    about = "Render a citation profile as a publication list"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the profile and render the publication list
    Scrape {
        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (html or json), overriding the config
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Skip DOI lookups
        #[arg(long)]
        no_lookup: bool,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Scrape {
            output,
            format,
            no_lookup,
        } => {
            if let Some(format) = format {
                config.render.format = format;
            }
            if no_lookup {
                config.lookup.contact = None;
            }
            config.validate()?;

            let client = http::create_client(&config.profile)?;
            let mut resolver = IdentifierResolver::from_config(&config.lookup, client.clone());

            let collection = pipeline::run_scrape(&config, &client, &mut resolver).await?;
            let rendered = pipeline::render_output(&collection, &config.render)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    log::info!("Wrote {} publications to {}", collection.len(), path.display());
                }
                None => println!("{rendered}"),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!(
                "DOI lookup: {}",
                if config.lookup.contact().is_some() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
    }

    Ok(())
}
