use std::io::Write;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod error;
mod model;
mod render;
mod report;

use error::BuildError;

pub type Result<T> = anyhow::Result<T>;

/// Environment variable holding the group API token.
const TOKEN_VAR: &str = "DESCHTIMES_TOKEN";

#[derive(Parser)]
#[command(name = "deschtimes-status")]
#[command(about = "Deschtimes group status page builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the status page and print it to stdout.
    Build {
        /// API host to fetch the group document from.
        #[arg(long, default_value = api::DEFAULT_HOST)]
        host: String,
    },
}

fn main() -> Result<()> {
    // stdout carries the page, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Build { host } => {
            // 1) Configuration: the token must be present before any
            //    network call is attempted.
            let token =
                std::env::var(TOKEN_VAR).map_err(|_| BuildError::Config { name: TOKEN_VAR })?;
            let build_time = Utc::now();

            // 2) Fetch the group document and hydrate the tree.
            let group = api::fetch_group(&host, &token)?;
            info!(group = %group.name, shows = group.shows.len(), "group hydrated");

            // 3) Aggregate into the Markdown status document.
            let markdown = report::build_report(&group, build_time);

            // 4) Render and emit the page in a single write.
            let page = render::render_page(&markdown);
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(page.as_bytes())
                .map_err(BuildError::Render)?;
        }
    }

    Ok(())
}
