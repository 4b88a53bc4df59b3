use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod scraper;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scrape(args) => {
            let config = args.to_config()?;
            let summary = commands::run_scrape(&config, &args.output, args.xlsx.as_deref())?;
            println!(
                "Scraping complete. {} unique properties from {} pages saved to {} ({} duplicates removed)",
                summary.unique,
                summary.pages_fetched,
                args.output.display(),
                summary.removed
            );
        }
        Commands::GroupAgents(args) => {
            let report = commands::run_group_agents(
                &args.input,
                &args.output,
                &args.summary,
                args.xlsx.as_deref(),
            )?;

            for group in &report.groups {
                let names: Vec<&str> = group.names.iter().map(String::as_str).collect();
                println!("{}: {}", group.key, names.join(", "));
            }
            println!(
                "\n{} properties in {} agent groups",
                report.rows,
                report.summary.len()
            );
        }
        Commands::Serve(args) => commands::run_server(args.root, args.port)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
