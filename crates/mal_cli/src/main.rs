use anyhow::Context;
use clap::Parser;
use mal_scrapers::logging::init_logging;
use mal_scrapers::{handle_command, MyAnimeListScraper, ScraperArgs};
use mal_web::{AppState, DEFAULT_MAX_PAGE};
use std::net::{IpAddr, SocketAddr};

#[derive(Parser, Debug)]
#[command(author, version, about = "JSON API over MyAnimeList news", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the news API over HTTP
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, short, env = "PORT", default_value_t = 3000)]
        port: u16,
        /// Listing pages above this are rejected with 400
        #[arg(long, env = "MAX_PAGE", default_value_t = DEFAULT_MAX_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
        max_page: u32,
    },
    /// Fetch once and print the extracted JSON
    Scrape(ScraperArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, max_page } => {
            let state = AppState::new(max_page).context("failed to build the page fetcher")?;
            logger.info(&format!("🦗 Serving MyAnimeList news (max page {})", max_page));
            mal_web::serve(state, SocketAddr::new(host, port))
                .await
                .with_context(|| format!("server on {}:{} stopped", host, port))?;
        }
        Commands::Scrape(args) => {
            let scraper = MyAnimeListScraper::new().context("failed to build the page fetcher")?;
            let mut stdout = std::io::stdout().lock();
            handle_command(args, &scraper, &mut stdout).await?;
        }
    }

    Ok(())
}
