use std::io::Write;

use clap::{Args, Subcommand};
use mal_core::{ContentMode, Result, Scraper};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Print the summaries of one listing page as JSON
    List {
        /// Listing page to fetch, starting at 1
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Print a single article as JSON
    Article {
        /// News id, the last path segment of an article link
        id: String,
        /// How to render the article body
        #[arg(long, value_enum, default_value_t = ContentMode::Html)]
        format: ContentMode,
    },
}

pub async fn handle_command<W: Write>(args: ScraperArgs, scraper: &dyn Scraper, out: &mut W) -> Result<()> {
    match args.command {
        ScraperCommands::List { page } => {
            let records = scraper.scrape_listing(page).await?;
            write_json(out, &records)?;
        }
        ScraperCommands::Article { id, format } => {
            let article = scraper.scrape_article(&id, format).await?;
            write_json(out, &article)?;
        }
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
