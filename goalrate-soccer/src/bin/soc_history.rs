use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use goalrate::rate::RateGrid;
use goalrate::timed::Timed;
use goalrate_soccer::data::{fetch, CsvFiles, FootballData, MatchSource};
use goalrate_soccer::domain::{Bookmaker, League, Season};
use goalrate_soccer::fit::derive;
use goalrate_soccer::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// league code, e.g., E0 for the English Premier League
    #[clap(short = 'l', long)]
    league: League,

    /// season, given by the year in which it ends; may be repeated
    #[clap(short = 's', long = "season", required = true)]
    seasons: Vec<Season>,

    /// bookmaker whose match odds to use
    #[clap(short = 'b', long, default_value_t = Bookmaker::default())]
    bookmaker: Bookmaker,

    /// read a season from a local CSV file instead of downloading it; one per season, in order
    #[clap(short = 'f', long = "file")]
    files: Vec<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.files.is_empty() && self.files.len() != self.seasons.len() {
            bail!(
                "{} files specified for {} seasons; either specify one file per season or none",
                self.files.len(),
                self.seasons.len()
            );
        }
        for (index, season) in self.seasons.iter().enumerate() {
            if self.seasons[..index].contains(season) {
                bail!("season {season} specified more than once");
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let source: Box<dyn MatchSource> = if args.files.is_empty() {
        Box::new(FootballData::new()?)
    } else {
        Box::new(CsvFiles::new(&args.seasons, args.files.clone()))
    };
    let table = fetch(source.as_ref(), &args.league, &args.seasons).await?;
    info!("fetched {} matches across {} seasons", table.len(), args.seasons.len());

    let grid = RateGrid::default();
    let derivation = Timed::result(|| derive(table, &args.bookmaker, &grid))?;
    info!(
        "fitted {} of {} matches in {:.3}s",
        derivation.value.fitted(),
        derivation.value.table.len(),
        derivation.elapsed_secs()
    );
    let derivation = derivation.value;

    println!("{}", Console::default().render(&print::tabulate_derivation(&derivation)));
    println!("Summary:\n{}", Console::default().render(&print::tabulate_summary(&derivation)));
    Ok(())
}
