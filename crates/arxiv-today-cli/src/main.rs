use std::{
  io::{self, Write},
  path::PathBuf,
};

use arxiv_today::{
  clients::{ArxivClient, DeepLClient, Translate},
  config::{Credentials, DigestConfig},
  digest::{build_digest, yesterday},
};
use chrono::NaiveDate;
use clap::{builder::ArgAction, Parser};
use console::{style, Emoji};
use errors::ArxivTodayErrors;
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod errors;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Parser)]
#[command(author, version, about = "Digest of yesterday's arXiv submissions, with translated abstracts")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// DeepL credentials file (defaults to the user config directory)
  #[arg(long, short)]
  credentials: Option<PathBuf>,

  /// Settings file overriding categories and limits
  #[arg(long, short)]
  settings: Option<PathBuf>,

  /// Day to report on, as YYYY-MM-DD (defaults to yesterday, UTC)
  #[arg(long, short)]
  date: Option<NaiveDate>,

  /// Skip translation; no credentials are needed
  #[arg(long)]
  no_translate: bool,
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

#[tokio::main]
async fn main() -> Result<(), ArxivTodayErrors> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config = DigestConfig::resolve(cli.settings.as_deref())?;
  debug!("Settings: {config:?}");

  let translator = if cli.no_translate {
    eprintln!("{} Translation disabled", style(WARNING).yellow());
    None
  } else {
    let path = cli.credentials.unwrap_or_else(Credentials::default_path);
    trace!("Using credentials at: {}", path.display());
    let credentials = Credentials::load(&path)?;
    Some(DeepLClient::new(&credentials, &config.target_lang)?)
  };

  eprintln!(
    "{} Fetching listings for {}",
    style(LOOKING_GLASS).cyan(),
    style(config.categories.join(", ")).yellow()
  );
  let records = ArxivClient::new(&config.listing_url, config.max_results)
    .fetch_all(&config.categories, config.max_authors)
    .await?;

  let date = cli.date.unwrap_or_else(yesterday);
  eprintln!(
    "{} {} papers listed, selecting those submitted on {}",
    style(BOOKS).cyan(),
    style(records.len()).yellow(),
    style(date).yellow()
  );

  if translator.is_some() {
    eprintln!(
      "{} Translating up to {} abstracts into {}",
      style(GLOBE).cyan(),
      style(config.max_translations).yellow(),
      style(&config.target_lang).yellow()
    );
  }

  let digest = build_digest(
    &records,
    date,
    config.max_translations,
    translator.as_ref().map(|t| t as &dyn Translate),
  )
  .await?;

  let mut stdout = io::stdout().lock();
  stdout.write_all(digest.render().as_bytes())?;
  stdout.flush()?;

  if !digest.is_empty() {
    eprintln!(
      "{} {} papers, {} translated",
      style(SUCCESS).green(),
      style(digest.papers).yellow(),
      style(digest.translated).yellow()
    );
  }
  Ok(())
}
