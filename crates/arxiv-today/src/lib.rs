//! A library for building a daily digest of arXiv submissions, with abstracts optionally
//! translated through the DeepL API.
//!
//! The pipeline is linear: listings are fetched per category, parsed into [`Record`]s, filtered
//! to the target day and formatted into a [`Digest`].
//!
//! # Example
//! ```rust,no_run
//! use arxiv_today::{
//!   clients::{ArxivClient, DeepLClient},
//!   config::{Credentials, DigestConfig},
//!   digest::{build_digest, yesterday},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let config = DigestConfig::default();
//!   let credentials = Credentials::load(Credentials::default_path())?;
//!   let translator = DeepLClient::new(&credentials, &config.target_lang)?;
//!
//!   let records = ArxivClient::new(&config.listing_url, config.max_results)
//!     .fetch_all(&config.categories, config.max_authors)
//!     .await?;
//!
//!   let digest =
//!     build_digest(&records, yesterday(), config.max_translations, Some(&translator)).await?;
//!   print!("{}", digest.render());
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod clients;
pub mod config;
pub mod digest;
pub mod errors;
pub mod format;
pub mod parser;
pub mod record;

use clients::Translate;
use errors::DigestError;
pub use digest::Digest;
pub use record::{Record, Records};
