//! Clients for the two remote services the digest talks to.
//!
//! - [`arxiv`] - Fetches category listings from the arXiv API
//! - [`deepl`] - Translates abstracts through the DeepL API
//!
//! Both use a blocking-style flow: every request is awaited before the next one is sent.
//!
//! # Examples
//!
//! ```no_run
//! use arxiv_today::clients::{ArxivClient, DeepLClient, Translate};
//! use arxiv_today::config::Credentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let records = ArxivClient::default().fetch_records("hep-th", 3).await?;
//!
//! let credentials = Credentials::load(Credentials::default_path())?;
//! let deepl = DeepLClient::new(&credentials, "JA")?;
//! for record in records.values() {
//!   println!("{}", deepl.translate(&record.summary).await?);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

pub mod arxiv;
pub mod deepl;

pub use arxiv::ArxivClient;
pub use deepl::DeepLClient;

use super::*;

/// Something that can translate a piece of text.
///
/// [`DeepLClient`] is the production implementation; the digest builder only depends on this
/// trait.
#[async_trait]
pub trait Translate {
  /// Returns the translation of `text`.
  async fn translate(&self, text: &str) -> Result<String, DigestError>;
}
