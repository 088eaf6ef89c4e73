//! Client for the arXiv listing API.
//!
//! Listings are requested per subject category, newest submissions first, using the Atom feed
//! endpoint (http://export.arxiv.org/api/query). The response body is handed to
//! [`parse_listing`] unchanged.
//!
//! # Examples
//!
//! ```no_run
//! use arxiv_today::clients::ArxivClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::default();
//! let records = client.fetch_all(&["hep-th".to_string(), "hep-ex".to_string()], 3).await?;
//! println!("{} papers", records.len());
//! # Ok(())
//! # }
//! ```

use url::Url;

use super::*;
use crate::parser::parse_listing;

/// Client for the arXiv API.
///
/// Holds the base URL and the number of results requested per category. Requests are always
/// sorted by submission date and start at offset 0; there is no paging.
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client:      reqwest::Client,
  /// Base URL of the API, without trailing slash (e.g. "http://export.arxiv.org/api")
  base_url:    String,
  /// Value of the `max_results` query parameter.
  max_results: usize,
}

impl ArxivClient {
  /// Creates a client for the API at `base_url`, requesting `max_results` listings per
  /// category.
  pub fn new(base_url: &str, max_results: usize) -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      max_results,
    }
  }

  /// Builds the listing URL for `category`.
  ///
  /// ```
  /// # use arxiv_today::clients::ArxivClient;
  /// let url = ArxivClient::new("http://export.arxiv.org/api", 10).query_url("hep-th").unwrap();
  /// assert_eq!(
  ///   url.as_str(),
  ///   "http://export.arxiv.org/api/query?search_query=cat:hep-th&start=0&max_results=10&sortBy=submittedDate"
  /// );
  /// ```
  pub fn query_url(&self, category: &str) -> Result<Url, DigestError> {
    Ok(Url::parse(&format!(
      "{}/query?search_query=cat:{}&start=0&max_results={}&sortBy=submittedDate",
      self.base_url, category, self.max_results
    ))?)
  }

  /// Fetches the raw Atom listing for one category.
  ///
  /// # Errors
  ///
  /// Fails on network errors, non-success HTTP status, or a body that isn't valid text.
  pub async fn fetch_listing(&self, category: &str) -> Result<String, DigestError> {
    let url = self.query_url(category)?;

    debug!("Fetching from arXiv via: {url}");

    let response = self.client.get(url).send().await?.error_for_status()?.text().await?;

    trace!("arXiv response: {response}");

    Ok(response)
  }

  /// Fetches and parses the listing for one category.
  pub async fn fetch_records(
    &self,
    category: &str,
    max_authors: usize,
  ) -> Result<Records, DigestError> {
    let listing = self.fetch_listing(category).await?;
    let records = parse_listing(&listing, max_authors);
    debug!("Parsed {} records for {category}", records.len());
    Ok(records)
  }

  /// Fetches every category in turn and merges the results.
  ///
  /// Categories are fetched one after another, in the order given. A paper listed under more
  /// than one category keeps the position of its first appearance and the fields of its last.
  pub async fn fetch_all(
    &self,
    categories: &[String],
    max_authors: usize,
  ) -> Result<Records, DigestError> {
    let mut merged = Records::new();
    for category in categories {
      merged.extend(self.fetch_records(category, max_authors).await?);
    }
    Ok(merged)
  }
}

impl Default for ArxivClient {
  fn default() -> Self {
    let config = crate::config::DigestConfig::default();
    Self::new(&config.listing_url, config.max_results)
  }
}
