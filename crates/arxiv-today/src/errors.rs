//! Error types for the arxiv-today library.
//!
//! Every failure the pipeline can hit ends up here:
//! - Reading or parsing the credentials and settings files
//! - Network errors talking to arXiv or DeepL
//! - Responses that lack the expected structure
//!
//! Malformed listing markup is not an error: the parser keeps the entries it managed to close
//! and drops the rest (see [`crate::parser`]).
//!
//! # Examples
//!
//! ```
//! use arxiv_today::{config::Credentials, errors::DigestError};
//!
//! match Credentials::load("/does/not/exist.json") {
//!   Err(DigestError::ConfigRead { path, .. }) => println!("missing {}", path.display()),
//!   Err(e) => println!("other error: {e}"),
//!   Ok(_) => println!("loaded"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a digest.
#[derive(Error, Debug)]
pub enum DigestError {
  /// A configuration file could not be read.
  ///
  /// Carries the path that was attempted so the CLI can point at it.
  #[error("failed to read {}: {source}", path.display())]
  ConfigRead {
    /// The file that was being read
    path:   PathBuf,
    /// The underlying IO failure
    source: std::io::Error,
  },

  /// A JSON document (configuration file or API response) failed to deserialize.
  ///
  /// This covers both malformed JSON and JSON that is missing required fields, such as a
  /// translation response without a `translations` array.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A network request failed or returned a non-success status.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// Failed to build a request URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// An API answered with a well-formed but unusable response.
  ///
  /// The string parameter describes what was missing.
  #[error("API error: {0}")]
  ApiError(String),
}
