//! Error types for the arxiv-today command line tool.
//!
//! The CLI has little to fail on by itself: nearly every error comes from the library and is
//! passed through unchanged so the original message reaches the user.

use thiserror::Error;

/// Errors that can end a run of the CLI.
///
/// # Examples
///
/// ```ignore
/// use arxiv_today::config::Credentials;
///
/// # fn example() -> Result<(), ArxivTodayErrors> {
/// // Library errors convert automatically
/// let credentials = Credentials::load("deepl.json")?;
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ArxivTodayErrors {
  /// Errors from the underlying arxiv-today library
  #[error(transparent)]
  Digest(#[from] arxiv_today::errors::DigestError),

  /// Writing the digest to standard output failed
  #[error(transparent)]
  IO(#[from] std::io::Error),
}
