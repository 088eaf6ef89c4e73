//! Text cleanup for fields pulled out of the arXiv listing.
//!
//! arXiv wraps titles and abstracts at a fixed column and indents the continuation lines, so the
//! raw text is full of newlines and runs of spaces. This module flattens that into a single line
//! and decodes any HTML entities left in the text.
//!
//! # Examples
//!
//! ```
//! use arxiv_today::format;
//!
//! let raw = "  Measuring the\n  neutron   lifetime  ";
//! assert_eq!(format::normalize_whitespace(raw), "Measuring the neutron lifetime");
//!
//! assert_eq!(format::decode_entities("Bose&ndash;Einstein"), "Bose–Einstein");
//! ```

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  /// Two or more consecutive spaces.
  static ref SPACE_RUN: Regex = Regex::new(r" {2,}").unwrap();
}

/// Flattens a wrapped text field into a single line.
///
/// This function performs, in order:
/// - Replaces every newline with a space
/// - Trims leading and trailing whitespace
/// - Collapses runs of two or more spaces into one
///
/// Tabs and other whitespace inside the text are left alone. Applying the function to its own
/// output returns the same string.
///
/// # Examples
///
/// ```
/// use arxiv_today::format::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("a\nb"), "a b");
/// assert_eq!(normalize_whitespace("a  \n  b"), "a b");
/// assert_eq!(normalize_whitespace("\n  padded \n"), "padded");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
  let flattened = text.replace('\n', " ");
  SPACE_RUN.replace_all(flattened.trim(), " ").into_owned()
}

/// Decodes HTML entities (named, decimal and hexadecimal) in `text`.
///
/// Unknown entities are left as written.
pub fn decode_entities(text: &str) -> String {
  html_escape::decode_html_entities(text).into_owned()
}

/// Normalizes and then decodes a scalar field (title, summary, published date).
pub fn clean_field(text: &str) -> String { decode_entities(&normalize_whitespace(text)) }
