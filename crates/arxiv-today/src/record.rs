//! The per-paper record produced by the listing parser.

use indexmap::IndexMap;

use super::*;

/// Insertion-ordered mapping from arXiv identifier (e.g. `2401.01234v1`) to its [`Record`].
///
/// Order is category-fetch order, then document order within a listing. Inserting an identifier
/// that is already present replaces the record but keeps its original position.
pub type Records = IndexMap<String, Record>;

/// One paper as listed by the arXiv API.
///
/// Fields hold the text exactly as the parser cleaned it; nothing is validated. An entry that was
/// missing an element simply leaves the corresponding field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  /// Canonical abstract URL (e.g. "http://arxiv.org/abs/2401.01234v1")
  pub id:        String,
  /// Submission timestamp as listed (e.g. "2024-01-01T18:59:59Z")
  pub published: String,
  /// Paper title, flattened to one line
  pub title:     String,
  /// Abstract, flattened to one line
  pub summary:   String,
  /// Leading author names in document order
  pub names:     Vec<String>,
}

impl Record {
  /// The date portion of [`Record::published`], i.e. everything before the `T`.
  ///
  /// ```
  /// # use arxiv_today::Record;
  /// let record = Record { published: "2024-01-01T10:00:00Z".into(), ..Default::default() };
  /// assert_eq!(record.published_date(), "2024-01-01");
  /// ```
  pub fn published_date(&self) -> &str {
    self.published.split('T').next().unwrap_or_default()
  }

  /// Whether the record was published on `day`, given as `YYYY-MM-DD`.
  pub fn is_published_on(&self, day: &str) -> bool { self.published_date() == day }

  /// Author names joined for display.
  pub fn author_line(&self) -> String { self.names.join(", ") }
}
