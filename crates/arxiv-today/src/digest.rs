//! Day filtering and digest formatting.
//!
//! Only records published on the target date make it into the digest, in the order the
//! records mapping holds them. Each kept record becomes one block:
//!
//! ```text
//! ---
//! ## <title>
//! - author: <first authors, comma separated>
//! - abstract: <summary>
//! - translation: <translated summary>
//! - link: <abstract URL>
//! ```
//!
//! The translation line only appears for the first `max_translations` blocks. The digest ends
//! with the number of abstract characters seen and the number sent for translation.

use super::*;

/// The target date for a run at `now`: the UTC calendar day before it.
///
/// ```
/// # use arxiv_today::digest::target_date;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 30, 0).unwrap();
/// assert_eq!(target_date(now), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn target_date(now: DateTime<Utc>) -> NaiveDate { now.date_naive() - chrono::Duration::days(1) }

/// The target date for a run right now.
pub fn yesterday() -> NaiveDate { target_date(Utc::now()) }

/// A formatted digest for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
  /// Day the digest covers
  pub date:             NaiveDate,
  /// Number of records kept
  pub papers:           usize,
  /// Number of records that received a translation
  pub translated:       usize,
  /// Characters across all kept abstracts
  pub abstract_chars:   usize,
  /// Characters across the abstracts that were translated
  pub translated_chars: usize,
  /// Formatted blocks, one per kept record
  body:                 String,
}

impl Digest {
  /// An empty digest for `date`.
  pub fn new(date: NaiveDate) -> Self {
    Self {
      date,
      papers: 0,
      translated: 0,
      abstract_chars: 0,
      translated_chars: 0,
      body: String::new(),
    }
  }

  /// Appends a record's block, with its translation if there is one.
  pub fn push(&mut self, record: &Record, translation: Option<&str>) {
    let chars = record.summary.chars().count();
    self.papers += 1;
    self.abstract_chars += chars;

    self.body.push_str(&format!(
      "---\n## {}\n- author: {}\n- abstract: {}\n",
      record.title,
      record.author_line(),
      record.summary
    ));
    if let Some(translation) = translation {
      self.translated += 1;
      self.translated_chars += chars;
      self.body.push_str(&format!("- translation: {translation}\n"));
    }
    self.body.push_str(&format!("- link: {}\n\n\n", record.id));
  }

  /// Whether no record was kept.
  pub fn is_empty(&self) -> bool { self.papers == 0 }

  /// The text printed for this digest.
  ///
  /// A digest with no records renders as a single notice line instead of an empty report.
  pub fn render(&self) -> String {
    if self.is_empty() {
      return format!("No paper submitted on {} UTC.\n", self.date);
    }
    format!(
      "Papers submitted on {} UTC.\n\n{}abstract character count: {}\ntranslated character count: {}\n",
      self.date, self.body, self.abstract_chars, self.translated_chars
    )
  }
}

/// Builds the digest of `records` published on `date`.
///
/// The first `max_translations` kept records are translated with `translator`, one request at a
/// time. Passing `None` skips translation entirely.
///
/// # Errors
///
/// Fails on the first translation error; no partial digest is returned.
pub async fn build_digest(
  records: &Records,
  date: NaiveDate,
  max_translations: usize,
  translator: Option<&dyn Translate>,
) -> Result<Digest, DigestError> {
  let mut digest = Digest::new(date);
  let day = date.to_string();

  for (identifier, record) in records.iter().filter(|(_, record)| record.is_published_on(&day)) {
    let translation = match translator {
      Some(translator) if digest.papers < max_translations => {
        debug!("Translating abstract of {identifier}");
        Some(translator.translate(&record.summary).await?)
      },
      _ => None,
    };
    digest.push(record, translation.as_deref());
  }

  debug!(
    "Digest for {date}: {} of {} records kept, {} translated",
    digest.papers,
    records.len(),
    digest.translated
  );
  Ok(digest)
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use async_trait::async_trait;
  use chrono::TimeZone;

  use super::*;

  /// Uppercases its input and counts how often it was called.
  #[derive(Default)]
  struct Shout {
    calls: AtomicUsize,
  }

  #[async_trait]
  impl Translate for Shout {
    async fn translate(&self, text: &str) -> Result<String, DigestError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(text.to_uppercase())
    }
  }

  /// Always fails.
  struct Broken;

  #[async_trait]
  impl Translate for Broken {
    async fn translate(&self, _text: &str) -> Result<String, DigestError> {
      Err(DigestError::ApiError("quota exceeded".into()))
    }
  }

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, d).unwrap() }

  fn record(n: usize, published: &str, summary: &str) -> Record {
    Record {
      id:        format!("http://arxiv.org/abs/2401.{n:05}v1"),
      published: published.to_string(),
      title:     format!("Paper {n}"),
      summary:   summary.to_string(),
      names:     vec!["A. Author".into(), "B. Author".into()],
    }
  }

  fn records(list: Vec<Record>) -> Records {
    list.into_iter().map(|r| (r.id.rsplit('/').next().unwrap().to_string(), r)).collect()
  }

  #[test]
  fn test_target_date() {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap();
    assert_eq!(target_date(now), day(1));
    let new_year = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(target_date(new_year), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
  }

  #[tokio::test]
  async fn test_filters_by_date() -> anyhow::Result<()> {
    let records = records(vec![
      record(1, "2024-01-01T10:00:00Z", "kept"),
      record(2, "2024-01-02T00:00:00Z", "dropped"),
    ]);
    let digest = build_digest(&records, day(1), 20, None).await?;

    assert_eq!(digest.papers, 1);
    let text = digest.render();
    assert!(text.contains("## Paper 1\n"));
    assert!(!text.contains("Paper 2"));
    Ok(())
  }

  #[tokio::test]
  async fn test_no_papers() -> anyhow::Result<()> {
    let records = records(vec![record(1, "2024-01-02T00:00:00Z", "x")]);
    let shout = Shout::default();
    let digest = build_digest(&records, day(1), 20, Some(&shout)).await?;

    assert!(digest.is_empty());
    assert_eq!(digest.render(), "No paper submitted on 2024-01-01 UTC.\n");
    assert_eq!(shout.calls.load(Ordering::SeqCst), 0);
    Ok(())
  }

  #[tokio::test]
  async fn test_translation_cap() -> anyhow::Result<()> {
    let records =
      records((1..=25).map(|n| record(n, "2024-01-01T09:00:00Z", &format!("abstract {n}"))).collect());
    let shout = Shout::default();
    let digest = build_digest(&records, day(1), 20, Some(&shout)).await?;

    assert_eq!(digest.papers, 25);
    assert_eq!(digest.translated, 20);
    assert_eq!(shout.calls.load(Ordering::SeqCst), 20);

    let text = digest.render();
    assert_eq!(text.matches("- translation: ").count(), 20);
    assert!(text.contains("- translation: ABSTRACT 20\n"));
    assert!(!text.contains("ABSTRACT 21"));
    Ok(())
  }

  #[tokio::test]
  async fn test_character_counts() -> anyhow::Result<()> {
    let records = records(vec![
      record(1, "2024-01-01T09:00:00Z", &"a".repeat(100)),
      record(2, "2024-01-01T11:00:00Z", &"b".repeat(200)),
    ]);
    let digest = build_digest(&records, day(1), 1, Some(&Shout::default())).await?;

    assert_eq!(digest.abstract_chars, 300);
    assert_eq!(digest.translated_chars, 100);
    assert!(digest
      .render()
      .ends_with("abstract character count: 300\ntranslated character count: 100\n"));
    Ok(())
  }

  #[tokio::test]
  async fn test_counts_characters_not_bytes() -> anyhow::Result<()> {
    let records = records(vec![record(1, "2024-01-01T09:00:00Z", "ニュートリノ")]);
    let digest = build_digest(&records, day(1), 20, None).await?;
    assert_eq!(digest.abstract_chars, 6);
    assert_eq!(digest.translated_chars, 0);
    Ok(())
  }

  #[tokio::test]
  async fn test_render_layout() -> anyhow::Result<()> {
    let records = records(vec![record(7, "2024-01-01T09:00:00Z", "Short.")]);
    let digest = build_digest(&records, day(1), 20, Some(&Shout::default())).await?;

    assert_eq!(
      digest.render(),
      "Papers submitted on 2024-01-01 UTC.\n\
       \n\
       ---\n\
       ## Paper 7\n\
       - author: A. Author, B. Author\n\
       - abstract: Short.\n\
       - translation: SHORT.\n\
       - link: http://arxiv.org/abs/2401.00007v1\n\
       \n\
       \n\
       abstract character count: 6\n\
       translated character count: 6\n"
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_keeps_mapping_order() -> anyhow::Result<()> {
    let records = records(vec![
      record(3, "2024-01-01T23:00:00Z", "c"),
      record(1, "2024-01-01T01:00:00Z", "a"),
      record(2, "2024-01-01T12:00:00Z", "b"),
    ]);
    let text = build_digest(&records, day(1), 0, None).await?.render();

    let positions: Vec<_> =
      ["## Paper 3", "## Paper 1", "## Paper 2"].iter().map(|t| text.find(t).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    Ok(())
  }

  #[tokio::test]
  async fn test_translation_error_propagates() {
    let records = records(vec![record(1, "2024-01-01T09:00:00Z", "x")]);
    let result = build_digest(&records, day(1), 20, Some(&Broken)).await;
    assert!(matches!(result, Err(DigestError::ApiError(_))));
  }
}
