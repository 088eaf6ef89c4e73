//! Streaming parser turning an arXiv Atom listing into [`Records`].
//!
//! The parser only looks at a handful of element names (`id`, `published`, `title`, `name`,
//! `summary`) and only while it is inside an `entry` element. Everything else in the feed
//! (links, categories, `arxiv:` extensions, the feed-level `id` and `title`) is skipped.
//!
//! A record is committed when its `</entry>` arrives. If the document is cut short or stops
//! being well formed, parsing ends there: entries that already closed are kept and the
//! unfinished one is dropped without an error.
//!
//! # Examples
//!
//! ```
//! use arxiv_today::parser::parse_listing;
//!
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
//!   <entry>
//!     <id>http://arxiv.org/abs/2401.00001v1</id>
//!     <published>2024-01-01T10:00:00Z</published>
//!     <title>A
//!       title</title>
//!     <summary>An abstract.</summary>
//!     <author><name>Ada Lovelace</name></author>
//!   </entry>
//! </feed>"#;
//!
//! let records = parse_listing(xml, 3);
//! let record = &records["2401.00001v1"];
//! assert_eq!(record.title, "A title");
//! assert_eq!(record.names, ["Ada Lovelace"]);
//! ```

use std::collections::HashSet;

use quick_xml::{events::Event, Reader};

use super::*;

/// Element that scopes one record.
const ENTRY: &str = "entry";

/// The record fields the parser collects text for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
  /// `<id>`: canonical abstract URL
  Id,
  /// `<published>`: submission timestamp
  Published,
  /// `<title>`
  Title,
  /// `<name>` inside `<author>`
  Name,
  /// `<summary>`: the abstract
  Summary,
}

impl Field {
  /// Maps an element name to the field it feeds, if any.
  fn from_tag(tag: &str) -> Option<Self> {
    match tag {
      "id" => Some(Field::Id),
      "published" => Some(Field::Published),
      "title" => Some(Field::Title),
      "name" => Some(Field::Name),
      "summary" => Some(Field::Summary),
      _ => None,
    }
  }

  /// The element name this field is read from.
  fn tag(self) -> &'static str {
    match self {
      Field::Id => "id",
      Field::Published => "published",
      Field::Title => "title",
      Field::Name => "name",
      Field::Summary => "summary",
    }
  }
}

/// Everything the parser tracks for the entry currently being read.
#[derive(Debug, Default)]
struct ParserState {
  /// Element names that have started and not yet ended
  open:       HashSet<String>,
  /// Field receiving text, set by the most recent start tag
  active:     Option<Field>,
  /// Key for the record, taken from the last path segment of its `id`
  identifier: String,
  /// Fields collected so far
  record:     Record,
}

impl ParserState {
  /// Whether an `entry` element is open.
  fn in_entry(&self) -> bool { self.open.contains(ENTRY) }

  /// The active field, but only while its element is still open.
  fn receiving(&self) -> Option<Field> {
    self.active.filter(|field| self.open.contains(field.tag()))
  }

  /// Clears all per-entry state so the next entry starts empty.
  fn reset(&mut self) { *self = Self::default(); }
}

/// Accumulates [`Records`] from markup events.
///
/// [`RecordParser::feed`] drives it from a whole document; the `start_tag`, `end_tag` and
/// `text` callbacks are public so other event sources can drive it directly.
#[derive(Debug)]
pub struct RecordParser {
  /// Maximum number of author names kept per record
  max_authors: usize,
  /// State of the entry being read
  state:       ParserState,
  /// Committed records
  records:     Records,
}

impl RecordParser {
  /// Creates a parser keeping at most `max_authors` names per record.
  pub fn new(max_authors: usize) -> Self {
    Self { max_authors, state: ParserState::default(), records: Records::new() }
  }

  /// Handles an opening tag.
  pub fn start_tag(&mut self, tag: &str) {
    trace!("start tag: {tag}");
    self.state.open.insert(tag.to_string());
    self.state.active =
      if self.state.in_entry() { Field::from_tag(tag) } else { None };
  }

  /// Handles a closing tag, committing the current record on `</entry>`.
  pub fn end_tag(&mut self, tag: &str) {
    trace!("end tag: {tag}");
    if tag == ENTRY && self.state.in_entry() {
      self.commit();
    } else {
      self.state.open.remove(tag);
    }
  }

  /// Handles a run of character data.
  ///
  /// Repeated chunks for one element follow the field's policy: names append (up to the cap),
  /// every other field keeps only the last chunk.
  pub fn text(&mut self, text: &str) {
    trace!("text: {text:?}");
    if !self.state.in_entry() {
      return;
    }
    let Some(field) = self.state.receiving() else {
      return;
    };

    let record = &mut self.state.record;
    match field {
      Field::Id => {
        self.state.identifier = text.rsplit('/').next().unwrap_or_default().to_string();
        record.id = text.to_string();
      },
      Field::Name =>
        if record.names.len() < self.max_authors {
          record.names.push(format::decode_entities(text));
        },
      Field::Published => record.published = format::clean_field(text),
      Field::Title => record.title = format::clean_field(text),
      Field::Summary => record.summary = format::clean_field(text),
    }
  }

  /// Parses a complete document, feeding every event to the callbacks above.
  ///
  /// Stops quietly at the first markup error; see the module docs.
  pub fn feed(&mut self, xml: &str) {
    let mut reader = Reader::from_str(xml);
    // A stray end tag is handed to the state machine like any other.
    reader.config_mut().check_end_names = false;
    let mut buf = Vec::new();

    loop {
      match reader.read_event_into(&mut buf) {
        Ok(Event::Start(e)) => self.start_tag(&tag_name(e.name().as_ref())),
        Ok(Event::End(e)) => self.end_tag(&tag_name(e.name().as_ref())),
        Ok(Event::Empty(e)) => {
          let tag = tag_name(e.name().as_ref());
          self.start_tag(&tag);
          self.end_tag(&tag);
        },
        Ok(Event::Text(t)) => {
          let text = match t.unescape() {
            Ok(text) => text.into_owned(),
            Err(e) => {
              debug!("Falling back to raw text after unescape failure: {e}");
              String::from_utf8_lossy(&t).into_owned()
            },
          };
          self.text(&text);
        },
        Ok(Event::CData(c)) => self.text(&String::from_utf8_lossy(&c)),
        Ok(Event::Eof) => break,
        Err(e) => {
          warn!(
            "Stopped parsing listing at byte {}: {e}",
            reader.buffer_position()
          );
          break;
        },
        _ => {},
      }
      buf.clear();
    }
  }

  /// Number of records committed so far.
  pub fn len(&self) -> usize { self.records.len() }

  /// Whether no record has been committed yet.
  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Consumes the parser, returning the committed records. An unfinished entry is discarded.
  pub fn into_records(self) -> Records { self.records }

  /// Moves the finished record into the result mapping and resets for the next entry.
  fn commit(&mut self) {
    let state = std::mem::take(&mut self.state);
    debug!("Parsed entry {}", state.identifier);
    self.records.insert(state.identifier, state.record);
  }
}

/// Lowercased element name, namespace prefix included (e.g. `arxiv:comment`).
fn tag_name(raw: &[u8]) -> String { String::from_utf8_lossy(raw).to_lowercase() }

/// Parses an arXiv listing, keeping at most `max_authors` names per record.
pub fn parse_listing(xml: &str, max_authors: usize) -> Records {
  let mut parser = RecordParser::new(max_authors);
  parser.feed(xml);
  parser.into_records()
}
