//! Event-driven `<entry>` decoder.
//!
//! quick-xml yields a flat stream of open/close/text events. A breadcrumb
//! stack of open element names (one per nesting level) tells same-named
//! leaves apart: `<name>` only counts when the element one level up is
//! `<author>`. Scanning stops at the close of the first `<entry>`.

use quick_xml::{
  Reader,
  events::{BytesStart, Event},
};
use salmon_core::entry::EntryFields;

use crate::error::{Error, Result};

// ─── Breadcrumbs ─────────────────────────────────────────────────────────────

struct Frame {
  /// Lower-cased qualified name, e.g. `thr:in-reply-to`.
  name:      String,
  text:      String,
  /// `ref` (or `href`) of a `<thr:in-reply-to>` element.
  reply_ref: Option<String>,
}

#[derive(Default)]
struct Breadcrumbs {
  frames: Vec<Frame>,
}

impl Breadcrumbs {
  fn push(&mut self, start: &BytesStart<'_>) -> Result<()> {
    let name = qualified_name(start);
    let reply_ref = if name == "thr:in-reply-to" {
      reply_ref_attr(start)?
    } else {
      None
    };
    self.frames.push(Frame {
      name,
      text: String::new(),
      reply_ref,
    });
    Ok(())
  }

  fn pop(&mut self) -> Option<Frame> { self.frames.pop() }

  /// Name of the innermost open element.
  fn innermost(&self) -> Option<&str> {
    self.frames.last().map(|f| f.name.as_str())
  }

  fn inside_entry(&self) -> bool {
    self.frames.iter().any(|f| f.name == "entry")
  }

  /// Whether the innermost open element is one whose text is captured.
  fn in_value(&self) -> bool {
    self.innermost().is_some_and(is_value_element)
  }

  fn append_text(&mut self, text: &str) {
    if let Some(top) = self.frames.last_mut() {
      top.text.push_str(text);
    }
  }
}

fn is_value_element(name: &str) -> bool {
  matches!(
    name,
    "id"
      | "name"
      | "uri"
      | "thr:in-reply-to"
      | "content"
      | "title"
      | "updated"
      | "sal:signature"
  )
}

fn qualified_name(start: &BytesStart<'_>) -> String {
  String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase()
}

fn reply_ref_attr(start: &BytesStart<'_>) -> Result<Option<String>> {
  let mut href = None;
  for attr in start.attributes() {
    let attr = attr.map_err(|e| Error::MalformedXml(e.to_string()))?;
    let key = attr.key.as_ref().to_ascii_lowercase();
    let value = attr
      .unescape_value()
      .map_err(|e| Error::MalformedXml(e.to_string()))?
      .into_owned();
    match key.as_slice() {
      b"ref" => return Ok(Some(value)),
      b"href" => href = Some(value),
      _ => {}
    }
  }
  Ok(href)
}

// ─── Field assignment ────────────────────────────────────────────────────────

/// Store a closed element's value. `parent` is the element one level up.
fn assign(fields: &mut EntryFields, frame: Frame, parent: Option<&str>) {
  let value = if frame.text.is_empty() {
    match frame.reply_ref {
      Some(r) => r,
      None => return,
    }
  } else {
    frame.text
  };

  // `<source>` carries its own id, title and updated; only the entry's count.
  let under_entry = parent == Some("entry");
  let under_author = parent == Some("author");
  let slot = match frame.name.as_str() {
    "id" if under_entry => &mut fields.id,
    "name" if under_author => &mut fields.author_name,
    "uri" if under_author => &mut fields.author_uri,
    "thr:in-reply-to" => &mut fields.thr_in_reply_to,
    "content" => &mut fields.content,
    "title" if under_entry => &mut fields.title,
    "updated" if under_entry => &mut fields.updated,
    "sal:signature" => &mut fields.salmon_signature,
    _ => return,
  };
  *slot = Some(value);
}

// ─── Decoder ─────────────────────────────────────────────────────────────────

pub(crate) fn parse_entry(input: &[u8]) -> Result<EntryFields> {
  let input = input.trim_ascii();
  if input.is_empty() {
    return Err(Error::MalformedXml("empty document".into()));
  }

  let mut reader = Reader::from_reader(input);
  reader.config_mut().trim_text(false);

  let mut crumbs = Breadcrumbs::default();
  let mut fields = EntryFields::default();
  let mut seen_entry = false;
  let mut buf = Vec::new();

  loop {
    let event = reader.read_event_into(&mut buf);
    match event.map_err(|e| Error::MalformedXml(e.to_string()))? {
      Event::Start(ref e) => {
        crumbs.push(e)?;
        if crumbs.innermost() == Some("entry") {
          seen_entry = true;
        }
      }
      Event::Empty(ref e) => {
        crumbs.push(e)?;
        if let Some(frame) = crumbs.pop() {
          if frame.name == "entry" {
            seen_entry = true;
            break;
          }
          if crumbs.inside_entry() {
            assign(&mut fields, frame, crumbs.innermost());
          }
        }
      }
      Event::Text(ref e) => {
        let text = e
          .unescape()
          .map_err(|err| Error::MalformedXml(err.to_string()))?;
        // Whitespace between elements carries no value.
        if crumbs.in_value() || !text.trim().is_empty() {
          crumbs.append_text(&text);
        }
      }
      Event::CData(e) => {
        let raw = e.into_inner();
        let text = std::str::from_utf8(&raw)
          .map_err(|err| Error::MalformedXml(err.to_string()))?;
        crumbs.append_text(text);
      }
      Event::End(_) => {
        if let Some(frame) = crumbs.pop() {
          if frame.name == "entry" {
            break;
          }
          if crumbs.inside_entry() {
            assign(&mut fields, frame, crumbs.innermost());
          }
        }
      }
      Event::Eof => {
        if let Some(open) = crumbs.innermost() {
          return Err(Error::MalformedXml(format!("unclosed <{open}>")));
        }
        break;
      }
      _ => {}
    }
    buf.clear();
  }

  if !seen_entry {
    return Err(Error::MalformedXml("no <entry> element".into()));
  }
  Ok(fields)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
