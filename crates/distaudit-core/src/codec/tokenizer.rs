//! Markup tokenizer.
//!
//! Turns a document into the three events the snapshot parser cares about:
//! an element start (reduced to its `class` attribute), character data, and
//! an element end. Everything else (declarations, doctype, comments,
//! processing instructions) is skipped.

use crate::errors::{AuditError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Receiver of tokenized markup events.
pub trait MarkupHandler {
    /// An element opened; `class` is its unescaped `class` attribute, if any.
    fn start_element(&mut self, class: Option<&str>);

    /// Character data inside the current element. May arrive in several pieces.
    fn char_data(&mut self, text: &str);

    /// The innermost open element closed.
    fn end_element(&mut self);
}

/// Tokenize `markup` and feed every event to `handler`.
///
/// Empty elements (`<span class='md5'/>`) produce a start followed by an end.
///
/// # Errors
///
/// - `MalformedMarkup` — mismatched end tag, bad attribute, unknown entity,
///   or any other tokenizer failure; carries the byte position
pub fn tokenize<H: MarkupHandler>(markup: &str, handler: &mut H) -> Result<()> {
    let mut reader = Reader::from_str(markup);

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => {
                let class = class_of(&tag).map_err(|e| malformed(&reader, e))?;
                handler.start_element(class.as_deref());
            }
            Ok(Event::Empty(tag)) => {
                let class = class_of(&tag).map_err(|e| malformed(&reader, e))?;
                handler.start_element(class.as_deref());
                handler.end_element();
            }
            Ok(Event::End(_)) => handler.end_element(),
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| malformed(&reader, e))?;
                handler.char_data(&text);
            }
            Ok(Event::CData(data)) => {
                let raw = data.into_inner();
                let text = std::str::from_utf8(&raw).map_err(|e| AuditError::MalformedMarkup {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })?;
                handler.char_data(text);
            }
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(malformed(&reader, e)),
        }
    }
}

fn class_of(tag: &BytesStart<'_>) -> std::result::Result<Option<String>, quick_xml::Error> {
    for attribute in tag.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == b"class" {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn malformed(reader: &Reader<&[u8]>, err: quick_xml::Error) -> AuditError {
    AuditError::MalformedMarkup {
        position: reader.buffer_position() as u64,
        message: err.to_string(),
    }
}
