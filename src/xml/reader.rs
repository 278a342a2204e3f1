use super::Element;
use crate::errors::{AppError, AppResult};
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Reads and parses an XML file into an element tree.
pub fn read_document(path: &Path) -> AppResult<Element> {
    let content = fs::read(path).map_err(|e| {
        AppError::IoError(format!("Failed to read XML file {}: {e}", path.display()))
    })?;
    parse_document(&content)
}

/// Parses XML content into an element tree rooted at the document element.
///
/// Whitespace-only text (indentation between elements) is dropped. Entity and
/// character references are resolved, CDATA sections are folded into text.
/// Comments and processing instructions are not retained. An element holding
/// both text and child elements is rejected, since [`Element`] cannot keep
/// their interleaving.
pub fn parse_document(content: &[u8]) -> AppResult<Element> {
    let mut reader = Reader::from_reader(Cursor::new(content));
    let mut buf = Vec::with_capacity(8192);

    // Open elements, innermost last
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(start_element(&e, reader.decoder())?);
            }
            Event::Empty(e) => {
                let element = start_element(&e, reader.decoder())?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let mut element = stack.pop().ok_or_else(|| {
                    AppError::ParseError("Closing tag without matching opening tag".to_string())
                })?;
                if element.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
                    element.text = None;
                }
                if element.text.is_some() && !element.children.is_empty() {
                    return Err(AppError::ParseError(format!(
                        "Mixed content in <{}> is not supported",
                        element.name
                    )));
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e
                    .decode()
                    .map_err(|e| AppError::ParseError(format!("Failed to decode XML text: {e}")))?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| AppError::ParseError(format!("Failed to decode CDATA: {e}")))?;
                append_text(&mut stack, text)?;
            }
            Event::GeneralRef(e) => {
                let resolved = resolve_reference(&e)?;
                append_text(&mut stack, &resolved)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(AppError::ParseError(format!(
            "Unexpected end of document, <{}> is not closed",
            open.name
        )));
    }

    root.ok_or_else(|| AppError::ParseError("Document has no root element".to_string()))
}

fn start_element(e: &BytesStart, decoder: Decoder) -> AppResult<Element> {
    let name = decode_name(e.name().as_ref())?;
    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| AppError::ParseError(format!("Invalid attribute: {e}")))?;
        let key = decode_name(attr.key.as_ref())?;
        let value = attr.decode_and_unescape_value(decoder)?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn decode_name(raw: &[u8]) -> AppResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| AppError::ParseError(format!("Invalid UTF-8 in XML name: {e}")))
}

/// Hands a completed element to its parent, or makes it the document root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> AppResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(AppError::ParseError(format!(
                "Multiple root elements, found <{}> after the document element",
                element.name
            )))
        }
    }
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> AppResult<()> {
    match stack.last_mut() {
        Some(current) => {
            current.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(AppError::ParseError(
            "Text content outside of the document element".to_string(),
        )),
    }
}

fn resolve_reference(e: &BytesRef) -> AppResult<String> {
    let char_ref = e
        .resolve_char_ref()
        .map_err(|e| AppError::ParseError(format!("Invalid character reference: {e}")))?;
    if let Some(ch) = char_ref {
        return Ok(ch.to_string());
    }

    let name = e
        .decode()
        .map_err(|e| AppError::ParseError(format!("Failed to decode entity reference: {e}")))?;
    resolve_predefined_entity(&name)
        .map(str::to_owned)
        .ok_or_else(|| AppError::ParseError(format!("Unknown entity reference &{name};")))
}
