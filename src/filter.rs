use crate::errors::{AppError, AppResult};
use crate::xml::write_file;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Depth of record fields: root element, record element, field.
const FIELD_DEPTH: u32 = 2;

/// Removes record fields whose local tag name is not in `allowed`.
///
/// Only the grandchildren of the document element (the fields of each record
/// element) are inspected. Names are compared without their namespace prefix;
/// unprefixed names are compared as they are. Every other event is copied
/// through unchanged, so retained fields keep their exact content, including
/// mixed text, comments and the original formatting. The indentation in front
/// of a removed field is dropped with it.
///
/// # Returns
///
/// The filtered document and the distinct local names of the removed elements.
///
/// # Errors
///
/// Returns `ParseError` for malformed XML or a document without root element.
pub fn filter_document(
    content: &[u8],
    allowed: &BTreeSet<String>,
) -> AppResult<(Vec<u8>, BTreeSet<String>)> {
    let mut reader = Reader::from_reader(Cursor::new(content));
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(content.len())));
    let mut buf = Vec::with_capacity(8192);

    let mut removed = BTreeSet::new();
    // Number of currently open elements
    let mut depth: u32 = 0;
    let mut seen_root = false;
    // Set while inside the subtree of a removed field
    let mut skipping = false;
    // Whitespace between record fields, held until we know whether the next field is kept
    let mut pending: Vec<Event<'static>> = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;

        if skipping {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth = close(depth)?;
                    skipping = depth > FIELD_DEPTH;
                }
                Event::Eof => return Err(unclosed()),
                _ => {}
            }
            buf.clear();
            continue;
        }

        match event {
            Event::Text(e) if depth == FIELD_DEPTH && is_blank(&e) => {
                pending.push(Event::Text(e.into_owned()));
            }
            Event::Start(e)
                if depth == FIELD_DEPTH
                    && !is_allowed(e.local_name().as_ref(), allowed, &mut removed)? =>
            {
                pending.clear();
                depth += 1;
                skipping = true;
            }
            Event::Empty(e)
                if depth == FIELD_DEPTH
                    && !is_allowed(e.local_name().as_ref(), allowed, &mut removed)? =>
            {
                pending.clear();
            }
            Event::Eof => {
                if depth != 0 {
                    return Err(unclosed());
                }
                break;
            }
            event => {
                match &event {
                    Event::Start(_) => {
                        seen_root = true;
                        depth += 1;
                    }
                    Event::Empty(_) => seen_root = true,
                    Event::End(_) => depth = close(depth)?,
                    _ => {}
                }
                for held in pending.drain(..) {
                    writer.write_event(held)?;
                }
                writer.write_event(event)?;
            }
        }
        buf.clear();
    }

    if !seen_root {
        return Err(AppError::ParseError("Document has no root element".to_string()));
    }

    for held in pending {
        writer.write_event(held)?;
    }
    Ok((writer.into_inner().into_inner(), removed))
}

/// Strips every record field not named in `allowed` from `input` and writes
/// the result to `output`.
///
/// The input is fully filtered in memory before anything is written, so
/// malformed XML leaves `output` untouched. An existing output file is
/// replaced.
///
/// # Arguments
///
/// * `allowed` - Local tag names to keep
/// * `input` - XML file with an `eprints`-style root holding record elements
/// * `output` - Destination of the filtered document
///
/// # Returns
///
/// The distinct local names of the removed elements.
///
/// # Errors
///
/// Returns `ParseError` for malformed input and `IoError` when either file
/// cannot be accessed.
pub fn filter_tags(
    allowed: &BTreeSet<String>,
    input: &Path,
    output: &Path,
) -> AppResult<BTreeSet<String>> {
    let content = fs::read(input).map_err(|e| {
        AppError::IoError(format!("Failed to read XML file {}: {e}", input.display()))
    })?;
    let (filtered, removed) = filter_document(&content, allowed)?;
    write_file(output, &filtered)?;
    Ok(removed)
}

/// Checks a field name against the allow-list, remembering it when it is not allowed.
fn is_allowed(
    local_name: &[u8],
    allowed: &BTreeSet<String>,
    removed: &mut BTreeSet<String>,
) -> AppResult<bool> {
    let name = std::str::from_utf8(local_name)
        .map_err(|e| AppError::ParseError(format!("Invalid UTF-8 in XML name: {e}")))?;
    if allowed.contains(name) {
        return Ok(true);
    }
    removed.insert(name.to_string());
    Ok(false)
}

fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

fn close(depth: u32) -> AppResult<u32> {
    depth
        .checked_sub(1)
        .ok_or_else(|| AppError::ParseError("Closing tag without matching opening tag".to_string()))
}

fn unclosed() -> AppError {
    AppError::ParseError("Unexpected end of document, an element is not closed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn filter(xml: &str, tags: &[&str]) -> (String, BTreeSet<String>) {
        let (content, removed) = filter_document(xml.as_bytes(), &allow(tags)).unwrap();
        (String::from_utf8(content).unwrap(), removed)
    }

    #[test]
    fn test_filter_document_keeps_allowed_in_order() {
        let (xml, removed) = filter(
            "<eprints><eprint><a>1</a><b>2</b><c>3</c></eprint></eprints>",
            &["a", "c"],
        );

        assert_eq!(removed, allow(&["b"]));
        assert_eq!(xml, "<eprints><eprint><a>1</a><c>3</c></eprint></eprints>");
    }

    #[test]
    fn test_filter_document_keeps_mixed_content_intact() {
        let (xml, removed) = filter(
            "<eprints><eprint><abstract>H<sub>2</sub>O is water</abstract><!-- c --><x>1</x></eprint></eprints>",
            &["abstract"],
        );

        assert_eq!(removed, allow(&["x"]));
        assert_eq!(
            xml,
            "<eprints><eprint><abstract>H<sub>2</sub>O is water</abstract><!-- c --></eprint></eprints>"
        );
    }

    #[test]
    fn test_filter_document_drops_indentation_of_removed_fields() {
        let input = "<eprints>\n  <eprint>\n    <a>1</a>\n    <b>\n      <item>x</item>\n    </b>\n    <c/>\n  </eprint>\n</eprints>";
        let (xml, removed) = filter(input, &["a", "c"]);

        assert_eq!(removed, allow(&["b"]));
        assert_eq!(
            xml,
            "<eprints>\n  <eprint>\n    <a>1</a>\n    <c/>\n  </eprint>\n</eprints>"
        );
    }

    #[test]
    fn test_filter_document_removes_adjacent_fields() {
        let (xml, removed) = filter(
            "<eprints><eprint><x/><y/><keep/><x/></eprint><eprint><y/></eprint></eprints>",
            &["keep"],
        );

        assert_eq!(removed, allow(&["x", "y"]));
        assert_eq!(xml, "<eprints><eprint><keep/></eprint><eprint></eprint></eprints>");
    }

    #[test]
    fn test_filter_document_compares_local_names() {
        let (xml, removed) = filter(
            r#"<eprints xmlns:ep="urn:ep"><eprint><ep:title>T</ep:title><ep:note>N</ep:note></eprint></eprints>"#,
            &["title"],
        );

        assert_eq!(removed, allow(&["note"]));
        assert_eq!(
            xml,
            r#"<eprints xmlns:ep="urn:ep"><eprint><ep:title>T</ep:title></eprint></eprints>"#
        );
    }

    #[test]
    fn test_filter_document_leaves_deeper_levels_alone() {
        let (xml, removed) = filter(
            "<eprints><eprint><creators><item>A</item><b/></creators></eprint></eprints>",
            &["creators"],
        );

        assert!(removed.is_empty());
        assert_eq!(
            xml,
            "<eprints><eprint><creators><item>A</item><b/></creators></eprint></eprints>"
        );
    }

    #[test]
    fn test_filter_document_copies_declaration_and_references() {
        let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<eprints><eprint xmlns=\"http://eprints.org/ep2/data/2.0\"><t>Fish &amp; Chips &#x41;</t></eprint></eprints>";
        let (xml, removed) = filter(input, &["t"]);

        assert!(removed.is_empty());
        assert_eq!(xml, input);
    }

    #[test]
    fn test_filter_document_malformed() {
        let result = filter_document(b"<eprints><eprint><a>open</eprint></eprints>", &allow(&["a"]));
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_filter_document_unclosed_inside_removed_field() {
        let result = filter_document(b"<eprints><eprint><b><item>", &allow(&["a"]));
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_filter_document_empty_input() {
        let result = filter_document(b"", &allow(&["a"]));
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }
}
