use super::Element;
use crate::errors::{AppError, AppResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

const INDENT_CHAR: u8 = b' ';
const INDENT_SIZE: usize = 2;

/// Serializes an element tree with a UTF-8 XML declaration and two-space indentation.
pub fn to_bytes(root: &Element) -> AppResult<Vec<u8>> {
    let cursor = Cursor::new(Vec::with_capacity(16 * 1024));
    let mut writer = Writer::new_with_indent(cursor, INDENT_CHAR, INDENT_SIZE);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serializes `root` and writes it to `path`, replacing any existing file.
///
/// The document is rendered in memory first, so a serialization failure
/// leaves no partial file behind.
pub fn write_document(root: &Element, path: &Path) -> AppResult<()> {
    let bytes = to_bytes(root)?;
    write_file(path, &bytes)
}

/// Writes an already rendered document to `path`, replacing any existing file.
pub fn write_file(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let mut file = File::create(path).map_err(|e| {
        AppError::IoError(format!("Failed to create file {}: {e}", path.display()))
    })?;
    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(|e| AppError::IoError(format!("Failed to write file {}: {e}", path.display())))
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> AppResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
