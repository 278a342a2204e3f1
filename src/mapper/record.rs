use crate::constants::{
    DOCUMENTS_FIELD, DOCUMENT_TAG, EPRINTS_NAMESPACE, EPRINT_TAG, FILES_FIELD, FILE_TAG, ITEM_TAG,
    NAME_FIELD, NULL_TEXT,
};
use crate::errors::{AppError, AppResult};
use crate::models::{Mapping, Record, Scalar, Value};
use crate::xml::Element;

/// Rewrites one record into an `eprint` element.
///
/// Fields are emitted in the record's key order. Each field value is
/// dispatched on its shape:
///
/// - scalar: leaf element holding the value's text (null is written as `None`)
/// - sequence: container element with one `item` per entry (`document` for
///   the `documents` field)
///
/// # Errors
///
/// Returns [`AppError::UnknownElement`] naming the field when a value has a
/// shape with no EPrints encoding: a boolean, a mapping directly under the
/// record, or nesting deeper than the supported sub-record shapes.
pub fn map_record(record: &Record) -> AppResult<Element> {
    let mut eprint = Element::new(EPRINT_TAG).with_attribute("xmlns", EPRINTS_NAMESPACE);
    for (key, value) in record.iter() {
        eprint.push(map_field(key, value)?);
    }
    Ok(eprint)
}

fn map_field(key: &str, value: &Value) -> AppResult<Element> {
    match value {
        Value::Scalar(scalar) => leaf(key, scalar),
        Value::Sequence(items) => map_sequence(key, items),
        Value::Mapping(_) => Err(AppError::unknown_element(key)),
    }
}

/// Container for a list-valued record field.
///
/// Entries may be text or integers (item text), sub-records or sequences
/// (primary value plus aliases). Floats, nulls and booleans directly inside
/// the list are rejected.
fn map_sequence(key: &str, items: &[Value]) -> AppResult<Element> {
    let item_tag = if key == DOCUMENTS_FIELD {
        DOCUMENT_TAG
    } else {
        ITEM_TAG
    };

    let mut container = Element::new(key);
    for item in items {
        let mut element = Element::new(item_tag);
        let mut aliases = Vec::new();
        match item {
            Value::Scalar(Scalar::Text(text)) => element.text = Some(text.clone()),
            Value::Scalar(Scalar::Integer(number)) => element.text = Some(number.to_string()),
            Value::Mapping(sub_record) => map_sub_record(&mut element, sub_record)?,
            Value::Sequence(entries) => aliases = map_aliases(key, &mut element, entries)?,
            Value::Scalar(_) => return Err(AppError::unknown_element(key)),
        }
        container.push(element);
        container.children.extend(aliases);
    }
    Ok(container)
}

/// Legacy "primary value plus aliases" encoding of a list inside a list.
///
/// A text entry becomes the item's text. A list entry puts its first value
/// into the item's text and returns the remaining values as `item` siblings,
/// which the caller appends to the container right after the item.
// TODO: confirm with the edoc data owners whether any export still produces
// nested lists; drop this branch if not.
fn map_aliases(key: &str, element: &mut Element, entries: &[Value]) -> AppResult<Vec<Element>> {
    let mut aliases = Vec::new();
    for entry in entries {
        match entry {
            Value::Scalar(Scalar::Text(text)) => element.text = Some(text.clone()),
            Value::Sequence(values) => {
                let (primary, rest) = values
                    .split_first()
                    .ok_or_else(|| AppError::unknown_element(key))?;
                element.text = Some(render(key, primary)?);
                for alias in rest {
                    aliases.push(Element::new(ITEM_TAG).with_text(render(key, alias)?));
                }
            }
            _ => return Err(AppError::unknown_element(key)),
        }
    }
    Ok(aliases)
}

/// Writes the fields of a sub-record (contributor, document, identifier, ...)
/// into its item element. Null fields are skipped.
fn map_sub_record(parent: &mut Element, sub_record: &Mapping) -> AppResult<()> {
    for (key, value) in sub_record.iter() {
        match value {
            Value::Scalar(Scalar::Null) => {}
            Value::Scalar(scalar) => parent.push(leaf(key, scalar)?),
            Value::Mapping(name) if key == NAME_FIELD => parent.push(map_name(name)?),
            Value::Sequence(entries) => parent.push(map_nested_list(key, entries)?),
            Value::Mapping(_) => return Err(AppError::unknown_element(key)),
        }
    }
    Ok(())
}

// e.g. contributors.name -> given, family
fn map_name(name: &Mapping) -> AppResult<Element> {
    let mut element = Element::new(NAME_FIELD);
    for (key, value) in name.iter() {
        match value {
            Value::Scalar(Scalar::Null) => {}
            Value::Scalar(scalar) => element.push(leaf(key, scalar)?),
            _ => return Err(AppError::unknown_element(key)),
        }
    }
    Ok(element)
}

/// List of mappings inside a sub-record, e.g. `documents.files`.
///
/// Each mapping becomes a `file` element (for the `files` field) or an
/// `item` element, holding one leaf per key. Only scalars are accepted at
/// this depth; null values are written as `None`.
fn map_nested_list(key: &str, entries: &[Value]) -> AppResult<Element> {
    let entry_tag = if key == FILES_FIELD { FILE_TAG } else { ITEM_TAG };

    let mut container = Element::new(key);
    for entry in entries {
        let Value::Mapping(fields) = entry else {
            return Err(AppError::unknown_element(key));
        };
        let mut element = Element::new(entry_tag);
        for (field, value) in fields.iter() {
            match value {
                Value::Scalar(scalar) => element.push(leaf(field, scalar)?),
                _ => return Err(AppError::unknown_element(field)),
            }
        }
        container.push(element);
    }
    Ok(container)
}

fn leaf(key: &str, scalar: &Scalar) -> AppResult<Element> {
    Ok(Element::new(key).with_text(stringify(key, scalar)?))
}

fn render(key: &str, value: &Value) -> AppResult<String> {
    match value {
        Value::Scalar(scalar) => stringify(key, scalar),
        _ => Err(AppError::unknown_element(key)),
    }
}

/// Element text of a scalar. Null becomes the `None` marker the EPrints
/// importer already receives from existing exports; booleans have no text form.
fn stringify(key: &str, scalar: &Scalar) -> AppResult<String> {
    match scalar {
        Scalar::Null => Ok(NULL_TEXT.to_string()),
        _ => scalar
            .render()
            .ok_or_else(|| AppError::unknown_element(key)),
    }
}
