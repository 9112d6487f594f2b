//! Shared PDF object-graph helpers used across multiple modules.

use lopdf::{Dictionary, Document, Object};

/// Follow `value` one level if it is an indirect reference.
pub fn resolve<'a>(document: &'a Document, value: &'a Object) -> lopdf::Result<&'a Object> {
    match value {
        Object::Reference(id) => document.get_object(*id),
        other => Ok(other),
    }
}

/// Resolve a value that might be an inline dictionary or a reference to one.
pub fn resolve_dict<'a>(document: &'a Document, value: &'a Object) -> Option<&'a Dictionary> {
    resolve(document, value).ok()?.as_dict().ok()
}

/// Resolve a value that might be an inline array or a reference to one.
pub fn resolve_array<'a>(document: &'a Document, value: &'a Object) -> Option<&'a Vec<Object>> {
    resolve(document, value).ok()?.as_array().ok()
}

/// Read a text-string value from `object`, if it is a PDF string.
///
/// Non-ASCII bytes that form valid UTF-8 without a byte order mark are taken
/// as UTF-8, since some writers store names that way. Everything else goes
/// through lopdf's PDFDocEncoding / UTF-16BE decoder.
pub fn text_from_object(object: &Object) -> Option<String> {
    let bytes = object.as_str().ok()?;
    if !bytes.is_ascii() && !bytes.starts_with(b"\xFE\xFF") {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Some(text.trim_start_matches('\u{FEFF}').to_owned());
        }
    }
    lopdf::decode_text_string(object).ok()
}
