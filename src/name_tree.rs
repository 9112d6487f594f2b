use crate::pdf_utils;
use lopdf::{Document, Object};

/// One `[key, value]` pair of the embedded-files `/Names` array.
#[derive(Debug)]
pub struct NameTreeEntry<'a> {
    /// Pair position in the array.
    pub index: usize,

    /// The key decoded as text, or `None` when it is not a PDF string.
    pub declared_name: Option<String>,

    /// The value: normally an indirect reference to a file specification.
    pub file_spec: &'a Object,
}

/// Locates the flat embedded-files name tree of a document.
///
/// Only the leaf form is handled: `/EmbeddedFiles` must carry its own
/// `/Names` array. Intermediate `/Kids` nodes are not followed.
pub struct NameTreeLocator<'a> {
    document: &'a Document,
}

impl<'a> NameTreeLocator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Walk trailer `/Root` → `/Names` → `/EmbeddedFiles` → `/Names`.
    ///
    /// Returns `None` when any link of the chain is missing or has the wrong
    /// type. Each link may be inline or an indirect reference.
    pub fn names_array(&self) -> Option<&'a [Object]> {
        let catalog = self.document.catalog().ok()?;
        let names = pdf_utils::resolve_dict(self.document, catalog.get(b"Names").ok()?)?;
        let embedded = pdf_utils::resolve_dict(self.document, names.get(b"EmbeddedFiles").ok()?)?;
        let array = pdf_utils::resolve_array(self.document, embedded.get(b"Names").ok()?)?;
        Some(array.as_slice())
    }

    /// Split the `/Names` array into key/value pairs, in array order.
    ///
    /// Returns `None` when the document has no embedded-files name tree. A
    /// trailing key without a value is dropped with a warning.
    pub fn entries(&self) -> Option<Vec<NameTreeEntry<'a>>> {
        let array = self.names_array()?;

        if array.len() % 2 != 0 {
            log::warn!(
                "embedded-files /Names array has odd length {}; ignoring trailing element",
                array.len()
            );
        }

        let entries = array
            .chunks_exact(2)
            .enumerate()
            .map(|(index, pair)| NameTreeEntry {
                index,
                declared_name: pdf_utils::text_from_object(&pair[0]),
                file_spec: &pair[1],
            })
            .collect();

        Some(entries)
    }
}
