use lopdf::Document;

// ── PdfValidator ──────────────────────────────────────────────────────────────
//
// Internal type. The embedder runs it on the base document before copying.

pub(crate) struct PdfValidator<'a> {
    document: &'a Document,
}

impl<'a> PdfValidator<'a> {
    pub(crate) fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Check that the parsed document carries the elements page copying
    /// relies on: a trailer, a catalog, and a `/Pages` entry in it.
    ///
    /// A document with zero pages is accepted.
    pub(crate) fn validate_base_structure(&self) -> Result<(), String> {
        if self.document.trailer.is_empty() {
            return Err("missing trailer dictionary".into());
        }

        let catalog = self
            .document
            .catalog()
            .map_err(|e| format!("missing or invalid catalog: {e}"))?;

        if !catalog.has(b"Pages") {
            return Err("catalog has no /Pages entry".into());
        }

        Ok(())
    }
}
