use crate::file_spec::FileSpecReader;
use crate::name_tree::{NameTreeEntry, NameTreeLocator};
use crate::{
    sanitize_name, Attachment, AttachmentConfig, AttachmentError, NameRegistry, Result,
    SkippedEntry,
};
use lopdf::Document;

/// Result of a successful extraction call.
#[derive(Debug)]
pub enum ExtractOutcome {
    /// The document has no embedded-files name tree (or an empty one).
    NoAttachments,

    /// The name tree was found and walked.
    Extracted(Extraction),
}

impl ExtractOutcome {
    /// The recovered attachments, empty for [`ExtractOutcome::NoAttachments`].
    pub fn attachments(&self) -> &[Attachment] {
        match self {
            Self::NoAttachments => &[],
            Self::Extracted(extraction) => &extraction.attachments,
        }
    }

    pub fn into_attachments(self) -> Vec<Attachment> {
        match self {
            Self::NoAttachments => Vec::new(),
            Self::Extracted(extraction) => extraction.attachments,
        }
    }

    /// Number of name-tree entries that had to be left out.
    pub fn skipped_count(&self) -> usize {
        match self {
            Self::NoAttachments => 0,
            Self::Extracted(extraction) => extraction.skipped.len(),
        }
    }

    pub fn is_no_attachments(&self) -> bool {
        matches!(self, Self::NoAttachments)
    }
}

/// Attachments recovered from a name tree plus the entries that were not.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Recovered attachments, in name-tree order, with sanitized unique names.
    pub attachments: Vec<Attachment>,

    /// Entries that could not be resolved, in name-tree order.
    pub skipped: Vec<SkippedEntry>,
}

/// Extracts every embedded file from a PDF.
///
/// ```no_run
/// use pdf_attachments::{AttachmentConfig, AttachmentExtractor, ExtractOutcome};
///
/// let extractor = AttachmentExtractor::new(AttachmentConfig {
///     max_attachment_size: Some(50 * 1024 * 1024),
///     ..Default::default()
/// });
///
/// let pdf = std::fs::read("invoice.pdf").unwrap();
/// match extractor.extract(&pdf).unwrap() {
///     ExtractOutcome::NoAttachments => println!("nothing attached"),
///     ExtractOutcome::Extracted(found) => {
///         for file in &found.attachments {
///             println!("{} — {} bytes", file.name, file.data.len());
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttachmentExtractor {
    config: AttachmentConfig,
}

impl AttachmentExtractor {
    pub fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }

    /// Extract all embedded files from `pdf`.
    ///
    /// Fails only when `pdf` does not parse. A missing name tree yields
    /// [`ExtractOutcome::NoAttachments`]; broken entries are skipped and
    /// listed in [`Extraction::skipped`].
    pub fn extract(&self, pdf: &[u8]) -> Result<ExtractOutcome> {
        let document =
            Document::load_mem(pdf).map_err(|e| AttachmentError::InvalidPdf(e.to_string()))?;
        Ok(self.extract_from_document(&document))
    }

    /// Same as [`extract`](Self::extract) for an already parsed document.
    pub fn extract_from_document(&self, document: &Document) -> ExtractOutcome {
        let entries = match NameTreeLocator::new(document).entries() {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                log::info!("document has no embedded files");
                return ExtractOutcome::NoAttachments;
            }
        };

        let reader = FileSpecReader::new(document);
        let mut names = NameRegistry::new();
        let mut extraction = Extraction::default();

        for entry in entries {
            match self.read_entry(&reader, &entry) {
                Ok(data) => {
                    let declared = entry.declared_name.as_deref().unwrap_or_default();
                    let name = names.claim(&sanitize_name(declared));
                    log::debug!("extracted '{}' as '{}' ({} bytes)", declared, name, data.len());
                    extraction.attachments.push(Attachment { name, data });
                }
                Err(reason) => {
                    log::warn!("skipping embedded file #{}: {}", entry.index, reason);
                    extraction.skipped.push(SkippedEntry {
                        index: entry.index,
                        declared_name: entry.declared_name,
                        reason,
                    });
                }
            }
        }

        log::info!(
            "extracted {} embedded file(s), skipped {}",
            extraction.attachments.len(),
            extraction.skipped.len()
        );
        ExtractOutcome::Extracted(extraction)
    }

    fn read_entry<'a>(&self, reader: &FileSpecReader<'a>, entry: &NameTreeEntry<'a>) -> Result<Vec<u8>> {
        let name = entry.declared_name.as_deref().ok_or_else(|| {
            AttachmentError::EntryResolution(
                format!("#{}", entry.index),
                "name tree key is not a string".into(),
            )
        })?;

        let data = reader.read(name, entry.file_spec)?;
        self.validate_size(name, data.len())?;
        Ok(data)
    }

    fn validate_size(&self, name: &str, size: usize) -> Result<()> {
        if let Some(limit) = self.config.max_attachment_size {
            if size > limit {
                return Err(AttachmentError::EntryResolution(
                    name.into(),
                    format!("{size} bytes exceeds the {limit} byte limit"),
                ));
            }
        }
        Ok(())
    }
}
