//! # pdf-attachments
//!
//! A Rust library for embedding files into PDF documents as named attachments
//! and for recovering them again.
//!
//! ## What this crate does
//!
//! 1. **Sanitize names** — every attachment name is reduced to a safe ASCII
//!    token and disambiguated against the other names in the same call.
//! 2. **Embed** — copies every page of a base PDF into a new document and
//!    attaches each file as an `/EmbeddedFile` under `/Names/EmbeddedFiles`.
//! 3. **Extract** — walks `/Root → /Names → /EmbeddedFiles → /Names`, decodes
//!    each entry and skips (but reports) the ones that are broken.
//! 4. **Archive** — packs extracted attachments into a zip archive.
//!
//! ## Quick example
//!
//! ```no_run
//! use pdf_attachments::{archive, embed_attachments, extract_attachments, Attachment};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let base = std::fs::read("report.pdf")?;
//! let attachments = vec![
//!     Attachment::new("données brutes.csv", std::fs::read("data.csv")?),
//!     Attachment::new("logo.png", std::fs::read("logo.png")?),
//! ];
//!
//! let pdf = embed_attachments(&base, &attachments)?;
//!
//! let outcome = extract_attachments(&pdf)?;
//! for file in outcome.attachments() {
//!     println!("  {} — {} bytes", file.name, file.data.len());
//! }
//! std::fs::write("report_attachments.zip", archive::write_zip(outcome.attachments())?)?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod archive;
mod attachment;
mod embedder;
mod extractor;
mod file_spec;
mod name_tree;
mod pdf_utils;
pub mod policy;
mod sanitize;
mod validator;

pub use attachment::{Attachment, SkippedEntry};
pub use embedder::AttachmentEmbedder;
pub use extractor::{AttachmentExtractor, ExtractOutcome, Extraction};
pub use sanitize::{
    archive_filename, embedded_pdf_filename, file_stem, sanitize_name, NameRegistry,
    FALLBACK_NAME,
};

// ── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration shared by [`AttachmentEmbedder`] and
/// [`AttachmentExtractor`].
#[derive(Debug, Clone, Default)]
pub struct AttachmentConfig {
    /// Upper bound on the size of a single attachment, in bytes.
    ///
    /// Embedding fails with [`AttachmentError::AttachmentTooLarge`] when an
    /// input exceeds it; extraction skips the oversized entry instead.
    pub max_attachment_size: Option<usize>,

    /// When `true`, embedding an empty attachment list copies the pages and
    /// returns a PDF without a name tree instead of failing with
    /// [`AttachmentError::EmptyAttachmentList`].
    pub allow_empty_embed: bool,

    /// Flate-compress each embedded file stream.
    pub compress_attachments: bool,
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum AttachmentError {
    /// A filesystem I/O error occurred (e.g. when saving an attachment).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The base document handed to the embedder is not a usable PDF.
    #[error("Invalid base PDF: {0}")]
    InvalidBasePdf(String),

    /// The document handed to the extractor is not a PDF.
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// Embedding was requested without any attachment.
    #[error("At least one attachment is required")]
    EmptyAttachmentList,

    /// An attachment is bigger than [`AttachmentConfig::max_attachment_size`].
    #[error("Attachment '{name}' is {size} bytes, above the {limit} byte limit")]
    AttachmentTooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    /// An attachment or the output document could not be written.
    #[error("Failed to embed '{0}': {1}")]
    Embedding(String, String),

    /// A single name-tree entry could not be resolved to a file stream.
    ///
    /// Extraction never returns this error; it is recorded in
    /// [`SkippedEntry::reason`] and the entry is left out.
    #[error("Failed to resolve embedded file '{0}': {1}")]
    EntryResolution(String, String),

    /// Writing the zip archive failed.
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, AttachmentError>;

// ── Convenience entry points ─────────────────────────────────────────────────

/// Embed `attachments` into a copy of `base_pdf` using the default
/// [`AttachmentConfig`].
pub fn embed_attachments(base_pdf: &[u8], attachments: &[Attachment]) -> Result<Vec<u8>> {
    AttachmentEmbedder::default().embed(base_pdf, attachments)
}

/// Extract every embedded file from `pdf` using the default
/// [`AttachmentConfig`].
pub fn extract_attachments(pdf: &[u8]) -> Result<ExtractOutcome> {
    AttachmentExtractor::default().extract(pdf)
}
