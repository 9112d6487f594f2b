use std::path::Path;

use crate::AttachmentError;

// ── Attachment ───────────────────────────────────────────────────────────────

/// A named blob travelling into or out of a PDF.
///
/// On the way in, `name` is whatever the caller supplied. Attachments returned
/// by [`crate::AttachmentExtractor::extract`] carry the sanitized, call-unique
/// name instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,

    /// The raw, decoded file content.
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read `path` from disk, naming the attachment after its file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, std::fs::read(path)?))
    }

    /// Write this attachment into `output_dir`, creating the directory if
    /// necessary, and return the path written.
    ///
    /// Only the final component of the name is used, so a name such as
    /// `../../etc/passwd` lands inside `output_dir` as `passwd`.
    ///
    /// ```no_run
    /// use pdf_attachments::extract_attachments;
    ///
    /// let pdf = std::fs::read("report.pdf").unwrap();
    /// for file in extract_attachments(&pdf).unwrap().attachments() {
    ///     file.save_to_disk("./extracted").unwrap();
    /// }
    /// ```
    pub fn save_to_disk<P: AsRef<Path>>(&self, output_dir: P) -> std::io::Result<std::path::PathBuf> {
        let dir = output_dir.as_ref();
        let file_name = Path::new(&self.name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| crate::FALLBACK_NAME.into());

        std::fs::create_dir_all(dir)?;
        let dest = dir.join(file_name);
        std::fs::write(&dest, &self.data)?;
        Ok(dest)
    }

    /// Returns the file extension, or `None` if the name has no extension.
    ///
    /// ```
    /// # use pdf_attachments::Attachment;
    /// let file = Attachment::new("factur-x.xml", Vec::new());
    /// assert_eq!(file.extension(), Some("xml"));
    /// ```
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }

    /// Returns `true` when the extension matches `ext` (case-insensitive).
    ///
    /// ```
    /// # use pdf_attachments::Attachment;
    /// let file = Attachment::new("Scan.PNG", Vec::new());
    /// assert!(file.has_extension("png"));
    /// ```
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension()
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false)
    }
}

// ── SkippedEntry ─────────────────────────────────────────────────────────────

/// A name-tree entry that extraction had to leave out.
#[derive(Debug)]
pub struct SkippedEntry {
    /// Position of the pair in the `/Names` array (pair index, not element
    /// index).
    pub index: usize,

    /// The declared name, when the key could be decoded at all.
    pub declared_name: Option<String>,

    /// Why the entry could not be resolved.
    pub reason: AttachmentError,
}
