use crate::{pdf_utils, AttachmentError, Result};
use lopdf::{Dictionary, Document, Object, Stream};

/// Resolves file specifications to the bytes of their embedded stream.
pub struct FileSpecReader<'a> {
    document: &'a Document,
}

impl<'a> FileSpecReader<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    fn resolution_error(name: &str, message: impl Into<String>) -> AttachmentError {
        AttachmentError::EntryResolution(name.into(), message.into())
    }

    /// Read the embedded file behind `file_spec`.
    ///
    /// Layout of a file specification:
    ///
    /// ```text
    /// <<
    ///   /Type  /Filespec
    ///   /F     (ascii filename)
    ///   /UF    (unicode filename)
    ///   /EF    <<
    ///              /F   <stream-ref>       ← read first
    ///              /UF  <stream-ref>       ← fallback
    ///          >>
    /// >>
    /// ```
    ///
    /// `name` is only used to label errors.
    pub fn read(&self, name: &str, file_spec: &'a Object) -> Result<Vec<u8>> {
        let spec_dict = self.resolve_spec_dictionary(name, file_spec)?;
        let ef_dict = self.resolve_ef_dictionary(name, spec_dict)?;
        let stream = self.embedded_stream(name, ef_dict)?;
        Self::stream_bytes(name, stream)
    }

    fn resolve_spec_dictionary(&self, name: &str, file_spec: &'a Object) -> Result<&'a Dictionary> {
        let object = pdf_utils::resolve(self.document, file_spec)
            .map_err(|e| Self::resolution_error(name, format!("unresolvable file spec: {e}")))?;
        object
            .as_dict()
            .map_err(|_| Self::resolution_error(name, "file spec is not a dictionary"))
    }

    /// Resolve /EF, which some producers store as a reference instead of
    /// inline.
    fn resolve_ef_dictionary(&self, name: &str, spec_dict: &'a Dictionary) -> Result<&'a Dictionary> {
        let ef_val = spec_dict
            .get(b"EF")
            .map_err(|_| Self::resolution_error(name, "missing /EF entry"))?;

        pdf_utils::resolve_dict(self.document, ef_val)
            .ok_or_else(|| Self::resolution_error(name, "/EF is not a dictionary"))
    }

    fn embedded_stream(&self, name: &str, ef_dict: &'a Dictionary) -> Result<&'a Stream> {
        let stream_ref = ef_dict
            .get(b"F")
            .or_else(|_| ef_dict.get(b"UF"))
            .map_err(|_| Self::resolution_error(name, "/EF has neither /F nor /UF"))?;

        let stream_obj = pdf_utils::resolve(self.document, stream_ref)
            .map_err(|e| Self::resolution_error(name, format!("unresolvable stream: {e}")))?;

        stream_obj
            .as_stream()
            .map_err(|_| Self::resolution_error(name, "embedded file object is not a stream"))
    }

    /// Decode the stream when it declares a `/Filter`; otherwise its content
    /// is already the file.
    fn stream_bytes(name: &str, stream: &Stream) -> Result<Vec<u8>> {
        if !stream.dict.has(b"Filter") {
            return Ok(stream.content.clone());
        }

        stream
            .decompressed_content()
            .map_err(|e| Self::resolution_error(name, format!("cannot decode stream: {e}")))
    }
}
