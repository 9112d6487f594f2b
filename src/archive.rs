//! Zip packing of extracted attachments.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{Attachment, Result};

/// Pack `attachments` into an in-memory zip archive.
///
/// One entry per attachment, in order, named after [`Attachment::name`].
/// Names must be unique within the slice, which holds for anything returned
/// by [`crate::AttachmentExtractor::extract`].
pub fn write_zip(attachments: &[Attachment]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for attachment in attachments {
        writer.start_file(attachment.name.as_str(), options)?;
        writer.write_all(&attachment.data)?;
    }

    let cursor = writer.finish()?;
    log::debug!("packed {} attachment(s) into a zip archive", attachments.len());
    Ok(cursor.into_inner())
}
