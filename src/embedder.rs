use crate::validator::PdfValidator;
use crate::{
    policy, sanitize_name, Attachment, AttachmentConfig, AttachmentError, NameRegistry, Result,
};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Bound on the `/Parent` walk, so a cyclic page tree cannot hang us.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Builds a new PDF from a base document plus a set of attachments.
///
/// ```no_run
/// use pdf_attachments::{Attachment, AttachmentConfig, AttachmentEmbedder};
///
/// let embedder = AttachmentEmbedder::new(AttachmentConfig {
///     compress_attachments: true,
///     ..Default::default()
/// });
///
/// let base = std::fs::read("contract.pdf").unwrap();
/// let files = vec![Attachment::from_path("annex.xlsx").unwrap()];
/// let pdf = embedder.embed(&base, &files).unwrap();
/// std::fs::write("contract_with_attachments.pdf", pdf).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttachmentEmbedder {
    config: AttachmentConfig,
}

impl AttachmentEmbedder {
    pub fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }

    /// Copy every page of `base_pdf` into a new document and attach
    /// `attachments` under sanitized, call-unique names, in input order.
    ///
    /// The call is all-or-nothing: any failure returns an error and no
    /// output. An empty `attachments` slice fails with
    /// [`AttachmentError::EmptyAttachmentList`] unless
    /// [`AttachmentConfig::allow_empty_embed`] is set.
    pub fn embed(&self, base_pdf: &[u8], attachments: &[Attachment]) -> Result<Vec<u8>> {
        if attachments.is_empty() && !self.config.allow_empty_embed {
            return Err(AttachmentError::EmptyAttachmentList);
        }
        self.validate_sizes(attachments)?;

        let base = Document::load_mem(base_pdf)
            .map_err(|e| AttachmentError::InvalidBasePdf(e.to_string()))?;
        PdfValidator::new(&base)
            .validate_base_structure()
            .map_err(AttachmentError::InvalidBasePdf)?;

        let mut output = Document::with_version(base.version.clone());
        let pages_id = Self::copy_pages(&base, &mut output)?;

        let mut names = NameRegistry::new();
        let mut name_tree = Vec::with_capacity(attachments.len() * 2);
        for attachment in attachments {
            let name = names.claim(&sanitize_name(&attachment.name));
            let spec_id = self.add_file_spec(&mut output, &name, &attachment.data)?;
            log::debug!(
                "embedded '{}' as '{}' ({} bytes)",
                attachment.name,
                name,
                attachment.data.len()
            );
            name_tree.push(Object::String(name.into_bytes(), StringFormat::Literal));
            name_tree.push(Object::Reference(spec_id));
        }

        let mut catalog = Dictionary::from_iter([
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        if !name_tree.is_empty() {
            let embedded_files = Dictionary::from_iter([("Names", Object::Array(name_tree))]);
            let names_dict =
                Dictionary::from_iter([("EmbeddedFiles", Object::Dictionary(embedded_files))]);
            catalog.set("Names", Object::Dictionary(names_dict));
        }
        let catalog_id = output.add_object(catalog);
        output.trailer.set("Root", Object::Reference(catalog_id));

        let pruned = output.prune_objects();
        log::debug!("pruned {} unreachable object(s) from the base document", pruned.len());

        let mut buffer = Vec::new();
        output
            .save_to(&mut buffer)
            .map_err(|e| AttachmentError::Embedding("output document".into(), e.to_string()))?;

        log::info!(
            "embedded {} attachment(s) into a {}-page document ({} bytes)",
            attachments.len(),
            base.get_pages().len(),
            buffer.len()
        );
        Ok(buffer)
    }

    fn validate_sizes(&self, attachments: &[Attachment]) -> Result<()> {
        let Some(limit) = self.config.max_attachment_size else {
            return Ok(());
        };

        match attachments.iter().find(|a| a.data.len() > limit) {
            Some(a) => Err(AttachmentError::AttachmentTooLarge {
                name: a.name.clone(),
                size: a.data.len(),
                limit,
            }),
            None => Ok(()),
        }
    }

    // ── Page copy ─────────────────────────────────────────────────────────────

    /// Move the base document's objects into `output` under a fresh page
    /// tree and return the id of its root `/Pages` node.
    ///
    /// Page objects keep their ids. The old catalog and page-tree nodes are
    /// left behind; anything only they referenced is pruned before saving.
    fn copy_pages(base: &Document, output: &mut Document) -> Result<ObjectId> {
        for (id, object) in &base.objects {
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" => {}
                _ => {
                    output.objects.insert(*id, object.clone());
                }
            }
        }
        output.max_id = base.max_id;
        let pages_id = output.new_object_id();

        let mut kids = Vec::new();
        for (number, page_id) in base.get_pages() {
            let page = base
                .get_object(page_id)
                .and_then(Object::as_dict)
                .map_err(|e| AttachmentError::InvalidBasePdf(format!("page {number}: {e}")))?;

            let mut copy = page.clone();
            for key in INHERITABLE_PAGE_KEYS {
                if copy.has(key) {
                    continue;
                }
                if let Some(value) = Self::inherited_attribute(base, page, key) {
                    copy.set(key, value.clone());
                }
            }
            copy.set("Parent", Object::Reference(pages_id));

            output.objects.insert(page_id, Object::Dictionary(copy));
            kids.push(Object::Reference(page_id));
        }

        let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
        let pages = Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ]);
        output.objects.insert(pages_id, Object::Dictionary(pages));

        Ok(pages_id)
    }

    /// Look `key` up on the ancestors of `page`, nearest first.
    fn inherited_attribute<'a>(
        base: &'a Document,
        page: &'a Dictionary,
        key: &[u8],
    ) -> Option<&'a Object> {
        let mut node = page;
        for _ in 0..MAX_PAGE_TREE_DEPTH {
            let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = base.get_object(parent_id).and_then(Object::as_dict).ok()?;
            if let Ok(value) = node.get(key) {
                return Some(value);
            }
        }
        None
    }

    // ── Attachments ───────────────────────────────────────────────────────────

    /// Add an `/EmbeddedFile` stream and the `/Filespec` pointing at it.
    ///
    /// ```text
    /// << /Type /Filespec /F (name) /UF (name) /EF << /F 12 0 R /UF 12 0 R >> >>
    /// ```
    fn add_file_spec(&self, output: &mut Document, name: &str, data: &[u8]) -> Result<ObjectId> {
        let size = i64::try_from(data.len()).unwrap_or(i64::MAX);
        let params = Dictionary::from_iter([("Size", Object::Integer(size))]);

        let mut stream_dict = Dictionary::from_iter([
            ("Type", Object::Name(b"EmbeddedFile".to_vec())),
            ("Params", Object::Dictionary(params)),
        ]);
        if let Some(mime) = policy::mime_type_for(name) {
            stream_dict.set("Subtype", Object::Name(mime.as_bytes().to_vec()));
        }

        let mut stream = Stream::new(stream_dict, data.to_vec());
        if self.config.compress_attachments {
            stream
                .compress()
                .map_err(|e| AttachmentError::Embedding(name.into(), e.to_string()))?;
        }
        let stream_id = output.add_object(stream);

        let file_name = Object::String(name.as_bytes().to_vec(), StringFormat::Literal);
        let ef = Dictionary::from_iter([
            ("F", Object::Reference(stream_id)),
            ("UF", Object::Reference(stream_id)),
        ]);
        let spec = Dictionary::from_iter([
            ("Type", Object::Name(b"Filespec".to_vec())),
            ("F", file_name.clone()),
            ("UF", file_name),
            ("EF", Object::Dictionary(ef)),
        ]);

        Ok(output.add_object(spec))
    }
}
