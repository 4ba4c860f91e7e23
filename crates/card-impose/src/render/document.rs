//! Output document assembly

use crate::constants::OUTPUT_PDF_VERSION;
use crate::layout::SheetFormat;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// An output PDF being built page by page
pub struct OutputDocument {
    doc: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    sheet: SheetFormat,
}

impl OutputDocument {
    pub fn new(sheet: SheetFormat) -> Self {
        let mut doc = Document::with_version(OUTPUT_PDF_VERSION);
        let pages_tree_id = doc.new_object_id();
        Self {
            doc,
            pages_tree_id,
            page_refs: Vec::new(),
            sheet,
        }
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Append a sheet-sized page with the given content and resources
    pub fn add_page(&mut self, content_id: ObjectId, resources: Dictionary) -> ObjectId {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.sheet.width),
                Object::Real(self.sheet.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        page_id
    }

    /// Close the page tree and return the finished document.
    ///
    /// A document with no pages is still structurally valid.
    pub fn into_document(mut self) -> Document {
        // Create pages tree
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));

        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }

    /// Finish the document and serialize it.
    pub fn save_to_bytes(self) -> Result<Vec<u8>> {
        let mut doc = self.into_document();
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok(writer)
    }
}
