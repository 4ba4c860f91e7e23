//! Output sheet rendering
//!
//! A [`SheetCanvas`] collects content stream operations and XObject
//! resources for one sheet side, then turns them into a `/Page` object.

use crate::layout::{PlacementRect, Rect};
use lopdf::{Dictionary, Object, ObjectId, Stream};

use super::document::OutputDocument;
use super::xobject::EmbeddedPage;

/// One side of a sheet under construction
#[derive(Debug, Default)]
pub struct SheetCanvas {
    ops: Vec<String>,
    xobjects: Dictionary,
    images: usize,
    blanks: usize,
}

impl SheetCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw content stream operations (cut guides)
    pub fn push_ops(&mut self, ops: String) {
        self.ops.push(ops);
    }

    /// Draw an embedded page scaled into `rect`.
    pub fn draw_page(&mut self, page: &EmbeddedPage, rect: &PlacementRect) {
        self.xobjects
            .set(page.name.as_bytes(), Object::Reference(page.id));
        self.ops.push(generate_placement_command(page, rect));
        self.images += 1;
    }

    /// Cover a cell with a flat white rectangle.
    pub fn fill_blank(&mut self, cell: &Rect) {
        self.ops.push(format!(
            "q 1 1 1 rg {} {} {} {} re f Q\n",
            cell.x, cell.y, cell.width, cell.height
        ));
        self.blanks += 1;
    }

    /// Number of page images drawn so far
    pub fn image_count(&self) -> usize {
        self.images
    }

    /// Number of blank cells filled so far
    pub fn blank_count(&self) -> usize {
        self.blanks
    }

    /// Write the sheet into `output` as a new page.
    pub fn finish(self, output: &mut OutputDocument) -> ObjectId {
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(self.xobjects));

        // Create content stream
        let content = self.ops.join("");
        let content_id = output
            .document_mut()
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        output.add_page(content_id, resources)
    }
}

/// Generate the PDF content stream command to place a page.
///
/// The XObject keeps the source MediaBox as its BBox, so the translation
/// compensates for a MediaBox that does not start at the origin.
fn generate_placement_command(page: &EmbeddedPage, rect: &PlacementRect) -> String {
    let scale_x = rect.width / page.page_box.width;
    let scale_y = rect.height / page.page_box.height;
    let tx = rect.x - page.page_box.x * scale_x;
    let ty = rect.y - page.page_box.y * scale_y;
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        scale_x, scale_y, tx, ty, page.name
    )
}
