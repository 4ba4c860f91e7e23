//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Copying source pages into output documents as Form XObjects
//! - Building sheet pages from placements, blanks and cut guides
//! - Assembling and serializing output documents

mod document;
mod page;
mod xobject;

pub use document::OutputDocument;
pub use page::SheetCanvas;
pub use xobject::{
    EmbeddedPage, PageBox, PageEmbedder, copy_object_deep, create_page_xobject, get_page_box,
};
