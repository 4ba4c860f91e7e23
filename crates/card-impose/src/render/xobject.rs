//! XObject creation for imposition
//!
//! Source pages are copied into the output document as Form XObjects, which
//! can then be drawn any number of times with different transformations.

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, MAX_PAGE_TREE_DEPTH};
use crate::types::{ImposeError, Result, SourceSide};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// Page Boxes
// =============================================================================

/// A page's MediaBox, normalized so width and height are measured from the
/// lower-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageBox {
    fn from_media_box(media_box: &[Object]) -> Result<Option<Self>> {
        let [x1, y1, x2, y2] = media_box else {
            return Ok(None);
        };
        let (x1, y1, x2, y2) = (
            x1.as_float()?,
            y1.as_float()?,
            x2.as_float()?,
            y2.as_float()?,
        );
        Ok(Some(Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }))
    }

    fn default_box() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: DEFAULT_PAGE_DIMENSIONS.0,
            height: DEFAULT_PAGE_DIMENSIONS.1,
        }
    }

    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn to_bbox(self) -> Object {
        Object::Array(vec![
            Object::Real(self.x),
            Object::Real(self.y),
            Object::Real(self.x + self.width),
            Object::Real(self.y + self.height),
        ])
    }
}

/// Get a page's MediaBox, following inheritance from the page tree.
///
/// Pages without any MediaBox fall back to US Letter.
pub fn get_page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    match inherited_attribute(doc, page_id, b"MediaBox")? {
        Some(obj) => {
            let media_box = resolve(doc, obj)?.as_array()?;
            Ok(PageBox::from_media_box(media_box)?.unwrap_or_else(PageBox::default_box))
        }
        None => Ok(PageBox::default_box()),
    }
}

/// Look up a page attribute on the page or any ancestor `/Pages` node.
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut node = doc.get_dictionary(page_id)?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value));
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => node = doc.get_dictionary(parent_id)?,
            Err(_) => break,
        }
    }
    Ok(None)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        _ => Ok(obj),
    }
}

// =============================================================================
// Embedding
// =============================================================================

/// A source page copied into an output document
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedPage {
    /// Object ID of the Form XObject in the output document
    pub id: ObjectId,
    /// Resource name used in sheet content streams
    pub name: String,
    pub page_box: PageBox,
}

/// Copies pages of one source document into one output document.
///
/// Each page is embedded at most once and every object reachable from page
/// resources is copied at most once, so a page drawn on many sheets (the
/// shared back) costs a single XObject.
pub struct PageEmbedder<'a> {
    side: SourceSide,
    source: &'a Document,
    page_ids: Vec<ObjectId>,
    copied: HashMap<ObjectId, ObjectId>,
    embedded: HashMap<usize, EmbeddedPage>,
}

impl<'a> PageEmbedder<'a> {
    pub fn new(side: SourceSide, source: &'a Document) -> Self {
        Self {
            side,
            source,
            page_ids: source.get_pages().values().copied().collect(),
            copied: HashMap::new(),
            embedded: HashMap::new(),
        }
    }

    /// MediaBox of the page at `index` (0-based)
    pub fn page_box(&self, index: usize) -> Result<PageBox> {
        get_page_box(self.source, self.page_id(index)?)
    }

    /// Embed the page at `index` (0-based), reusing an earlier embedding.
    pub fn embed(&mut self, output: &mut Document, index: usize) -> Result<EmbeddedPage> {
        if let Some(page) = self.embedded.get(&index) {
            return Ok(page.clone());
        }

        let page_id = self.page_id(index)?;
        let page_box = get_page_box(self.source, page_id)?;
        let id = create_page_xobject(output, self.source, page_id, page_box, &mut self.copied)?;
        let page = EmbeddedPage {
            id,
            name: format!("X{}_{}", id.0, id.1),
            page_box,
        };
        self.embedded.insert(index, page.clone());
        Ok(page)
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or_else(|| ImposeError::SourceDecode {
                side: self.side,
                reason: format!("page {} not found", index + 1),
            })
    }
}

/// Create an XObject from a source page.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `page_box` - The page's MediaBox, used as the XObject BBox
/// * `cache` - Source to output object IDs already copied
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    page_box: PageBox,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    // Get page content
    let content_data = get_page_content(source, page_dict)?;

    // Create XObject dictionary
    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", page_box.to_bbox());
    xobject_dict.set("FormType", Object::Integer(1));

    // Copy resources, which may be inherited from the page tree
    if let Some(resources) = inherited_attribute(source, page_id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(xobject_dict, content_data)))
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match resolve(doc, contents)? {
        Object::Stream(stream) => stream_data(stream),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Stream(stream) = resolve(doc, obj)? {
            result.extend_from_slice(&stream_data(stream)?);
            result.push(b'\n');
        }
    }

    Ok(result)
}

/// Decoded stream bytes. The XObject is written unfiltered, so a filter that
/// cannot be decoded is an error.
fn stream_data(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        Ok(stream.decompressed_content()?)
    } else {
        Ok(stream.content.clone())
    }
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times. Output IDs
/// are reserved before recursing so reference cycles terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            // Check cache first
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}
