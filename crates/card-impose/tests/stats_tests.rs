use card_impose::*;
use lopdf::{Dictionary, Document, Object, Stream};

fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

#[test]
fn test_merged_statistics() {
    let stats = calculate_statistics(&create_test_pdf(9), &ImpositionOptions::default()).unwrap();

    assert_eq!(stats.cards, 9);
    assert_eq!(stats.cells_per_sheet, 8);
    assert_eq!(stats.sheets, 2);
    assert_eq!(stats.output_documents, 1);
    assert_eq!(stats.pages_per_document, 4);
    assert_eq!(stats.blank_cells, 7);
}

#[test]
fn test_split_statistics() {
    let options = ImpositionOptions::with_mode(OutputMode::SeparateFrontBack);
    let stats = calculate_statistics(&create_test_pdf(8), &options).unwrap();

    assert_eq!(stats.sheets, 1);
    assert_eq!(stats.output_documents, 2);
    assert_eq!(stats.pages_per_document, 1);
    assert_eq!(stats.blank_cells, 0);
}

#[test]
fn test_preview_statistics() {
    let front = create_test_pdf(20);
    let options = ImpositionOptions::default();

    let stats = preview_statistics(&front, &options, 1).unwrap();
    assert_eq!(stats.cards, 8);
    assert_eq!(stats.sheets, 1);
    assert_eq!(stats.pages_per_document, 2);

    let stats = preview_statistics(&front, &options, usize::MAX).unwrap();
    assert_eq!(stats, calculate_statistics(&front, &options).unwrap());
}

#[test]
fn test_statistics_with_custom_grid() {
    let mut options = ImpositionOptions::default();
    options.layout.grid = Some(Grid::new(2, 2));

    let stats = statistics_for_cards(9, &options).unwrap();
    assert_eq!(stats.cells_per_sheet, 4);
    assert_eq!(stats.sheets, 3);
    assert_eq!(stats.blank_cells, 3);
}

#[test]
fn test_statistics_invalid_layout() {
    let mut options = ImpositionOptions::default();
    options.layout.grid = Some(Grid::new(0, 2));

    match statistics_for_cards(4, &options) {
        Err(ImposeError::Config(_)) => {}
        other => panic!("Expected Config error, got {:?}", other),
    }
}
