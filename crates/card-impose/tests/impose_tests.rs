use card_impose::layout::{CellPosition, cell_bounds, fit_to_cell, place_in_cell};
use card_impose::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

fn create_sized_pdf(sizes: &[(f32, f32)]) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Create pages array
    let mut kids = Vec::new();
    for &(width, height) in sizes {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width),
                    Object::Real(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // Create pages dict
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn create_test_pdf(num_pages: usize) -> Document {
    create_sized_pdf(&vec![(612.0, 792.0); num_pages])
}

fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn page_content(doc: &Document, page_id: ObjectId) -> String {
    String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap()
}

/// Number of embedded pages drawn on an output page
fn draw_count(content: &str) -> usize {
    content.matches(" Do Q").count()
}

/// Number of white fills on an output page
fn blank_fill_count(content: &str) -> usize {
    content.matches("re f Q").count()
}

/// Translation x of the first page drawn on an output page
fn first_draw_x(content: &str) -> f32 {
    let line = content
        .lines()
        .find(|line| line.ends_with("Do Q"))
        .expect("page draws nothing");
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens[5].parse().unwrap()
}

fn expected_x(col: usize) -> f32 {
    let constants = resolve_layout(&LayoutConfig::default()).unwrap();
    let cell = cell_bounds(&constants, CellPosition::new(0, col));
    let fit = fit_to_cell(612.0, 792.0, &constants.card).unwrap();
    place_in_cell(&cell, &fit).x
}

fn merged(result: OutputResult) -> Document {
    match result {
        OutputResult::Merged(bytes) => Document::load_mem(&bytes).unwrap(),
        other => panic!("Expected merged output, got {:?}", other),
    }
}

fn split(result: OutputResult) -> (Document, Document) {
    match result {
        OutputResult::Split { front, back } => (
            Document::load_mem(&front).unwrap(),
            Document::load_mem(&back).unwrap(),
        ),
        other => panic!("Expected split output, got {:?}", other),
    }
}

#[tokio::test]
async fn test_partial_last_sheet_merged() {
    let result = generate(
        to_bytes(create_test_pdf(9)),
        to_bytes(create_test_pdf(1)),
        &ImpositionOptions::default(),
    )
    .await
    .unwrap();

    let doc = merged(result);
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 4);

    let contents: Vec<String> = pages.iter().map(|&id| page_content(&doc, id)).collect();

    // Full first sheet
    assert_eq!(draw_count(&contents[0]), 8);
    assert_eq!(draw_count(&contents[1]), 8);
    assert_eq!(blank_fill_count(&contents[0]), 0);
    assert_eq!(blank_fill_count(&contents[1]), 0);

    // One card and seven blanks on the second sheet
    assert_eq!(draw_count(&contents[2]), 1);
    assert_eq!(draw_count(&contents[3]), 1);
    assert_eq!(blank_fill_count(&contents[2]), 7);
    assert_eq!(blank_fill_count(&contents[3]), 7);
}

#[test]
fn test_exact_single_sheet() {
    let result = generate_blocking(
        &to_bytes(create_test_pdf(8)),
        &to_bytes(create_test_pdf(1)),
        &ImpositionOptions::default(),
    )
    .unwrap();

    let doc = merged(result);
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 2);
    for &page in &pages {
        let content = page_content(&doc, page);
        assert_eq!(draw_count(&content), 8);
        assert_eq!(blank_fill_count(&content), 0);
    }
}

#[test]
fn test_no_cards_gives_empty_document() {
    let result = generate_blocking(
        &to_bytes(create_test_pdf(0)),
        &to_bytes(create_test_pdf(1)),
        &ImpositionOptions::default(),
    )
    .unwrap();

    let doc = merged(result);
    assert_eq!(doc.get_pages().len(), 0);
}

#[test]
fn test_split_page_counts() {
    let options = ImpositionOptions::with_mode(OutputMode::SeparateFrontBack);
    let result = impose_documents(&create_test_pdf(9), &create_test_pdf(1), &options).unwrap();

    let (front, back) = split(result);
    assert_eq!(front.get_pages().len(), 2);
    assert_eq!(back.get_pages().len(), 2);

    let last_back = page_content(&back, page_ids(&back)[1]);
    assert_eq!(draw_count(&last_back), 1);
    assert_eq!(blank_fill_count(&last_back), 7);
}

#[test]
fn test_merged_backs_are_mirrored() {
    let result = impose_documents(
        &create_test_pdf(1),
        &create_test_pdf(1),
        &ImpositionOptions::default(),
    )
    .unwrap();

    let doc = merged(result);
    let pages = page_ids(&doc);

    let front_x = first_draw_x(&page_content(&doc, pages[0]));
    let back_x = first_draw_x(&page_content(&doc, pages[1]));
    assert!((front_x - expected_x(0)).abs() < 0.01);
    assert!((back_x - expected_x(3)).abs() < 0.01);
}

#[test]
fn test_separate_mirrored_backs() {
    let options = ImpositionOptions::with_mode(OutputMode::SeparateFrontBackMirrored);
    let result = impose_documents(&create_test_pdf(2), &create_test_pdf(1), &options).unwrap();

    let (_, back) = split(result);
    let back_x = first_draw_x(&page_content(&back, page_ids(&back)[0]));
    assert!((back_x - expected_x(3)).abs() < 0.01);
}

#[test]
fn test_separate_backs_not_mirrored() {
    let options = ImpositionOptions::with_mode(OutputMode::SeparateFrontBack);
    let result = impose_documents(&create_test_pdf(2), &create_test_pdf(1), &options).unwrap();

    let (front, back) = split(result);
    let front_x = first_draw_x(&page_content(&front, page_ids(&front)[0]));
    let back_x = first_draw_x(&page_content(&back, page_ids(&back)[0]));
    assert!((front_x - expected_x(0)).abs() < 0.01);
    assert!((back_x - expected_x(0)).abs() < 0.01);
}

#[test]
fn test_replicate_back_policy() {
    let options = ImpositionOptions {
        blank_cells: BlankCellPolicy::ReplicateBack,
        ..Default::default()
    };
    let result = impose_documents(&create_test_pdf(9), &create_test_pdf(1), &options).unwrap();

    let doc = merged(result);
    let pages = page_ids(&doc);
    let last_front = page_content(&doc, pages[2]);
    let last_back = page_content(&doc, pages[3]);

    assert_eq!(draw_count(&last_front), 1);
    assert_eq!(blank_fill_count(&last_front), 0);
    assert_eq!(draw_count(&last_back), 8);
    assert_eq!(blank_fill_count(&last_back), 0);
}

#[test]
fn test_back_embedded_once() {
    let result = impose_documents(
        &create_test_pdf(9),
        &create_test_pdf(1),
        &ImpositionOptions::default(),
    )
    .unwrap();

    let doc = merged(result);
    let forms = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .map(|name| name == b"Form")
                .unwrap_or(false)
        })
        .count();

    // One XObject per front card plus the shared back
    assert_eq!(forms, 10);
}

#[test]
fn test_grid_lines_toggle() {
    let with_lines = merged(
        impose_documents(
            &create_test_pdf(1),
            &create_test_pdf(1),
            &ImpositionOptions::default(),
        )
        .unwrap(),
    );
    let content = page_content(&with_lines, page_ids(&with_lines)[0]);
    assert!(content.contains("0.8 0.8 0.8 RG"));
    assert_eq!(content.matches(" l S").count(), 5 + 3);

    let options = ImpositionOptions {
        grid_lines: false,
        ..Default::default()
    };
    let without_lines =
        merged(impose_documents(&create_test_pdf(1), &create_test_pdf(1), &options).unwrap());
    for page in page_ids(&without_lines) {
        assert!(!page_content(&without_lines, page).contains(" l S"));
    }
}

#[test]
fn test_multi_page_back_uses_first_page() {
    let result = impose_documents(
        &create_test_pdf(2),
        &create_test_pdf(3),
        &ImpositionOptions::default(),
    )
    .unwrap();

    let doc = merged(result);
    let back = page_content(&doc, page_ids(&doc)[1]);
    assert_eq!(draw_count(&back), 2);
}

#[test]
fn test_zero_width_front_page() {
    let front = create_sized_pdf(&[(612.0, 792.0), (612.0, 792.0), (0.0, 792.0)]);
    let result = impose_documents(&front, &create_test_pdf(1), &ImpositionOptions::default());

    match result {
        Err(ImposeError::MalformedSource { side, page, .. }) => {
            assert_eq!(side, SourceSide::Front);
            assert_eq!(page, 3);
        }
        other => panic!("Expected MalformedSource error, got {:?}", other),
    }
}

#[test]
fn test_degenerate_back_page() {
    let back = create_sized_pdf(&[(100.0, 0.0)]);
    let result = impose_documents(&create_test_pdf(1), &back, &ImpositionOptions::default());

    match result {
        Err(ImposeError::MalformedSource { side, page, .. }) => {
            assert_eq!(side, SourceSide::Back);
            assert_eq!(page, 1);
        }
        other => panic!("Expected MalformedSource error, got {:?}", other),
    }
}

#[test]
fn test_tiny_front_page_rejected() {
    let front = create_sized_pdf(&[(612.0, 792.0), (1e-39, 1e-39)]);
    let result = impose_documents(&front, &create_test_pdf(1), &ImpositionOptions::default());

    match result {
        Err(ImposeError::MalformedSource { side, page, .. }) => {
            assert_eq!(side, SourceSide::Front);
            assert_eq!(page, 2);
        }
        other => panic!("Expected MalformedSource error, got {:?}", other),
    }
}

#[test]
fn test_undecodable_content_stream() {
    let mut front = create_test_pdf(2);
    let first = page_ids(&front)[0];
    let mut dict = Dictionary::new();
    dict.set("Filter", Object::Name(b"BogusDecode".to_vec()));
    let content_id = front.add_object(Stream::new(dict, b"garbage".to_vec()));
    front
        .get_object_mut(first)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Contents", Object::Reference(content_id));

    let result = impose_documents(&front, &create_test_pdf(1), &ImpositionOptions::default());

    match result {
        Err(ImposeError::Placement { card, stage, .. }) => {
            assert_eq!(card, 1);
            assert_eq!(stage, PlacementStage::Embedding);
        }
        other => panic!("Expected Placement error, got {:?}", other),
    }
}

#[test]
fn test_embedding_failure_reports_card() {
    let mut front = create_test_pdf(3);
    let second = page_ids(&front)[1];
    front
        .get_object_mut(second)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Contents", Object::Reference((9999, 0)));

    let result = impose_documents(&front, &create_test_pdf(1), &ImpositionOptions::default());

    match result {
        Err(err @ ImposeError::Placement { .. }) => {
            assert!(err.to_string().starts_with("card 2 embedding failed"));
            if let ImposeError::Placement { card, stage, .. } = err {
                assert_eq!(card, 2);
                assert_eq!(stage, PlacementStage::Embedding);
            }
        }
        other => panic!("Expected Placement error, got {:?}", other),
    }
}

#[test]
fn test_garbage_front_bytes() {
    let result = generate_blocking(
        b"not a pdf",
        &to_bytes(create_test_pdf(1)),
        &ImpositionOptions::default(),
    );

    match result {
        Err(ImposeError::SourceDecode { side, .. }) => assert_eq!(side, SourceSide::Front),
        other => panic!("Expected SourceDecode error, got {:?}", other),
    }
}

#[test]
fn test_empty_back_document() {
    let result = generate_blocking(
        &to_bytes(create_test_pdf(4)),
        &to_bytes(create_test_pdf(0)),
        &ImpositionOptions::default(),
    );

    match result {
        Err(ImposeError::SourceDecode { side, .. }) => assert_eq!(side, SourceSide::Back),
        other => panic!("Expected SourceDecode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_options_rejected_before_decode() {
    let mut options = ImpositionOptions::default();
    options.layout.grid = Some(Grid::new(5, 2));

    let result = generate(b"not a pdf".to_vec(), Vec::new(), &options).await;

    match result {
        Err(ImposeError::Config(_)) => {}
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_preview_limits_sheets() {
    let front = create_test_pdf(20);
    let back = create_test_pdf(1);

    let result = generate_preview(&front, &back, &ImpositionOptions::default(), 1)
        .await
        .unwrap();
    let doc = merged(result);
    assert_eq!(doc.get_pages().len(), 2);

    let all = generate_preview(&front, &back, &ImpositionOptions::default(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(merged(all).get_pages().len(), 6);

    match generate_preview(&front, &back, &ImpositionOptions::default(), 0).await {
        Err(ImposeError::Config(_)) => {}
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_pdf() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    let path = temp.path();
    std::fs::write(path, to_bytes(create_test_pdf(5))).unwrap();

    let loaded = load_pdf(SourceSide::Front, path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 5);
}

#[tokio::test]
async fn test_save_output_split() {
    let dir = tempfile::tempdir().unwrap();
    let result = OutputResult::Split {
        front: to_bytes(create_test_pdf(1)),
        back: to_bytes(create_test_pdf(1)),
    };

    let written = save_output(&result, dir.path(), "deck").await.unwrap();

    assert_eq!(
        written,
        vec![dir.path().join("deck_front.pdf"), dir.path().join("deck_back.pdf")]
    );
    for path in written {
        assert!(path.exists());
    }
}

#[tokio::test]
async fn test_save_output_merged() {
    let dir = tempfile::tempdir().unwrap();
    let front = load_source_file_roundtrip(dir.path()).await;

    let result = generate(front, to_bytes(create_test_pdf(1)), &ImpositionOptions::default())
        .await
        .unwrap();
    let written = save_output(&result, dir.path(), "cards_print").await.unwrap();

    assert_eq!(written, vec![dir.path().join("cards_print.pdf")]);
    let reloaded = Document::load(&written[0]).unwrap();
    assert_eq!(reloaded.get_pages().len(), 2);
}

async fn load_source_file_roundtrip(dir: &std::path::Path) -> Vec<u8> {
    let path = dir.join("fronts.pdf");
    std::fs::write(&path, to_bytes(create_test_pdf(3))).unwrap();
    load_source_file(&path).await.unwrap()
}
