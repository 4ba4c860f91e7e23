use crate::impose::limit_cards;
use crate::options::ImpositionOptions;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for the imposition of `front`
pub fn calculate_statistics(
    front: &Document,
    options: &ImpositionOptions,
) -> Result<ImpositionStatistics> {
    statistics_for_cards(front.get_pages().len(), options)
}

/// Statistics for a preview limited to the first `max_sheets` sheets
pub fn preview_statistics(
    front: &Document,
    options: &ImpositionOptions,
    max_sheets: usize,
) -> Result<ImpositionStatistics> {
    let constants = options.validate()?;
    let cards = limit_cards(front.get_pages().len(), &constants, Some(max_sheets));
    statistics_for_cards(cards, options)
}

/// Calculate statistics for a known number of cards
pub fn statistics_for_cards(
    cards: usize,
    options: &ImpositionOptions,
) -> Result<ImpositionStatistics> {
    let constants = options.validate()?;
    let cells_per_sheet = constants.cells_per_sheet;
    let sheets = constants.total_sheets(cards);

    // Only the last sheet can be partially filled
    let blank_cells = sheets * cells_per_sheet - cards;

    let (output_documents, pages_per_document) = if options.mode.is_split() {
        (2, sheets)
    } else {
        (1, sheets * 2)
    };

    Ok(ImpositionStatistics {
        cards,
        cells_per_sheet,
        sheets,
        output_documents,
        pages_per_document,
        blank_cells,
    })
}
