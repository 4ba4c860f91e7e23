//! Sheet population for card imposition

use crate::layout::{
    CardFormat, FittedPage, LayoutConstants, Rect, cell_bounds, fit_source_page, place_in_cell,
    sheet_slots,
};
use crate::marks::generate_grid_lines;
use crate::options::ImpositionOptions;
use crate::render::{EmbeddedPage, OutputDocument, PageEmbedder, SheetCanvas};
use crate::types::*;
use lopdf::Document;

/// Output documents receiving front and back sheets
pub(crate) enum SheetOutputs {
    /// Front and back sheets alternate in one document
    Merged(OutputDocument),
    /// Fronts and backs go to separate documents
    Split {
        front: OutputDocument,
        back: OutputDocument,
    },
}

impl SheetOutputs {
    pub(crate) fn new(mode: OutputMode, constants: &LayoutConstants) -> Self {
        if mode.is_split() {
            SheetOutputs::Split {
                front: OutputDocument::new(constants.sheet),
                back: OutputDocument::new(constants.sheet),
            }
        } else {
            SheetOutputs::Merged(OutputDocument::new(constants.sheet))
        }
    }

    fn front_mut(&mut self) -> &mut OutputDocument {
        match self {
            SheetOutputs::Merged(doc) => doc,
            SheetOutputs::Split { front, .. } => front,
        }
    }

    fn back_mut(&mut self) -> &mut OutputDocument {
        match self {
            SheetOutputs::Merged(doc) => doc,
            SheetOutputs::Split { back, .. } => back,
        }
    }

    /// Append one physical sheet, front side first
    fn add_sheet(&mut self, front: SheetCanvas, back: SheetCanvas) {
        front.finish(self.front_mut());
        back.finish(self.back_mut());
    }

    pub(crate) fn into_result(self) -> Result<OutputResult> {
        match self {
            SheetOutputs::Merged(doc) => Ok(OutputResult::Merged(doc.save_to_bytes()?)),
            SheetOutputs::Split { front, back } => Ok(OutputResult::Split {
                front: front.save_to_bytes()?,
                back: back.save_to_bytes()?,
            }),
        }
    }
}

/// The shared back design, embedded once and reused for every cell
struct BackDesign {
    page: EmbeddedPage,
    fit: FittedPage,
}

impl BackDesign {
    fn prepare(
        pages: &mut PageEmbedder<'_>,
        output: &mut OutputDocument,
        card: &CardFormat,
    ) -> Result<Self> {
        let page_box = pages.page_box(0)?;
        let fit = fit_source_page(SourceSide::Back, 0, page_box.dimensions(), card)?;
        let page = pages.embed(output.document_mut(), 0)?;
        Ok(Self { page, fit })
    }

    fn draw(&self, canvas: &mut SheetCanvas, cell: &Rect) {
        canvas.draw_page(&self.page, &place_in_cell(cell, &self.fit));
    }
}

/// Fill every sheet for `card_count` front pages.
///
/// Only page 1 of `back` is used.
pub(crate) fn populate_sheets(
    front: &Document,
    back: &Document,
    card_count: usize,
    constants: &LayoutConstants,
    options: &ImpositionOptions,
) -> Result<SheetOutputs> {
    let mut outputs = SheetOutputs::new(options.mode, constants);
    let total_sheets = constants.total_sheets(card_count);
    if total_sheets == 0 {
        log::info!("No cards to impose; writing empty output");
        return Ok(outputs);
    }

    let mirror = options.mode.mirrors_backs();
    let grid_ops = options.grid_lines.then(|| generate_grid_lines(constants));

    let mut front_pages = PageEmbedder::new(SourceSide::Front, front);
    let mut back_pages = PageEmbedder::new(SourceSide::Back, back);
    let back_design = BackDesign::prepare(&mut back_pages, outputs.back_mut(), &constants.card)?;

    let mut blank_cells = 0;

    for sheet_index in 0..total_sheets {
        let mut front_canvas = SheetCanvas::new();
        let mut back_canvas = SheetCanvas::new();

        if let Some(ops) = &grid_ops {
            front_canvas.push_ops(ops.clone());
            back_canvas.push_ops(ops.clone());
        }

        for slot in sheet_slots(constants, sheet_index, card_count, mirror) {
            let front_cell = cell_bounds(constants, slot.front);
            let back_cell = cell_bounds(constants, slot.back);

            match slot.card_index {
                Some(card_index) => {
                    log::trace!(
                        "Card {} -> sheet {} cell {} (back col {})",
                        card_index + 1,
                        sheet_index + 1,
                        slot.cell_index,
                        slot.back.col
                    );
                    place_front_card(
                        &mut front_canvas,
                        &mut front_pages,
                        outputs.front_mut(),
                        card_index,
                        &front_cell,
                        &constants.card,
                    )?;
                    back_design.draw(&mut back_canvas, &back_cell);
                }
                None => {
                    blank_cells += 1;
                    match options.blank_cells {
                        BlankCellPolicy::FillWhite => {
                            front_canvas.fill_blank(&front_cell);
                            back_canvas.fill_blank(&back_cell);
                        }
                        BlankCellPolicy::ReplicateBack => {
                            back_design.draw(&mut back_canvas, &back_cell);
                        }
                    }
                }
            }
        }

        log::debug!(
            "Sheet {}/{}: {} cards, {} white fills",
            sheet_index + 1,
            total_sheets,
            front_canvas.image_count(),
            front_canvas.blank_count() + back_canvas.blank_count()
        );
        outputs.add_sheet(front_canvas, back_canvas);
    }

    log::info!(
        "Imposed {} cards on {} sheets ({} blank cells, mirrored backs: {})",
        card_count,
        total_sheets,
        blank_cells,
        mirror
    );

    Ok(outputs)
}

/// Measure, embed and draw one front card.
fn place_front_card(
    canvas: &mut SheetCanvas,
    pages: &mut PageEmbedder<'_>,
    output: &mut OutputDocument,
    card_index: usize,
    cell: &Rect,
    card: &CardFormat,
) -> Result<()> {
    let page_box = pages
        .page_box(card_index)
        .map_err(|e| e.at_card(card_index, PlacementStage::Measuring))?;
    let fit = fit_source_page(SourceSide::Front, card_index, page_box.dimensions(), card)?;

    let embedded = pages
        .embed(output.document_mut(), card_index)
        .map_err(|e| e.at_card(card_index, PlacementStage::Embedding))?;

    canvas.draw_page(&embedded, &place_in_cell(cell, &fit));
    Ok(())
}
