use crate::impose::impose_limited;
use crate::options::ImpositionOptions;
use crate::types::*;
use lopdf::Document;

/// Generate a preview of the imposition
/// Returns output holding only the first `max_sheets` sheets
pub async fn generate_preview(
    front: &Document,
    back: &Document,
    options: &ImpositionOptions,
    max_sheets: usize,
) -> Result<OutputResult> {
    if max_sheets == 0 {
        return Err(ImposeError::Config(
            "Preview needs at least one sheet".to_string(),
        ));
    }
    options.validate()?;

    let front = front.clone();
    let back = back.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        impose_limited(&front, &back, &options, Some(max_sheets))
    })
    .await?
}
