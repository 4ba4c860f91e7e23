//! Document I/O operations for card imposition

use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Decode one of the input documents.
///
/// Parse failures and encrypted documents are reported as
/// [`ImposeError::SourceDecode`] with the underlying message.
pub fn decode_source(side: SourceSide, bytes: &[u8]) -> Result<Document> {
    let doc = Document::load_mem(bytes).map_err(|e| ImposeError::SourceDecode {
        side,
        reason: e.to_string(),
    })?;

    if doc.is_encrypted() {
        return Err(ImposeError::SourceDecode {
            side,
            reason: "encrypted documents are not supported".to_string(),
        });
    }

    Ok(doc)
}

/// Read an input file from disk
pub async fn load_source_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path.as_ref()).await?)
}

/// Load a single PDF document
pub async fn load_pdf(side: SourceSide, path: impl AsRef<Path>) -> Result<Document> {
    let bytes = load_source_file(path).await?;
    tokio::task::spawn_blocking(move || decode_source(side, &bytes)).await?
}

/// Write a generation result into `dir`.
///
/// Split output becomes `<stem>_front.pdf` and `<stem>_back.pdf`, merged
/// output becomes `<stem>.pdf`. Returns the written paths.
pub async fn save_output(
    result: &OutputResult,
    dir: impl AsRef<Path>,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let files: Vec<(PathBuf, &[u8])> = match result {
        OutputResult::Split { front, back } => vec![
            (dir.join(format!("{}_front.pdf", stem)), front.as_slice()),
            (dir.join(format!("{}_back.pdf", stem)), back.as_slice()),
        ],
        OutputResult::Merged(bytes) => vec![(dir.join(format!("{}.pdf", stem)), bytes.as_slice())],
    };

    let mut written = Vec::with_capacity(files.len());
    for (path, bytes) in files {
        tokio::fs::write(&path, bytes).await?;
        written.push(path);
    }
    Ok(written)
}
