pub mod constants;
pub mod impose;
pub mod layout;
pub mod marks;
mod options;
mod preview;
pub mod render;
mod stats;
mod types;

pub use impose::{
    decode_source, generate, generate_blocking, impose_documents, load_pdf, load_source_file,
    save_output,
};
pub use layout::{CardFormat, Grid, LayoutConfig, LayoutConstants, SheetFormat, resolve_layout};
pub use options::*;
pub use preview::generate_preview;
pub use stats::{calculate_statistics, preview_statistics, statistics_for_cards};
pub use types::*;
