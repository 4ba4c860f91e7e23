use anyhow::{Context, Result};
use card_impose::constants::{mm_to_pt, pt_to_mm};
use card_impose::{BlankCellPolicy, Grid, ImpositionOptions, OutputMode, SourceSide};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cardsheet",
    about = "Impose trading card fronts and a shared back onto print sheets",
    version
)]
struct Cli {
    /// Front PDF, one card per page
    #[arg(short, long)]
    front: PathBuf,

    /// Back PDF, page 1 is used for every card
    #[arg(short, long)]
    back: PathBuf,

    /// Directory for the generated PDF(s)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name stem for the generated PDF(s)
    #[arg(short, long, default_value = "cards_print")]
    name: String,

    /// Output mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// What to print in cells left empty on the last sheet
    #[arg(long, value_enum)]
    blank: Option<BlankArg>,

    /// Card width in mm
    #[arg(long)]
    card_width_mm: Option<f32>,

    /// Card height in mm
    #[arg(long)]
    card_height_mm: Option<f32>,

    /// Grid columns per sheet
    #[arg(long, requires = "rows")]
    cols: Option<usize>,

    /// Grid rows per sheet
    #[arg(long, requires = "cols")]
    rows: Option<usize>,

    /// Omit the cut guide grid
    #[arg(long)]
    no_grid_lines: bool,

    /// JSON options file; command line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Only generate the first N sheets
    #[arg(long)]
    preview: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Separate,
    Merged,
    SeparateMirrored,
}

#[derive(Clone, Copy, ValueEnum)]
enum BlankArg {
    FillWhite,
    ReplicateBack,
}

impl From<ModeArg> for OutputMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Separate => Self::SeparateFrontBack,
            ModeArg::Merged => Self::MergedAlternating,
            ModeArg::SeparateMirrored => Self::SeparateFrontBackMirrored,
        }
    }
}

impl From<BlankArg> for BlankCellPolicy {
    fn from(arg: BlankArg) -> Self {
        match arg {
            BlankArg::FillWhite => Self::FillWhite,
            BlankArg::ReplicateBack => Self::ReplicateBack,
        }
    }
}

impl Cli {
    async fn options(&self) -> Result<ImpositionOptions> {
        let mut options = match &self.config {
            Some(path) => ImpositionOptions::load(path)
                .await
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => ImpositionOptions::default(),
        };

        if let Some(mode) = self.mode {
            options.mode = mode.into();
        }
        if let Some(blank) = self.blank {
            options.blank_cells = blank.into();
        }
        if let Some(width) = self.card_width_mm {
            options.layout.card.width = mm_to_pt(width);
        }
        if let Some(height) = self.card_height_mm {
            options.layout.card.height = mm_to_pt(height);
        }
        if let (Some(cols), Some(rows)) = (self.cols, self.rows) {
            options.layout.grid = Some(Grid::new(cols, rows));
        }
        if self.no_grid_lines {
            options.grid_lines = false;
        }

        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" });
    env_logger::Builder::from_env(env).init();

    let options = cli.options().await?;

    let front_bytes = card_impose::load_source_file(&cli.front)
        .await
        .with_context(|| format!("Failed to read {}", cli.front.display()))?;
    let back_bytes = card_impose::load_source_file(&cli.back)
        .await
        .with_context(|| format!("Failed to read {}", cli.back.display()))?;
    let front_doc = card_impose::decode_source(SourceSide::Front, &front_bytes)?;

    // Calculate and show statistics for what will actually be written
    let stats = match cli.preview {
        Some(max_sheets) => card_impose::preview_statistics(&front_doc, &options, max_sheets)?,
        None => card_impose::calculate_statistics(&front_doc, &options)?,
    };
    match cli.preview {
        Some(max_sheets) => println!("Card Sheet Statistics (preview, up to {} sheets):", max_sheets),
        None => println!("Card Sheet Statistics:"),
    }
    println!("  Cards: {}", stats.cards);
    println!(
        "  Card size: {:.1} x {:.1} mm",
        pt_to_mm(options.layout.card.width),
        pt_to_mm(options.layout.card.height)
    );
    println!("  Cells per sheet: {}", stats.cells_per_sheet);
    println!("  Sheets: {}", stats.sheets);
    println!("  Output documents: {}", stats.output_documents);
    println!("  Pages per document: {}", stats.pages_per_document);
    println!("  Blank cells: {}", stats.blank_cells);

    if cli.stats_only {
        return Ok(());
    }

    let result = match cli.preview {
        Some(max_sheets) => {
            let back_doc = card_impose::decode_source(SourceSide::Back, &back_bytes)?;
            card_impose::generate_preview(&front_doc, &back_doc, &options, max_sheets).await?
        }
        None => card_impose::generate(front_bytes, back_bytes, &options).await?,
    };

    let written = card_impose::save_output(&result, &cli.output_dir, &cli.name)
        .await
        .with_context(|| format!("Failed to write into {}", cli.output_dir.display()))?;
    for path in written {
        println!("Generated → {}", path.display());
    }

    Ok(())
}
