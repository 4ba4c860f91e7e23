use crate::layout::{LayoutConfig, LayoutConstants, resolve_layout};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Card sheet generation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionOptions {
    // Geometry
    pub layout: LayoutConfig,

    // Output splitting and back mirroring
    pub mode: OutputMode,

    // Unfilled cells on the last sheet
    pub blank_cells: BlankCellPolicy,

    // Cut guides
    pub grid_lines: bool,
}

impl Default for ImpositionOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            mode: OutputMode::default(),
            blank_cells: BlankCellPolicy::default(),
            grid_lines: true,
        }
    }
}

impl ImpositionOptions {
    /// Default options with the given output mode
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options, returning the resolved layout
    pub fn validate(&self) -> Result<LayoutConstants> {
        resolve_layout(&self.layout)
    }
}
