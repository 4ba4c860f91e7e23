//! Layout calculation modules for card imposition
//!
//! This module handles all the geometric calculations:
//! - Resolving grid, margins and cells per sheet from the configuration
//! - Mapping cell indices to grid positions and back-side mirroring
//! - Scale-to-fit and centering of source pages inside cells

mod cell;
mod fit;
mod resolve;
mod types;

pub use cell::*;
pub use fit::*;
pub use resolve::*;
pub use types::*;
