//! Chart rendering outside the TUI.
//!
//! - `ascii`: fixed-grid terminal chart for `dash report`
//! - `svg`: Plotters SVG chart embedded in the HTML page

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
