//! Reporting utilities: number formatting and text/markdown/HTML renderings
//! of a [`ViewModel`](crate::app::view::ViewModel).
//!
//! We keep formatting code in one place so:
//! - the pipeline stays free of presentation details
//! - output changes are localized (important for golden tests)

pub mod format;
pub mod html;

pub use format::*;
pub use html::*;
