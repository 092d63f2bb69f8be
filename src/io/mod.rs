//! Input/output helpers.
//!
//! - CSV ingest of the forecast artifacts (`ingest`)
//! - data directory inspection (`assets`)
//! - filtered-row exports (`export`)

pub mod assets;
pub mod export;
pub mod ingest;

pub use assets::*;
pub use export::*;
pub use ingest::*;
