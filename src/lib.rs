//! Image extraction from classic Mac OS resource forks
//!
//! `PICT` pictures (version 1, monochrome), `ICON` and `ICN#` resources are
//! located with [`macres::fork`], rendered onto a 1-bit [`Canvas`],
//! upscaled with [`resample`] and written out as grayscale PNG.

pub mod error;
pub mod macgfx;
pub mod macres;

pub use error::{Error, Result};
pub use macgfx::canvas::Canvas;
pub use macgfx::png::encode_raster;
pub use macgfx::resample::{resample, GrayImage};
pub use macgfx::{decode_record, RecordKind};
pub use macres::fork::list_records;
pub use macres::resource::{Record, ResourceID, ResourceType};
