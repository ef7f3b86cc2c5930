//! Binary primitives shared by the *GoldSrc* asset crates.
//!
//! Every GoldSrc format is a set of fixed-size, little-endian records addressed through offsets.
//! This crate holds the pieces all of them agree on:
//!
//! - [`FixedSize`]: the on-disk size of a record, asserted once per record type so the layout
//!   never depends on compiler packing.
//! - [`TextureName`]: the 16 byte, NUL-terminated texture identifier used by WAD directories,
//!   MIP texture headers and BSP texture lumps.
//! - [`Palette`]: the 256 entry RGB palette trailing every indexed bitmap.
//! - [`ValidationError`]: the aggregate of semantic [`Problem`]s a validation pass found.
//!
//! ## Texture names
//!
//! | Offset (bytes) | Field | Description                                        |
//! |----------------|-------|----------------------------------------------------|
//! | 0x0000         | Name  | 16 bytes: ASCII, NUL-terminated, 15 usable chars   |
//!
//! Case is contextual: WAD directory entries store names upper-cased while the MIP texture
//! headers (and thus BSP texture lumps) store them lower-cased.
//!
//! ## Palettes
//!
//! | Offset (bytes) | Field  | Description                               |
//! |----------------|--------|-------------------------------------------|
//! | 0x0000         | Colors | 768 bytes: 256 RGB triples, one byte each |
//!

pub mod error;
pub mod humanize;
pub mod name;
pub mod palette;
pub mod record;
pub mod validation;

pub use name::{NameIssue, TextureName};
pub use palette::{Palette, Rgb};
pub use record::FixedSize;
pub use validation::{Problem, ProblemKind, ValidationError};
