//! Error types that can be emitted from this library

use std::path::PathBuf;

use goldsrc_types::ValidationError;
use miette::Diagnostic;
use thiserror::Error;

use crate::header::LumpType;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for texture name errors
    #[error(transparent)]
    #[diagnostic(transparent)]
    Name(#[from] goldsrc_types::error::Error),

    /// Transparent wrapper for MIP texture errors
    #[error(transparent)]
    #[diagnostic(transparent)]
    Wad(#[from] goldsrc_wad::error::Error),

    /// Transparent wrapper for the aggregate of a validation pass
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    /// version other than 30
    #[error("unable to read BSP version other than {expected}, got: {found}")]
    UnsupportedVersion {
        /// The supported version
        expected: i32,
        /// Version found in the header
        found: i32,
    },

    /// lump offset past the declared file size
    #[error("{lump} offset is out of bounds: 0x{offset:x} > 0x{bound:x}")]
    LumpOutOfBounds {
        /// Offending lump
        lump: LumpType,
        /// Its offset
        offset: i32,
        /// Header size plus every lump length
        bound: i64,
    },

    /// negative lump offset
    #[error("{lump} offset is out of bounds: {offset} < 0")]
    NegativeOffset {
        /// Offending lump
        lump: LumpType,
        /// Its offset
        offset: i32,
    },

    /// negative lump length
    #[error("{lump} length is negative: {length}")]
    NegativeLength {
        /// Offending lump
        lump: LumpType,
        /// Its length
        length: i32,
    },

    /// lump table entry that cannot be addressed
    #[error("invalid lump entry: offset {offset}, length {length}")]
    InvalidEntry {
        /// Entry offset
        offset: i32,
        /// Entry length
        length: i32,
    },

    /// lump runs past the end of the stream
    #[error("lump at 0x{offset:x} ({length} bytes) ends past the end of the file ({stream} bytes)")]
    LumpTruncated {
        /// Lump offset
        offset: u64,
        /// Lump length
        length: u64,
        /// Length of the file
        stream: u64,
    },

    /// unable to load or write a lump
    #[error("unable to process {lump}")]
    Lump {
        /// Lump being processed
        lump: LumpType,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// lump loaded but failed validation
    #[error("unable to validate {lump}")]
    Invalid {
        /// Lump being validated
        lump: LumpType,
        /// Every problem found
        #[source]
        #[diagnostic_source]
        source: ValidationError,
    },

    /// texture lump too short for its count
    #[error("texture lump of {0} bytes cannot hold the texture count")]
    #[diagnostic(help("a lump with no textures still stores a zero count"))]
    TextureLumpTooShort(i32),

    /// texture count cannot fit in the lump
    #[error("texture count {count} cannot fit in a {length} byte lump")]
    TextureCount {
        /// Declared count
        count: u32,
        /// Lump length
        length: i32,
    },

    /// texture offset outside the lump
    #[error("texture {index} offset out of bounds: {offset} not in [{min}, {max}]")]
    TextureOffsetOutOfBounds {
        /// Texture index
        index: usize,
        /// Offset relative to the lump start
        offset: i32,
        /// End of the offset table
        min: u64,
        /// Lump length
        max: i32,
    },

    /// unable to read or write a texture
    #[error("unable to process texture {index}")]
    Texture {
        /// Texture index
        index: usize,
        /// Underlying failure
        #[source]
        #[diagnostic_source]
        source: goldsrc_wad::error::Error,
    },

    /// no texture at this index
    #[error("texture index {index} is out of range, the lump holds {count}")]
    TextureIndex {
        /// Requested index
        index: usize,
        /// Number of textures
        count: usize,
    },

    /// level larger than the format can address
    #[error("level is too large: {0} bytes")]
    TooLarge(u64),

    /// unable to open a file
    #[error("unable to open {}", .path.display())]
    Open {
        /// Path of the file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// unable to create a file
    #[error("unable to create {}", .path.display())]
    Create {
        /// Path of the file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
