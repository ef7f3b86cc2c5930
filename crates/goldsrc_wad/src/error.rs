//! Error types that can be emitted from this library

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

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

    /// file is not a WAD3 archive
    #[error("file is not a WAD3 archive, found magic {found}")]
    InvalidMagic {
        /// The bytes found in place of `WAD3`
        found: String,
    },

    /// header holds negative values
    #[error("invalid WAD header: {count} entries at offset {offset}")]
    InvalidHeader {
        /// Declared number of entries
        count: i32,
        /// Declared directory offset
        offset: i32,
    },

    /// directory does not fit in the file
    #[error("directory at 0x{offset:x} ({count} entries) ends past the end of the file ({len} bytes)")]
    DirectoryOutOfBounds {
        /// Directory offset
        offset: u64,
        /// Number of entries
        count: u64,
        /// Length of the file
        len: u64,
    },

    /// two entries share a name
    #[error("entry {index} has a duplicated name: {name}")]
    DuplicateName {
        /// Index of the second occurrence
        index: usize,
        /// The shared name
        name: String,
    },

    /// entry is not a MIP texture
    #[error("entry {index} has unsupported type 0x{found:02X}, expected 0x43")]
    UnsupportedEntryType {
        /// Entry index
        index: usize,
        /// Type tag found
        found: u8,
    },

    /// entry is compressed
    #[error("entry {index} is compressed (method {found}), compression is not supported")]
    UnsupportedCompression {
        /// Entry index
        index: usize,
        /// Compression tag found
        found: u8,
    },

    /// entry sizes disagree
    #[error("entry {index} has size {size} but uncompressed size {uncompressed}")]
    SizeMismatch {
        /// Entry index
        index: usize,
        /// Stored size
        size: i32,
        /// Stored uncompressed size
        uncompressed: i32,
    },

    /// entry points before the start of the file
    #[error("entry {index} has negative offset {offset}")]
    NegativeOffset {
        /// Entry index
        index: usize,
        /// Stored offset
        offset: i32,
    },

    /// payload size disagrees with the directory
    #[error("entry {index} ({name}) declares {declared} bytes but its texture takes {computed}")]
    InconsistentSize {
        /// Entry index
        index: usize,
        /// Entry name
        name: String,
        /// Size stored in the directory
        declared: i32,
        /// Size computed from the texture
        computed: u64,
    },

    /// unable to load an entry
    #[error("unable to read entry {index}")]
    Entry {
        /// Entry index
        index: usize,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// a texture with the same name is already present
    #[error("a texture named {0} already exists in the archive")]
    TextureExists(String),

    /// created textures must be sized in multiples of 16
    #[error("dimensions {width}x{height} must be non-zero multiples of 16")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// pixel buffer does not match the texture
    #[error("pixel data has {found} bytes, expected {expected}")]
    DataLength {
        /// `width * height`
        expected: usize,
        /// Length of the buffer given
        found: usize,
    },

    /// palette size field other than 256
    #[error("palette size is {0}, expected 256")]
    InvalidPaletteSize(i16),

    /// mip level outside the stream
    #[error("mip level {level} at 0x{offset:x} ({len} bytes) ends past the end of the file ({stream} bytes)")]
    MipLevelOutOfBounds {
        /// Level index
        level: usize,
        /// Absolute offset of the level
        offset: u64,
        /// Level length
        len: u64,
        /// Length of the file
        stream: u64,
    },

    /// archive larger than the format can address
    #[error("archive is too large: {0} bytes")]
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
