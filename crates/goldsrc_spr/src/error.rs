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

    /// file is not a sprite
    #[error("cannot find magic string, probably not a sprite file: found {found}")]
    #[diagnostic(help("sprites start with IDSP"))]
    InvalidMagic {
        /// The bytes found in place of `IDSP`
        found: String,
    },

    /// version other than 2
    #[error("unhandled sprite version {found}, expected version {expected}")]
    #[diagnostic(help("version 1 sprites come from Quake and carry no palette"))]
    UnsupportedVersion {
        /// The supported version
        expected: i32,
        /// Version found in the header
        found: i32,
    },

    /// palette size field other than 256
    #[error("unhandled palette size: {0}, expected 256")]
    InvalidPaletteSize(i16),

    /// negative frame count
    #[error("invalid frame count: {0}")]
    InvalidFrameCount(i32),

    /// group frames are not implemented by the engine
    #[error("unhandled frame type: Group")]
    GroupFrame,

    /// frame type that is neither single nor group
    #[error("unhandled frame type: invalid ({0})")]
    InvalidFrameType(i32),

    /// frame with a non-positive side
    #[error("invalid frame dimensions: {width}×{height}")]
    InvalidFrameDimensions {
        /// Declared width
        width: i32,
        /// Declared height
        height: i32,
    },

    /// frame pixels run past the end of the stream
    #[error("frame data ({len} bytes) runs past the end of the file ({remaining} bytes left)")]
    FrameTruncated {
        /// Declared pixel count
        len: u64,
        /// Bytes left in the stream
        remaining: u64,
    },

    /// pixel buffer does not match the frame dimensions
    #[error("frame data holds {found} bytes, expected {expected}")]
    DataLength {
        /// `width × height`
        expected: usize,
        /// Length given
        found: usize,
    },

    /// sprite dimensions that are zero or not multiples of 16
    #[error("sprite dimensions must be non-zero multiples of 16, got {width}×{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// unable to read or write a frame
    #[error("unable to process frame {index}")]
    Frame {
        /// Frame index
        index: usize,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// more frames than the header can count
    #[error("too many frames: {0}")]
    TooManyFrames(usize),

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
