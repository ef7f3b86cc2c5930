//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::name::TextureName;

/// Error type for library
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// texture name is empty
    #[error("texture name is empty")]
    EmptyName,

    /// name is too long
    #[error("name {name:?} is too long, {len}>{}", TextureName::MAX_LEN)]
    NameTooLong {
        /// The rejected name
        name: String,
        /// Its length in bytes
        len: usize,
    },

    /// name contains bytes that cannot be stored
    #[error("name {0:?} contains non-ASCII or NUL characters")]
    InvalidName(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
