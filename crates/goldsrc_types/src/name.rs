//! Fixed-size, NUL-terminated texture names.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use binrw::{BinRead, BinWrite};

use crate::error::{Error, Result};
use crate::record::FixedSize;

/// A 16 byte, NUL-terminated ASCII texture name.
///
/// The raw bytes are kept as read, including whatever follows the terminator, so that
/// re-serializing an untouched name reproduces the input exactly. Names built through
/// [`TextureName::new`] are zero-filled.
#[derive(BinRead, BinWrite, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct TextureName([u8; 16]);

impl FixedSize for TextureName {
    const SIZE: usize = 16;
}

const _: () = assert!(TextureName::SIZE == TextureName::MAX_LEN + 1);

/// A semantic problem with a stored name, see [`TextureName::issues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameIssue {
    /// The first byte is the terminator
    Empty,
    /// None of the 16 bytes is a terminator
    Unterminated,
    /// After upper-casing, the name holds something other than printable, non-blank ASCII
    InvalidCharacters,
    /// A `+` or `-` animation marker is not followed by a frame character and a base name
    InvalidMarker(char),
}

impl TextureName {
    /// Usable characters, the last byte is reserved for the terminator
    pub const MAX_LEN: usize = 15;

    /// Build a name from a string, zero-filling the unused bytes.
    pub fn new(name: &str) -> Result<TextureName> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        if name.len() > Self::MAX_LEN {
            return Err(Error::NameTooLong {
                name: name.to_owned(),
                len: name.len(),
            });
        }

        if !name.is_ascii() || name.bytes().any(|b| b == 0) {
            return Err(Error::InvalidName(name.to_owned()));
        }

        let mut raw = [0u8; 16];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        Ok(TextureName(raw))
    }

    /// Wrap raw bytes as found on disk, without any check.
    pub const fn from_raw(raw: [u8; 16]) -> TextureName {
        TextureName(raw)
    }

    /// The raw 16 bytes, as they will be written
    pub const fn raw(&self) -> &[u8; 16] {
        &self.0
    }

    /// The bytes up to (excluding) the terminator, or all 16 bytes when unterminated
    pub fn as_bytes(&self) -> &[u8] {
        match self.0.iter().position(|&b| b == 0) {
            Some(end) => &self.0[..end],
            None => &self.0,
        }
    }

    /// The same name with everything after the terminator zeroed.
    ///
    /// Two names are the same texture exactly when their trimmed forms are equal, whether or
    /// not their bytes are valid text.
    pub fn trimmed(&self) -> TextureName {
        let mut raw = [0u8; 16];
        let bytes = self.as_bytes();
        raw[..bytes.len()].copy_from_slice(bytes);
        TextureName(raw)
    }

    /// Whether the name holds a NUL terminator
    pub fn is_terminated(&self) -> bool {
        self.0.contains(&0)
    }

    /// Whether the name has no characters before its terminator
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// The name as text, replacing anything that is not UTF-8
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// The same name upper-cased, the WAD directory convention
    pub fn to_uppercase(&self) -> Result<TextureName> {
        TextureName::new(&self.to_string_lossy().to_ascii_uppercase())
    }

    /// The same name lower-cased, the MIP texture header convention
    pub fn to_lowercase(&self) -> Result<TextureName> {
        TextureName::new(&self.to_string_lossy().to_ascii_lowercase())
    }

    /// Compare against a string ignoring ASCII case
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.as_bytes().eq_ignore_ascii_case(other.as_bytes())
    }

    /// Every semantic problem with this name, empty when the name is valid.
    pub fn issues(&self) -> Vec<NameIssue> {
        let mut issues = Vec::new();

        if self.is_empty() {
            issues.push(NameIssue::Empty);
        }

        if !self.is_terminated() {
            issues.push(NameIssue::Unterminated);
        }

        let upper = self.as_bytes().to_ascii_uppercase();
        if !upper.is_empty() && !upper.iter().all(u8::is_ascii_graphic) {
            issues.push(NameIssue::InvalidCharacters);
        }

        if let Some(marker) = invalid_marker(&upper) {
            issues.push(NameIssue::InvalidMarker(marker));
        }

        issues
    }
}

// `+0name`..`+9name` and `+aname`..`+jname` are animation sequences, `-0name`..`-9name`
// random tilings. The marker is only meaningful with a frame character and a base name.
fn invalid_marker(upper: &[u8]) -> Option<char> {
    let (&marker, rest) = upper.split_first()?;
    let valid = match marker {
        b'+' => matches!(rest.first(), Some(c) if c.is_ascii_digit() || (b'A'..=b'J').contains(c)),
        b'-' => matches!(rest.first(), Some(c) if c.is_ascii_digit()),
        _ => return None,
    };

    if valid && rest.len() > 1 {
        None
    } else {
        Some(marker as char)
    }
}

impl fmt::Display for TextureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for TextureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureName({:?})", self.to_string_lossy())
    }
}

impl FromStr for TextureName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TextureName::new(s)
    }
}

impl TryFrom<&str> for TextureName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        TextureName::new(value)
    }
}
