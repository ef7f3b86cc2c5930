//! The lump contract and the lumps kept as opaque bytes.
//!

use std::fmt;
use std::io::{Read, Seek, SeekFrom, Write};

use goldsrc_types::record::stream_len;
use goldsrc_types::ValidationError;

use crate::error::{Error, Result};
use crate::header::{LumpEntry, LumpType};
use crate::texture::TextureLump;

/// Loading, writing and validating one lump.
pub trait LumpCodec: Sized {
    /// Read the lump described by `entry`, offsets relative to the start of the stream
    fn load<R: Read + Seek>(reader: &mut R, entry: LumpEntry) -> Result<Self>;

    /// Write the lump at the current position, returning the number of bytes written
    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64>;

    /// Report every semantic problem, never mutating the lump
    fn validate(&self) -> core::result::Result<(), ValidationError>;
}

/// A lump kept byte for byte as read
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawLump(Vec<u8>);

impl RawLump {
    /// Wrap bytes
    pub fn new(data: Vec<u8>) -> RawLump {
        RawLump(data)
    }

    /// The bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the lump is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RawLump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawLump({} bytes)", self.0.len())
    }
}

impl LumpCodec for RawLump {
    fn load<R: Read + Seek>(reader: &mut R, entry: LumpEntry) -> Result<Self> {
        let (offset, length) = entry.range().ok_or(Error::InvalidEntry {
            offset: entry.offset,
            length: entry.length,
        })?;

        let stream = stream_len(reader)?;
        if offset + length > stream {
            return Err(Error::LumpTruncated {
                offset,
                length,
                stream,
            });
        }

        reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; length as usize];
        reader.read_exact(&mut data)?;

        Ok(RawLump(data))
    }

    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        writer.write_all(&self.0)?;
        Ok(self.0.len() as u64)
    }

    fn validate(&self) -> core::result::Result<(), ValidationError> {
        Ok(())
    }
}

/// Any lump of a BSP: only the texture lump is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lump {
    /// Opaque bytes
    Raw(RawLump),
    /// Decoded texture lump
    Textures(TextureLump),
}

impl Default for Lump {
    fn default() -> Self {
        Lump::Raw(RawLump::default())
    }
}

impl Lump {
    /// Load a lump with the codec its type calls for
    pub fn load<R: Read + Seek>(lump: LumpType, reader: &mut R, entry: LumpEntry) -> Result<Lump> {
        Ok(match lump {
            LumpType::Textures => Lump::Textures(TextureLump::load(reader, entry)?),
            _ => Lump::Raw(RawLump::load(reader, entry)?),
        })
    }

    /// Write the lump, returning the number of bytes written
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        match self {
            Lump::Raw(raw) => raw.write(writer),
            Lump::Textures(textures) => textures.write(writer),
        }
    }

    /// Report every semantic problem of the lump
    pub fn validate(&self) -> core::result::Result<(), ValidationError> {
        match self {
            Lump::Raw(raw) => raw.validate(),
            Lump::Textures(textures) => textures.validate(),
        }
    }
}
