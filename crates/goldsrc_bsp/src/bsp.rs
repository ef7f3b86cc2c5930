//! Types for reading, validating and rewriting whole BSP files
//!

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use binrw::{BinRead, BinWrite};
use bon::Builder;
use goldsrc_types::record::{write_padding, FixedSize};
use goldsrc_types::ValidationError;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::header::{BspHeader, LumpEntry, LumpType};
use crate::lump::{Lump, RawLump};
use crate::texture::TextureLump;

/// Lumps are padded to this alignment when written
const LUMP_ALIGNMENT: u64 = 4;

/// Options for how a BSP file should be read
#[derive(Debug, Clone, Copy, Builder)]
pub struct ReadOptions {
    /// Validate each lump right after loading it, failing on the first lump with problems
    #[builder(default = true)]
    pub validate: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// A BSP level held in memory
///
/// ```no_run
/// use std::collections::HashMap;
///
/// fn rename(path: &str, output: &str) -> goldsrc_bsp::error::Result<()> {
///     let mut bsp = goldsrc_bsp::Bsp::open(path)?;
///     println!("{:?}", bsp.texture_names());
///
///     let renames = HashMap::from([("crate01".to_string(), "box_wood".to_string())]);
///     bsp.apply_renames(&renames)?;
///     bsp.save(output)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bsp {
    header: BspHeader,
    lumps: [Lump; LumpType::COUNT],
}

impl Bsp {
    /// Read and validate a BSP.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Bsp> {
        Bsp::read_with_options(reader, ReadOptions::default())
    }

    /// Read a BSP: header first, then every lump in table order.
    ///
    /// Any failure aborts the whole read and names the lump involved.
    #[instrument(skip(reader), err)]
    pub fn read_with_options<R: Read + Seek>(reader: &mut R, options: ReadOptions) -> Result<Bsp> {
        reader.seek(SeekFrom::Start(0))?;
        let header = BspHeader::read(reader)?;
        header.validate()?;
        debug!("{header}");

        let mut lumps: [Lump; LumpType::COUNT] = Default::default();
        for lump_type in LumpType::ALL {
            let entry = header.entry(lump_type);
            let lump = Lump::load(lump_type, reader, entry).map_err(|e| Error::Lump {
                lump: lump_type,
                source: Box::new(e),
            })?;

            if options.validate {
                lump.validate().map_err(|source| Error::Invalid {
                    lump: lump_type,
                    source,
                })?;
            }

            debug!(lump = %lump_type, length = entry.length, "loaded");
            lumps[lump_type.index()] = lump;
        }

        Ok(Bsp { header, lumps })
    }

    /// Read a BSP from a file
    pub fn open(path: impl AsRef<Path>) -> Result<Bsp> {
        Bsp::open_with_options(path, ReadOptions::default())
    }

    /// Read a BSP from a file with options
    pub fn open_with_options(path: impl AsRef<Path>, options: ReadOptions) -> Result<Bsp> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;

        Bsp::read_with_options(&mut BufReader::new(file), options)
    }

    /// Every problem of every lump, aggregated
    pub fn validate(&self) -> core::result::Result<(), ValidationError> {
        self.lumps
            .iter()
            .filter_map(|lump| lump.validate().err())
            .reduce(ValidationError::merge)
            .map_or(Ok(()), Err)
    }

    /// Write the whole level, lumps laid out in the compiler order.
    ///
    /// The header is written first with an empty lump table, then rewritten once every lump
    /// offset is known. Offsets are relative to where the writer started. On error the output
    /// is truncated and must be discarded. Returns the number of bytes written.
    #[instrument(skip_all, err)]
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        let start = writer.stream_position()?;

        let mut header = BspHeader {
            version: BspHeader::VERSION,
            lumps: Default::default(),
        };
        header.write(writer)?;

        let mut position = BspHeader::SIZE as u64;
        for lump_type in LumpType::WRITE_ORDER {
            let written = self.lumps[lump_type.index()]
                .write(writer)
                .map_err(|e| Error::Lump {
                    lump: lump_type,
                    source: Box::new(e),
                })?;

            if position + written > i32::MAX as u64 {
                return Err(Error::TooLarge(position + written));
            }

            header.lumps[lump_type.index()] = LumpEntry {
                offset: position as i32,
                length: written as i32,
            };
            debug!(lump = %lump_type, offset = position, length = written, "written");

            position += written + write_padding(writer, written, LUMP_ALIGNMENT)?;
        }

        writer.seek(SeekFrom::Start(start))?;
        header.write(writer)?;
        writer.seek(SeekFrom::Start(start + position))?;

        Ok(position)
    }

    /// Write the level to a file, replacing it if it exists
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Create {
            path: path.to_owned(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;

        Ok(())
    }

    /// The header as read
    pub fn header(&self) -> &BspHeader {
        &self.header
    }

    /// A lump by type
    pub fn lump(&self, lump: LumpType) -> &Lump {
        &self.lumps[lump.index()]
    }

    /// The raw bytes of a lump that is not decoded
    pub fn raw_lump(&self, lump: LumpType) -> Option<&RawLump> {
        match self.lump(lump) {
            Lump::Raw(raw) => Some(raw),
            Lump::Textures(_) => None,
        }
    }

    /// The texture lump
    pub fn textures(&self) -> Option<&TextureLump> {
        match self.lump(LumpType::Textures) {
            Lump::Textures(textures) => Some(textures),
            Lump::Raw(_) => None,
        }
    }

    /// The texture lump, mutably
    pub fn textures_mut(&mut self) -> Option<&mut TextureLump> {
        match &mut self.lumps[LumpType::Textures.index()] {
            Lump::Textures(textures) => Some(textures),
            Lump::Raw(_) => None,
        }
    }

    /// Names of the textures the level uses, in lump order
    pub fn texture_names(&self) -> Vec<String> {
        self.textures().map(TextureLump::names).unwrap_or_default()
    }

    /// Rename embedded textures, see [`TextureLump::apply_renames`]
    pub fn apply_renames(&mut self, renames: &HashMap<String, String>) -> Result<usize> {
        match self.textures_mut() {
            Some(textures) => textures.apply_renames(renames),
            None => Ok(0),
        }
    }
}

impl fmt::Display for Bsp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if let Some(textures) = self.textures() {
            writeln!(f, "Textures:")?;
            write!(f, "{textures}")?;
        }

        Ok(())
    }
}
