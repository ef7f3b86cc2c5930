//! MIP textures: a paletted bitmap with three pre-scaled copies.
//!

use std::fmt;
use std::io::{Read, Seek, SeekFrom, Write};

use binrw::{BinRead, BinWrite};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use goldsrc_types::record::{stream_len, FixedSize};
use goldsrc_types::{Palette, TextureName};
use tracing::{instrument, trace};

use crate::error::{Error, Result};

/// Number of levels in every texture, level 0 is the full-size bitmap
pub const MIP_LEVELS: usize = 4;

/// Size of the palette size field, palette and trailing padding that follow the levels
const TRAILER_SIZE: u64 = 2 + Palette::SIZE as u64 + 2;

/// MIP texture header
///
/// Offsets are relative to the start of the header. A texture whose pixels live in an external
/// WAD (as seen in BSP texture lumps) keeps all four offsets at zero.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct MipTextureHeader {
    /// Texture name, lower-cased by convention
    pub name: TextureName,

    /// Width of level 0 in pixels
    pub width: u32,

    /// Height of level 0 in pixels
    pub height: u32,

    /// Offset of each level from the start of the header
    pub mip_offsets: [u32; MIP_LEVELS],
}

impl FixedSize for MipTextureHeader {
    const SIZE: usize = 40;
}

const _: () = assert!(MipTextureHeader::SIZE == TextureName::SIZE + 4 + 4 + 4 * MIP_LEVELS);

impl MipTextureHeader {
    /// Whether the pixels follow the header
    pub fn is_embedded(&self) -> bool {
        self.mip_offsets[0] > 0
    }

    /// Whether the offsets are neither all zero nor all set
    pub fn is_partially_embedded(&self) -> bool {
        let set = self.mip_offsets.iter().filter(|&&o| o > 0).count();
        set != 0 && set != MIP_LEVELS
    }
}

/// Dimensions of a level: each one halves the previous
pub fn level_dimensions(width: u32, height: u32, level: usize) -> (u32, u32) {
    (width >> level, height >> level)
}

fn level_len(width: u32, height: u32, level: usize) -> u64 {
    let (w, h) = level_dimensions(width, height, level);
    w as u64 * h as u64
}

/// A MIP texture with its pixels and palette, if embedded.
#[derive(Clone, PartialEq, Eq)]
pub struct MipTexture {
    header: MipTextureHeader,
    levels: [Vec<u8>; MIP_LEVELS],
    palette: Palette,
}

impl MipTexture {
    /// Create an empty texture, call [`MipTexture::set_data`] to embed pixels.
    ///
    /// The name is lower-cased; the engine has case-sensitive checks on some names (`sky`).
    pub fn new(name: &str, width: u32, height: u32, palette: Palette) -> Result<MipTexture> {
        let name = TextureName::new(&name.to_ascii_lowercase())?;

        if width == 0 || height == 0 || width % 16 != 0 || height % 16 != 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(MipTexture {
            header: MipTextureHeader {
                name,
                width,
                height,
                mip_offsets: [0; MIP_LEVELS],
            },
            levels: Default::default(),
            palette,
        })
    }

    /// A texture that only references an external WAD
    pub fn from_header(header: MipTextureHeader) -> MipTexture {
        MipTexture {
            header,
            levels: Default::default(),
            palette: Palette::default(),
        }
    }

    /// Read a texture whose header starts at `offset` from the start of the stream.
    ///
    /// Pixel levels are located through the header offsets and checked against the stream
    /// length before anything is allocated.
    #[instrument(skip(reader), err)]
    pub fn read_at<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<MipTexture> {
        reader.seek(SeekFrom::Start(offset))?;
        let header = MipTextureHeader::read(reader)?;
        trace!(name = %header.name, width = header.width, height = header.height, "read mip header");

        let mut texture = MipTexture::from_header(header);
        if !header.is_embedded() {
            return Ok(texture);
        }

        let stream = stream_len(reader)?;
        for (level, data) in texture.levels.iter_mut().enumerate() {
            let len = level_len(header.width, header.height, level);
            let start = offset + header.mip_offsets[level] as u64;
            if start + len > stream {
                return Err(Error::MipLevelOutOfBounds {
                    level,
                    offset: start,
                    len,
                    stream,
                });
            }

            reader.seek(SeekFrom::Start(start))?;
            let mut buffer = vec![0u8; len as usize];
            reader.read_exact(&mut buffer)?;
            *data = buffer;
        }

        let palette_size = reader.read_i16::<LittleEndian>()?;
        if palette_size != Palette::COLORS_FIELD {
            return Err(Error::InvalidPaletteSize(palette_size));
        }

        reader.seek(SeekFrom::Start(
            offset + texture.size() - Palette::SIZE as u64 - 2,
        ))?;
        texture.palette = Palette::read(reader)?;

        Ok(texture)
    }

    /// Encoded size in bytes, computed from the levels.
    pub fn size(&self) -> u64 {
        if !self.is_embedded() {
            return MipTextureHeader::SIZE as u64;
        }

        let levels: u64 = self.levels.iter().map(|l| l.len() as u64).sum();
        MipTextureHeader::SIZE as u64 + levels + TRAILER_SIZE
    }

    /// Write the texture, returning the number of bytes written (always [`MipTexture::size`]).
    ///
    /// The stored offsets are rewritten to match the contiguous layout that is emitted.
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        if !self.is_embedded() {
            self.header.write(writer)?;
            return Ok(MipTextureHeader::SIZE as u64);
        }

        MipTextureHeader {
            mip_offsets: self.contiguous_offsets(),
            ..self.header
        }
        .write(writer)?;

        for level in &self.levels {
            writer.write_all(level)?;
        }
        writer.write_i16::<LittleEndian>(Palette::COLORS_FIELD)?;
        self.palette.write(writer)?;
        writer.write_all(&[0u8; 2])?;

        Ok(self.size())
    }

    /// Embed pixels, generating the smaller levels by point sampling.
    ///
    /// Level `i` pixel `(x, y)` is level 0 pixel `(x << i, y << i)`.
    pub fn set_data(&mut self, pixels: &[u8]) -> Result<()> {
        let (width, height) = (self.header.width, self.header.height);
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::DataLength {
                expected,
                found: pixels.len(),
            });
        }

        self.levels[0] = pixels.to_vec();
        for level in 1..MIP_LEVELS {
            let (w, h) = level_dimensions(width, height, level);
            let mut data = Vec::with_capacity(w as usize * h as usize);
            for y in 0..h {
                let row = (y << level) as usize * width as usize;
                data.extend((0..w).map(|x| pixels[row + (x << level) as usize]));
            }
            self.levels[level] = data;
        }

        self.header.mip_offsets = self.contiguous_offsets();

        Ok(())
    }

    fn contiguous_offsets(&self) -> [u32; MIP_LEVELS] {
        let mut offsets = [0u32; MIP_LEVELS];
        let mut offset = MipTextureHeader::SIZE as u32;
        for (slot, level) in offsets.iter_mut().zip(&self.levels) {
            *slot = offset;
            offset += level.len() as u32;
        }
        offsets
    }

    /// Replace the name
    pub fn rename(&mut self, name: TextureName) {
        self.header.name = name;
    }

    /// The header as it was read or built
    pub fn header(&self) -> &MipTextureHeader {
        &self.header
    }

    /// Texture name
    pub fn name(&self) -> &TextureName {
        &self.header.name
    }

    /// Width of level 0
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Height of level 0
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Whether the pixels are stored with the texture
    pub fn is_embedded(&self) -> bool {
        self.header.is_embedded()
    }

    /// Pixels of a level, `None` past the last level or when not embedded
    pub fn level(&self, level: usize) -> Option<&[u8]> {
        self.levels
            .get(level)
            .filter(|_| self.is_embedded())
            .map(Vec::as_slice)
    }

    /// The palette, all black when not embedded
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// A level expanded to RGBA, four bytes per pixel, fully opaque.
    pub fn to_rgba(&self, level: usize) -> Option<Vec<u8>> {
        let pixels = self.level(level)?;
        Some(
            pixels
                .iter()
                .flat_map(|&i| {
                    let c = self.palette[i as usize];
                    [c.r, c.g, c.b, 0xFF]
                })
                .collect(),
        )
    }
}

impl fmt::Debug for MipTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MipTexture")
            .field("header", &self.header)
            .field("levels", &self.levels.each_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for MipTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Name: {}", self.header.name)?;
        writeln!(f, "  Width: {}", self.header.width)?;
        writeln!(f, "  Height: {}", self.header.height)?;
        writeln!(f, "  Embedded: {}", self.is_embedded())?;
        if !self.is_embedded() {
            return Ok(());
        }

        for (i, level) in self.levels.iter().enumerate() {
            writeln!(
                f,
                "  Level #{i}: offset 0x{:x}, {} bytes",
                self.header.mip_offsets[i],
                level.len()
            )?;
        }

        Ok(())
    }
}
