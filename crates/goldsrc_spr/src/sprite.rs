//! Reading, creating and writing whole sprites
//!

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use binrw::{BinRead, BinWrite};
use bon::Builder;
use goldsrc_types::record::FixedSize;
use goldsrc_types::Palette;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::header::{SpriteHeader, SpriteType, SyncType, TextureFormat};

/// Header fields chosen when creating a sprite
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct SpriteOptions {
    /// Orientation
    #[builder(default = SpriteType::Parallel)]
    pub sprite_type: SpriteType,

    /// Palette interpretation
    #[builder(default = TextureFormat::Normal)]
    pub texture_format: TextureFormat,

    /// Animation start
    #[builder(default = SyncType::Sync)]
    pub sync_type: SyncType,

    /// Unused by GoldSrc
    #[builder(default)]
    pub beam_length: i32,
}

impl Default for SpriteOptions {
    fn default() -> Self {
        Self {
            sprite_type: SpriteType::Parallel,
            texture_format: TextureFormat::Normal,
            sync_type: SyncType::Sync,
            beam_length: 0,
        }
    }
}

/// Reads the frames of a sprite one by one.
///
/// Frames have no offset table: once a frame fails, every later frame is misaligned, so the
/// iterator stops after yielding the first error. Frames yielded before it are intact.
pub struct SpriteReader<'a, R: Read + Seek> {
    reader: &'a mut R,
    header: SpriteHeader,
    next: usize,
    failed: bool,
}

impl<'a, R: Read + Seek> SpriteReader<'a, R> {
    /// Read and check the header, leaving the stream at the first frame
    #[instrument(skip(reader))]
    pub fn new(reader: &'a mut R) -> Result<SpriteReader<'a, R>> {
        reader.seek(SeekFrom::Start(0))?;
        let header = SpriteHeader::read(reader).map_err(|e| match e {
            binrw::Error::BadMagic { found, .. } => Error::InvalidMagic {
                found: format!("{found:?}"),
            },
            e => Error::from(e),
        })?;
        header.validate()?;
        debug!(
            frames = header.frame_count,
            width = header.width,
            height = header.height,
            "read sprite header"
        );

        Ok(SpriteReader {
            reader,
            header,
            next: 0,
            failed: false,
        })
    }

    /// The header
    pub fn header(&self) -> &SpriteHeader {
        &self.header
    }

    /// Number of frames left to read
    pub fn remaining(&self) -> usize {
        if self.failed {
            return 0;
        }
        (self.header.frame_count as usize).saturating_sub(self.next)
    }
}

impl<R: Read + Seek> Iterator for SpriteReader<'_, R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }

        let index = self.next;
        self.next += 1;

        let frame = Frame::read(self.reader).map_err(|e| Error::Frame {
            index,
            source: Box::new(e),
        });
        if frame.is_err() {
            self.failed = true;
        }

        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

/// A sprite held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    header: SpriteHeader,
    frames: Vec<Frame>,
}

impl Sprite {
    /// An empty sprite; both sides must be non-zero multiples of 16.
    ///
    /// The bounding radius is the half-diagonal of the sprite.
    pub fn new(width: u32, height: u32, palette: Palette, options: SpriteOptions) -> Result<Sprite> {
        let invalid = Error::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width % 16 != 0 || height % 16 != 0 {
            return Err(invalid);
        }
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(invalid);
        };

        let half = (width as f64 / 2.0, height as f64 / 2.0);
        let header = SpriteHeader {
            version: SpriteHeader::VERSION,
            sprite_type: options.sprite_type,
            texture_format: options.texture_format,
            bounding_radius: (half.0 * half.0 + half.1 * half.1).sqrt() as f32,
            width: w,
            height: h,
            frame_count: 0,
            beam_length: options.beam_length,
            sync_type: options.sync_type,
            palette_size: Palette::COLORS_FIELD,
            palette,
        };

        Ok(Sprite {
            header,
            frames: Vec::new(),
        })
    }

    /// Append a frame
    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
        self.header.frame_count = self.frames.len().try_into().unwrap_or(i32::MAX);
    }

    /// Read a whole sprite, failing on the first bad frame.
    #[instrument(skip_all, err)]
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Sprite> {
        let frames = SpriteReader::new(reader)?;
        let header = frames.header().clone();
        let frames = frames.collect::<Result<Vec<_>>>()?;

        Ok(Sprite { header, frames })
    }

    /// Read a sprite from a file
    pub fn open(path: impl AsRef<Path>) -> Result<Sprite> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;

        Sprite::read(&mut BufReader::new(file))
    }

    /// Write the header, its frame count taken from the frames, then every frame.
    ///
    /// Returns the number of bytes written.
    #[instrument(skip_all, err)]
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        let frame_count = i32::try_from(self.frames.len())
            .map_err(|_| Error::TooManyFrames(self.frames.len()))?;

        SpriteHeader {
            frame_count,
            ..self.header.clone()
        }
        .write(writer)?;

        let mut written = SpriteHeader::SIZE as u64;
        for (index, frame) in self.frames.iter().enumerate() {
            written += frame.write(writer).map_err(|e| Error::Frame {
                index,
                source: Box::new(e),
            })?;
        }
        debug!(frames = frame_count, written, "wrote sprite");

        Ok(written)
    }

    /// Write the sprite to a file, replacing it if it exists
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

    /// The header
    pub fn header(&self) -> &SpriteHeader {
        &self.header
    }

    /// The frames, in animation order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The palette as RGBA, following the texture format.
    ///
    /// `AlphaTest` makes the last color fully transparent, `IndexAlpha` uses each index as the
    /// alpha of its color; every other format is opaque.
    pub fn palette_rgba(&self) -> [[u8; 4]; Palette::COLORS] {
        let format = self.header.texture_format;
        let mut colors: [[u8; 4]; Palette::COLORS] = std::array::from_fn(|i| {
            let c = self.header.palette[i];
            let alpha = match format {
                TextureFormat::IndexAlpha => i as u8,
                _ => 0xFF,
            };
            [c.r, c.g, c.b, alpha]
        });

        if format == TextureFormat::AlphaTest {
            colors[Palette::COLORS - 1] = [0; 4];
        }

        colors
    }

    /// Pixels of a frame as RGBA, `None` when there is no such frame
    pub fn frame_rgba(&self, index: usize) -> Option<Vec<u8>> {
        let frame = self.frames.get(index)?;
        let palette = self.palette_rgba();

        Some(
            frame
                .data()
                .iter()
                .flat_map(|&i| palette[i as usize])
                .collect(),
        )
    }
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "Frame {i}:")?;
            write!(f, "{frame}")?;
        }

        Ok(())
    }
}
