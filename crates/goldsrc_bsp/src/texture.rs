//! The texture lump: an offset table followed by MIP textures.
//!
//! | Offset (bytes) | Field    | Description                                              |
//! |----------------|----------|----------------------------------------------------------|
//! | 0x0000         | Count    | 4 bytes: number of textures                              |
//! | 0x0004         | Offsets  | 4 bytes each: texture offset from the start of the lump  |
//! |                | Textures | MIP textures, only their header when stored in a WAD     |

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use goldsrc_types::record::FixedSize;
use goldsrc_types::{Problem, ProblemKind, TextureName, ValidationError};
use goldsrc_wad::{MipTexture, MipTextureHeader};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::header::LumpEntry;
use crate::lump::LumpCodec;

/// Decoded texture lump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureLump {
    textures: Vec<MipTexture>,
}

impl TextureLump {
    /// A lump holding these textures
    pub fn new(textures: Vec<MipTexture>) -> TextureLump {
        TextureLump { textures }
    }

    /// Number of textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the lump holds no texture
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// The textures, in lump order
    pub fn textures(&self) -> &[MipTexture] {
        &self.textures
    }

    /// Texture names, in lump order
    pub fn names(&self) -> Vec<String> {
        self.textures.iter().map(|t| t.name().to_string()).collect()
    }

    /// Rename the texture at `index`
    pub fn rename(&mut self, index: usize, name: TextureName) -> Result<()> {
        let count = self.textures.len();
        let texture = self
            .textures
            .get_mut(index)
            .ok_or(Error::TextureIndex { index, count })?;

        texture.rename(name);
        Ok(())
    }

    /// Apply an old name to new name mapping, matching names regardless of case.
    ///
    /// New names are stored lower-cased. Textures that only reference a WAD are left alone
    /// since the engine looks their pixels up by name. Returns the number of renamed textures.
    #[instrument(skip_all, err)]
    pub fn apply_renames(&mut self, renames: &HashMap<String, String>) -> Result<usize> {
        let renames: HashMap<String, &str> = renames
            .iter()
            .map(|(old, new)| (old.to_ascii_lowercase(), new.as_str()))
            .collect();

        let mut renamed = 0;
        for texture in &mut self.textures {
            let old = texture.name().to_string().to_ascii_lowercase();
            let Some(new) = renames.get(&old) else {
                continue;
            };

            if !texture.is_embedded() {
                warn!(name = %old, "texture is not embedded, skipping rename");
                continue;
            }

            let name = TextureName::new(&new.to_ascii_lowercase())?;
            debug!(from = %old, to = %name, "renaming texture");
            texture.rename(name);
            renamed += 1;
        }

        Ok(renamed)
    }

    fn problems(index: usize, header: &MipTextureHeader) -> Vec<Problem> {
        let name = (!header.name.is_empty()).then(|| header.name.to_string());
        let mut kinds: Vec<ProblemKind> = header.name.issues().into_iter().map(Into::into).collect();

        if header.width % 16 != 0 {
            kinds.push(ProblemKind::WidthNotMultipleOf16(header.width));
        }
        if header.height % 16 != 0 {
            kinds.push(ProblemKind::HeightNotMultipleOf16(header.height));
        }
        if header.is_partially_embedded() {
            kinds.push(ProblemKind::PartialMipOffsets(header.mip_offsets));
        }

        kinds
            .into_iter()
            .map(|kind| Problem::new(index, name.clone(), kind))
            .collect()
    }
}

impl LumpCodec for TextureLump {
    #[instrument(skip(reader), err)]
    fn load<R: Read + Seek>(reader: &mut R, entry: LumpEntry) -> Result<Self> {
        let (lump_offset, length) = entry.range().ok_or(Error::InvalidEntry {
            offset: entry.offset,
            length: entry.length,
        })?;

        if length < 4 {
            return Err(Error::TextureLumpTooShort(entry.length));
        }

        reader.seek(SeekFrom::Start(lump_offset))?;
        let count = reader.read_u32::<LittleEndian>()?;
        if count as u64 * MipTextureHeader::SIZE as u64 > length {
            return Err(Error::TextureCount {
                count,
                length: entry.length,
            });
        }

        let min = 4 + 4 * count as u64;
        let mut offsets = Vec::with_capacity(count as usize);
        for index in 0..count as usize {
            let offset = reader.read_i32::<LittleEndian>()?;
            if (offset as i64) < min as i64 || offset > entry.length {
                return Err(Error::TextureOffsetOutOfBounds {
                    index,
                    offset,
                    min,
                    max: entry.length,
                });
            }
            offsets.push(offset as u64);
        }

        let textures = offsets
            .into_iter()
            .enumerate()
            .map(|(index, offset)| {
                MipTexture::read_at(reader, lump_offset + offset)
                    .map_err(|source| Error::Texture { index, source })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(count, "loaded textures");

        Ok(TextureLump { textures })
    }

    fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        let table = 4 + 4 * self.textures.len() as u64;
        let total = table + self.textures.iter().map(MipTexture::size).sum::<u64>();
        if total > i32::MAX as u64 {
            return Err(Error::TooLarge(total));
        }

        writer.write_u32::<LittleEndian>(self.textures.len() as u32)?;
        let mut offset = table;
        for texture in &self.textures {
            writer.write_i32::<LittleEndian>(offset as i32)?;
            offset += texture.size();
        }

        let mut written = table;
        for (index, texture) in self.textures.iter().enumerate() {
            written += texture
                .write(writer)
                .map_err(|source| Error::Texture { index, source })?;
        }

        Ok(written)
    }

    fn validate(&self) -> core::result::Result<(), ValidationError> {
        let mut problems = Vec::new();
        let mut seen: HashMap<TextureName, usize> = HashMap::with_capacity(self.textures.len());

        for (index, texture) in self.textures.iter().enumerate() {
            let header = texture.header();
            problems.extend(TextureLump::problems(index, header));

            let name = header.name.trimmed();
            if let Some(&first) = seen.get(&name) {
                problems.push(Problem::new(
                    index,
                    Some(name.to_string()),
                    ProblemKind::DuplicateName(first),
                ));
            } else {
                seen.insert(name, index);
            }
        }

        ValidationError::check(problems)
    }
}

impl fmt::Display for TextureLump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Count: {}", self.textures.len())?;
        for (i, texture) in self.textures.iter().enumerate() {
            writeln!(f, "Texture #{i}:")?;
            write!(f, "{texture}")?;
        }

        Ok(())
    }
}
