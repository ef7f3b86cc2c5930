//! Types for reading and writing WAD3 archives
//!

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use binrw::{BinRead, BinWrite};
use goldsrc_types::humanize::human_size;
use goldsrc_types::record::{stream_len, FixedSize};
use goldsrc_types::TextureName;
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::mip::MipTexture;

/// WAD file header
///
/// Starts with "WAD3", all data is stored in little endian format.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(magic = b"WAD3", little)]
pub struct WadHeader {
    /// Number of directory entries
    pub entry_count: i32,

    /// Offset of the directory from the start of the file
    pub directory_offset: i32,
}

impl FixedSize for WadHeader {
    const SIZE: usize = 12;
}

impl fmt::Display for WadHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Magic: WAD3")?;
        writeln!(f, "  Entries: {}", self.entry_count)?;
        writeln!(f, "  Directory offset: 0x{:x}", self.directory_offset)
    }
}

/// Directory entry type of a MIP texture, the only one supported
pub const ENTRY_TYPE_MIPTEX: u8 = 0x43;

/// WAD directory entry
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct WadEntry {
    /// Offset of the texture from the start of the file
    pub offset: i32,

    /// Size of the texture in the file
    pub size: i32,

    /// Size of the texture once decompressed, always equal to `size`
    pub uncompressed_size: i32,

    /// Type tag, [`ENTRY_TYPE_MIPTEX`]
    pub entry_type: u8,

    /// Compression method, always 0
    pub compression: u8,

    /// Unused, kept as read
    pub padding: [u8; 2],

    /// Directory name, upper-cased by convention
    pub name: TextureName,
}

impl FixedSize for WadEntry {
    const SIZE: usize = 32;
}

const _: () = assert!(WadEntry::SIZE == 4 * 3 + 1 + 1 + 2 + TextureName::SIZE);

impl WadEntry {
    fn check(&self, index: usize) -> Result<()> {
        if self.entry_type != ENTRY_TYPE_MIPTEX {
            return Err(Error::UnsupportedEntryType {
                index,
                found: self.entry_type,
            });
        }

        if self.compression != 0 {
            return Err(Error::UnsupportedCompression {
                index,
                found: self.compression,
            });
        }

        if self.size != self.uncompressed_size {
            return Err(Error::SizeMismatch {
                index,
                size: self.size,
                uncompressed: self.uncompressed_size,
            });
        }

        if self.offset < 0 {
            return Err(Error::NegativeOffset {
                index,
                offset: self.offset,
            });
        }

        Ok(())
    }
}

impl fmt::Display for WadEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Name: {}", self.name)?;
        writeln!(f, "  Offset: 0x{:x}", self.offset)?;
        writeln!(f, "  Size: {} ({})", self.size, human_size(self.size.max(0) as u64))?;
        match self.entry_type {
            ENTRY_TYPE_MIPTEX => writeln!(f, "  Type: MIPTex (0x{:02X})", self.entry_type)?,
            other => writeln!(f, "  Type: unknown (0x{other:02X})")?,
        }
        writeln!(f, "  Compression: {}", self.compression)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WadTexture {
    entry: WadEntry,
    texture: MipTexture,
}

/// WAD3 texture archive
///
/// Textures are keyed by their directory name and kept in insertion order.
///
/// ```
/// # fn doit() -> goldsrc_wad::error::Result<()>
/// # {
/// use goldsrc_types::Palette;
/// use goldsrc_wad::{MipTexture, Wad};
///
/// let mut texture = MipTexture::new("Brick", 16, 16, Palette::default())?;
/// texture.set_data(&[0; 256])?;
///
/// let mut wad = Wad::new();
/// wad.add_texture(texture)?;
///
/// // We use a buffer here, though you'd normally use `Wad::save`
/// let mut buf = std::io::Cursor::new(Vec::new());
/// wad.write(&mut buf)?;
///
/// let wad = Wad::read(&mut buf)?;
/// assert_eq!(wad.names().collect::<Vec<_>>(), ["BRICK"]);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wad {
    // Keyed on the trimmed directory name
    textures: IndexMap<TextureName, WadTexture>,
}

impl Wad {
    /// An empty archive
    pub fn new() -> Wad {
        Wad::default()
    }

    /// Read an archive: the whole directory is checked before any texture is loaded.
    #[instrument(skip_all, err)]
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Wad> {
        reader.seek(SeekFrom::Start(0))?;
        let header = WadHeader::read(reader).map_err(|e| match e {
            binrw::Error::BadMagic { found, .. } => Error::InvalidMagic {
                found: format!("{found:?}"),
            },
            e => Error::from(e),
        })?;

        if header.entry_count < 0 || header.directory_offset < 0 {
            return Err(Error::InvalidHeader {
                count: header.entry_count,
                offset: header.directory_offset,
            });
        }

        let len = stream_len(reader)?;
        let count = header.entry_count as u64;
        let offset = header.directory_offset as u64;
        if offset + count * WadEntry::SIZE as u64 > len {
            return Err(Error::DirectoryOutOfBounds { offset, count, len });
        }

        reader.seek(SeekFrom::Start(offset))?;
        let mut directory: IndexMap<TextureName, WadEntry> = IndexMap::with_capacity(count as usize);
        for index in 0..count as usize {
            let entry = WadEntry::read(reader)?;
            let key = entry.name.trimmed();
            if directory.contains_key(&key) {
                return Err(Error::DuplicateName {
                    index,
                    name: entry.name.to_string(),
                });
            }
            entry.check(index)?;
            directory.insert(key, entry);
        }
        debug!(entries = directory.len(), "read directory");

        let mut textures = IndexMap::with_capacity(directory.len());
        for (index, (key, entry)) in directory.into_iter().enumerate() {
            let texture = MipTexture::read_at(reader, entry.offset as u64).map_err(|e| {
                Error::Entry {
                    index,
                    source: Box::new(e),
                }
            })?;

            if texture.size() != entry.size as u64 {
                return Err(Error::InconsistentSize {
                    index,
                    name: entry.name.to_string(),
                    declared: entry.size,
                    computed: texture.size(),
                });
            }

            textures.insert(key, WadTexture { entry, texture });
        }

        Ok(Wad { textures })
    }

    /// Read an archive from a file
    pub fn open(path: impl AsRef<Path>) -> Result<Wad> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;

        Wad::read(&mut BufReader::new(file))
    }

    /// Write the archive: header, textures in insertion order, then the directory.
    ///
    /// Returns the number of bytes written.
    #[instrument(skip_all, err, fields(textures = self.len()))]
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        let payload: u64 = self.textures.values().map(|t| t.texture.size()).sum();
        let directory_offset = WadHeader::SIZE as u64 + payload;
        let total = directory_offset + (self.len() * WadEntry::SIZE) as u64;
        if total > i32::MAX as u64 {
            return Err(Error::TooLarge(total));
        }

        WadHeader {
            entry_count: self.len() as i32,
            directory_offset: directory_offset as i32,
        }
        .write(writer)?;

        let mut offset = WadHeader::SIZE as u64;
        let mut directory = Vec::with_capacity(self.len());
        for WadTexture { entry, texture } in self.textures.values() {
            let written = texture.write(writer)?;
            directory.push(WadEntry {
                offset: offset as i32,
                size: written as i32,
                uncompressed_size: written as i32,
                ..*entry
            });
            offset += written;
        }

        for entry in &directory {
            entry.write(writer)?;
        }

        Ok(total)
    }

    /// Write the archive to a file, replacing it if it exists
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

    /// Add a texture under its upper-cased name.
    ///
    /// The texture keeps its own name, only the directory entry is upper-cased.
    pub fn add_texture(&mut self, texture: MipTexture) -> Result<()> {
        let natural = *texture.name();
        if self.textures.contains_key(&natural.trimmed()) {
            return Err(Error::TextureExists(natural.to_string()));
        }

        let name = natural.to_uppercase()?;
        self.insert(name, texture)
    }

    /// Add a texture under the given directory name, kept byte for byte.
    ///
    /// The texture header is left alone, so the two names may differ.
    pub fn insert(&mut self, name: TextureName, texture: MipTexture) -> Result<()> {
        let key = name.trimmed();
        if self.textures.contains_key(&key) {
            return Err(Error::TextureExists(name.to_string()));
        }

        let size = texture.size() as i32;
        let entry = WadEntry {
            offset: 0,
            size,
            uncompressed_size: size,
            entry_type: ENTRY_TYPE_MIPTEX,
            compression: 0,
            padding: [0; 2],
            name,
        };

        debug!(%name, size, "adding texture");
        self.textures.insert(key, WadTexture { entry, texture });

        Ok(())
    }

    /// Number of textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the archive holds no textures
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Directory names as text, in order
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.textures.values().map(|t| t.entry.name.to_string())
    }

    /// Look a texture up by directory name, falling back to its upper-cased form
    pub fn get(&self, name: &str) -> Option<&MipTexture> {
        let name = TextureName::new(name).ok()?;
        self.entry(&name)
            .or_else(|| self.entry(&name.to_uppercase().ok()?))
            .map(|(_, texture)| texture)
    }

    /// The entry stored under exactly this directory name, bytes past the terminator aside
    pub fn entry(&self, name: &TextureName) -> Option<(&WadEntry, &MipTexture)> {
        self.textures
            .get(&name.trimmed())
            .map(|t| (&t.entry, &t.texture))
    }

    /// Whether a texture is present, see [`Wad::get`]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Textures, in order
    pub fn textures(&self) -> impl Iterator<Item = &MipTexture> {
        self.textures.values().map(|t| &t.texture)
    }

    /// Directory entries paired with their textures, in order.
    ///
    /// Offsets of added textures are only known once the archive is written.
    pub fn entries(&self) -> impl Iterator<Item = (&WadEntry, &MipTexture)> {
        self.textures.values().map(|t| (&t.entry, &t.texture))
    }
}

impl fmt::Display for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directory ({} entries):", self.len())?;
        for (i, (entry, texture)) in self.entries().enumerate() {
            writeln!(f, "Entry #{i} header:")?;
            write!(f, "{entry}")?;
            writeln!(f, "Entry #{i} data:")?;
            write!(f, "{texture}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinRead, BinWrite};
    use goldsrc_types::record::FixedSize;
    use goldsrc_types::{Palette, TextureName};
    use pretty_assertions::{assert_eq, assert_str_eq};
    use tracing_test::traced_test;

    use crate::error::{Error, Result};
    use crate::mip::MipTexture;
    use crate::wad::{Wad, WadEntry, WadHeader, ENTRY_TYPE_MIPTEX};

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x57, 0x41, 0x44, 0x33,
            0x02, 0x00, 0x00, 0x00,
            0x0C, 0x01, 0x00, 0x00,
        ]);

        let expected = WadHeader {
            entry_count: 2,
            directory_offset: 0x10C,
        };

        assert_eq!(WadHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_entry() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x0C, 0x00, 0x00, 0x00,
            0x8C, 0x01, 0x00, 0x00,
            0x8C, 0x01, 0x00, 0x00,
            0x43,
            0x00,
            0x00, 0x00,
            0x54, 0x45, 0x53, 0x54, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let entry = WadEntry {
            offset: 12,
            size: 396,
            uncompressed_size: 396,
            entry_type: ENTRY_TYPE_MIPTEX,
            compression: 0,
            padding: [0; 2],
            name: TextureName::new("TEST")?,
        };

        let mut actual = Vec::new();
        entry.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual.len(), WadEntry::SIZE);
        assert_str_eq!(format!("{:02X?}", actual), format!("{:02X?}", expected));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn write_empty() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x57, 0x41, 0x44, 0x33,
            0x00, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
        ];

        let mut actual = Cursor::new(Vec::new());
        assert_eq!(Wad::new().write(&mut actual)?, 12);
        assert_str_eq!(
            format!("{:02X?}", actual.get_ref()),
            format!("{:02X?}", expected)
        );

        Ok(())
    }

    #[test]
    fn invalid_magic() {
        let input = [0x57, 0x41, 0x44, 0x32, 0, 0, 0, 0, 0x0C, 0, 0, 0];

        assert!(matches!(
            Wad::read(&mut Cursor::new(input)),
            Err(Error::InvalidMagic { .. })
        ));
    }

    #[test]
    fn negative_count() {
        #[rustfmt::skip]
        let input = [
            0x57, 0x41, 0x44, 0x33,
            0xFF, 0xFF, 0xFF, 0xFF,
            0x0C, 0x00, 0x00, 0x00,
        ];

        assert!(matches!(
            Wad::read(&mut Cursor::new(input)),
            Err(Error::InvalidHeader { count: -1, .. })
        ));
    }

    #[test]
    fn directory_past_end() {
        #[rustfmt::skip]
        let input = [
            0x57, 0x41, 0x44, 0x33,
            0x01, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
        ];

        assert!(matches!(
            Wad::read(&mut Cursor::new(input)),
            Err(Error::DirectoryOutOfBounds { count: 1, len: 12, .. })
        ));
    }

    #[test]
    fn add_texture_rejects_existing_names() -> Result<()> {
        let mut wad = Wad::new();
        wad.add_texture(MipTexture::new("wall", 16, 16, Palette::default())?)?;

        assert!(matches!(
            wad.add_texture(MipTexture::new("WALL", 16, 16, Palette::default())?),
            Err(Error::TextureExists(_))
        ));
        assert_eq!(wad.names().collect::<Vec<_>>(), ["WALL"]);
        assert_eq!(wad.get("wall").map(|t| t.name().to_string()), Some("wall".into()));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn insert_keeps_directory_name() -> Result<()> {
        let mut wad = Wad::new();
        wad.insert(
            TextureName::new("BAR")?,
            MipTexture::new("foo", 16, 16, Palette::default())?,
        )?;

        assert_eq!(wad.names().collect::<Vec<_>>(), ["BAR"]);
        assert_eq!(wad.get("bar").map(|t| t.name().to_string()), Some("foo".into()));
        assert!(!wad.contains("FOO"));
        assert!(matches!(
            wad.insert(
                TextureName::new("BAR")?,
                MipTexture::new("bar", 16, 16, Palette::default())?
            ),
            Err(Error::TextureExists(_))
        ));

        let mut output = Cursor::new(Vec::new());
        wad.write(&mut output)?;
        let read = Wad::read(&mut output)?;
        let (entry, texture) = read
            .entry(&TextureName::new("BAR")?)
            .expect("directory name should be kept");
        assert_eq!(entry.name.to_string(), "BAR");
        assert_eq!(texture.name().to_string(), "foo");

        Ok(())
    }

    #[traced_test]
    #[test]
    fn unsupported_entry_type() -> Result<()> {
        let mut texture = MipTexture::new("tex", 16, 16, Palette::default())?;
        texture.set_data(&[0; 256])?;
        let mut wad = Wad::new();
        wad.add_texture(texture)?;

        let mut output = Cursor::new(Vec::new());
        let written = wad.write(&mut output)? as usize;
        // Type tag of the only directory entry
        output.get_mut()[written - WadEntry::SIZE + 12] = 0x40;

        assert!(matches!(
            Wad::read(&mut output),
            Err(Error::UnsupportedEntryType {
                index: 0,
                found: 0x40
            })
        ));

        Ok(())
    }
}
