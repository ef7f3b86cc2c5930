//! The BSP header: a version and a fixed table of 15 lump descriptors.

use std::fmt;

use binrw::{BinRead, BinWrite};
use goldsrc_types::humanize::human_size;
use goldsrc_types::record::FixedSize;

use crate::error::{Error, Result};

/// The lumps of a BSP, in table (and load) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum LumpType {
    /// Entity text
    Entities = 0,
    /// Plane equations
    Planes,
    /// MIP textures, embedded or referencing a WAD
    Textures,
    /// Vertex positions
    Vertices,
    /// Compressed potentially visible sets
    Visibility,
    /// BSP tree nodes
    Nodes,
    /// Texture projections
    TexInfo,
    /// Faces
    Faces,
    /// Light maps
    Lighting,
    /// Clipping hulls
    ClipNodes,
    /// BSP tree leaves
    Leaves,
    /// Face indices per leaf
    MarkSurfaces,
    /// Edges
    Edges,
    /// Signed edge indices per face
    SurfEdges,
    /// Brush models
    Models,
}

impl LumpType {
    /// Number of lumps in every BSP
    pub const COUNT: usize = 15;

    /// Table order, which is also the order lumps are loaded and validated in
    pub const ALL: [LumpType; LumpType::COUNT] = [
        LumpType::Entities,
        LumpType::Planes,
        LumpType::Textures,
        LumpType::Vertices,
        LumpType::Visibility,
        LumpType::Nodes,
        LumpType::TexInfo,
        LumpType::Faces,
        LumpType::Lighting,
        LumpType::ClipNodes,
        LumpType::Leaves,
        LumpType::MarkSurfaces,
        LumpType::Edges,
        LumpType::SurfEdges,
        LumpType::Models,
    ];

    /// Order the map compilers lay lumps out in, used when writing
    pub const WRITE_ORDER: [LumpType; LumpType::COUNT] = [
        LumpType::Planes,
        LumpType::Leaves,
        LumpType::Vertices,
        LumpType::Nodes,
        LumpType::TexInfo,
        LumpType::Faces,
        LumpType::ClipNodes,
        LumpType::MarkSurfaces,
        LumpType::SurfEdges,
        LumpType::Edges,
        LumpType::Models,
        LumpType::Lighting,
        LumpType::Visibility,
        LumpType::Entities,
        LumpType::Textures,
    ];

    /// Position in the header table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable name
    pub const fn name(self) -> &'static str {
        match self {
            LumpType::Entities => "Entities",
            LumpType::Planes => "Planes",
            LumpType::Textures => "Textures",
            LumpType::Vertices => "Vertices",
            LumpType::Visibility => "Visibility",
            LumpType::Nodes => "Nodes",
            LumpType::TexInfo => "TexInfo",
            LumpType::Faces => "Faces",
            LumpType::Lighting => "Lighting",
            LumpType::ClipNodes => "ClipNodes",
            LumpType::Leaves => "Leaves",
            LumpType::MarkSurfaces => "MarkSurfaces",
            LumpType::Edges => "Edges",
            LumpType::SurfEdges => "SurfEdges",
            LumpType::Models => "Models",
        }
    }
}

impl fmt::Display for LumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lump", self.name())
    }
}

/// Location of a lump, both values relative to the start of the file
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct LumpEntry {
    /// Start of the lump
    pub offset: i32,
    /// Unpadded length of the lump
    pub length: i32,
}

impl FixedSize for LumpEntry {
    const SIZE: usize = 8;
}

impl LumpEntry {
    /// Offset and length as unsigned values, `None` if either is negative
    pub fn range(&self) -> Option<(u64, u64)> {
        Some((
            u64::try_from(self.offset).ok()?,
            u64::try_from(self.length).ok()?,
        ))
    }
}

/// BSP file header
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct BspHeader {
    /// Format version, [`BspHeader::VERSION`]
    pub version: i32,

    /// One entry per [`LumpType`], in table order
    pub lumps: [LumpEntry; LumpType::COUNT],
}

impl FixedSize for BspHeader {
    const SIZE: usize = 124;
}

const _: () = assert!(BspHeader::SIZE == 4 + LumpType::COUNT * LumpEntry::SIZE);

impl Default for BspHeader {
    fn default() -> Self {
        Self {
            version: BspHeader::VERSION,
            lumps: Default::default(),
        }
    }
}

impl BspHeader {
    /// The GoldSrc BSP version
    pub const VERSION: i32 = 30;

    /// Table entry of a lump
    pub fn entry(&self, lump: LumpType) -> LumpEntry {
        self.lumps[lump.index()]
    }

    /// Size of a file holding the header and every declared lump, each padded to 4 bytes
    pub fn min_size(&self) -> i64 {
        BspHeader::SIZE as i64
            + self
                .lumps
                .iter()
                .map(|l| (l.length as i64 + 3) & !3)
                .sum::<i64>()
    }

    /// Check the version and that every lump starts inside the declared file size.
    ///
    /// The bound is [`BspHeader::min_size`], which counts each lump padded to 4 bytes. It is
    /// looser than the header size plus the raw lengths, so levels laid out by compilers that
    /// pad their lumps are accepted. Offsets equal to the bound pass, so do empty trailing lumps.
    pub fn validate(&self) -> Result<()> {
        if self.version != BspHeader::VERSION {
            return Err(Error::UnsupportedVersion {
                expected: BspHeader::VERSION,
                found: self.version,
            });
        }

        for lump in LumpType::ALL {
            let entry = self.entry(lump);
            if entry.length < 0 {
                return Err(Error::NegativeLength {
                    lump,
                    length: entry.length,
                });
            }
        }

        let bound = self.min_size();
        for lump in LumpType::ALL {
            let entry = self.entry(lump);
            if entry.offset as i64 > bound {
                return Err(Error::LumpOutOfBounds {
                    lump,
                    offset: entry.offset,
                    bound,
                });
            }
            if entry.offset < 0 {
                return Err(Error::NegativeOffset {
                    lump,
                    offset: entry.offset,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for BspHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BSP header (version {}):", self.version)?;
        for lump in LumpType::ALL {
            let entry = self.entry(lump);
            writeln!(
                f,
                "  - {:<14}[0x{:08x};0x{:08x}] {:>8}",
                lump.name(),
                entry.offset,
                entry.offset as i64 + entry.length as i64,
                human_size(entry.length.max(0) as u64),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinRead, BinWrite};
    use goldsrc_types::record::FixedSize;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::header::{BspHeader, LumpEntry, LumpType};

    fn header_with(lengths: [i32; LumpType::COUNT]) -> BspHeader {
        let mut header = BspHeader::default();
        let mut offset = BspHeader::SIZE as i32;
        for (entry, length) in header.lumps.iter_mut().zip(lengths) {
            *entry = LumpEntry { offset, length };
            offset += length;
        }
        header
    }

    #[test]
    fn header_round_trip() -> Result<()> {
        let header = header_with([4; LumpType::COUNT]);

        let mut output = Vec::new();
        header.write(&mut Cursor::new(&mut output))?;
        assert_eq!(output.len(), BspHeader::SIZE);
        assert_eq!(&output[..12], &[30, 0, 0, 0, 124, 0, 0, 0, 4, 0, 0, 0]);

        assert_eq!(BspHeader::read(&mut Cursor::new(&output))?, header);

        Ok(())
    }

    #[test]
    fn orders_cover_every_lump() {
        let mut written = LumpType::WRITE_ORDER.to_vec();
        written.sort();
        assert_eq!(written, LumpType::ALL.to_vec());

        for (i, lump) in LumpType::ALL.iter().enumerate() {
            assert_eq!(lump.index(), i);
        }
    }

    #[test]
    fn validate_accepts_packed_header() -> Result<()> {
        header_with([16; LumpType::COUNT]).validate()
    }

    #[test]
    fn validate_rejects_version() {
        let header = BspHeader {
            version: 29,
            ..header_with([0; LumpType::COUNT])
        };

        assert!(matches!(
            header.validate(),
            Err(Error::UnsupportedVersion {
                expected: 30,
                found: 29
            })
        ));
    }

    #[test]
    fn negative_offset_names_the_lump() {
        let mut header = header_with([8; LumpType::COUNT]);
        header.lumps[LumpType::Visibility.index()].offset = -4;

        let error = header.validate().unwrap_err();
        assert!(matches!(
            error,
            Error::NegativeOffset {
                lump: LumpType::Visibility,
                offset: -4
            }
        ));
        assert_eq!(
            error.to_string(),
            "Visibility lump offset is out of bounds: -4 < 0"
        );
    }

    #[test]
    fn offset_past_bound_names_the_lump() {
        let mut header = header_with([8; LumpType::COUNT]);
        header.lumps[LumpType::Models.index()].offset = 0x1000;

        assert!(matches!(
            header.validate(),
            Err(Error::LumpOutOfBounds {
                lump: LumpType::Models,
                bound: 244,
                ..
            })
        ));
    }

    #[test]
    fn bound_allows_padding() -> Result<()> {
        let mut header = BspHeader::default();
        let mut offset = BspHeader::SIZE as i32;
        for entry in header.lumps.iter_mut() {
            *entry = LumpEntry { offset, length: 1 };
            offset += 4;
        }

        assert_eq!(header.min_size(), 124 + 15 * 4);
        header.validate()
    }

    #[test]
    fn offset_past_padded_bound_is_rejected() {
        let mut header = BspHeader::default();
        for entry in header.lumps.iter_mut() {
            *entry = LumpEntry {
                offset: BspHeader::SIZE as i32,
                length: 1,
            };
        }
        // Raw lengths allow 139, padded ones 184
        header.lumps[LumpType::Models.index()].offset = 170;
        assert!(header.validate().is_ok());

        header.lumps[LumpType::Models.index()].offset = 185;
        assert!(matches!(
            header.validate(),
            Err(Error::LumpOutOfBounds {
                lump: LumpType::Models,
                offset: 185,
                bound: 184
            })
        ));
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut header = header_with([8; LumpType::COUNT]);
        header.lumps[LumpType::Edges.index()].length = -1;

        assert!(matches!(
            header.validate(),
            Err(Error::NegativeLength {
                lump: LumpType::Edges,
                length: -1
            })
        ));
    }
}
