//! The sprite header and the enums it carries.

use std::fmt;

use binrw::{BinRead, BinWrite};
use goldsrc_types::record::FixedSize;
use goldsrc_types::Palette;

use crate::error::{Error, Result};

/// An `i32` enum field that keeps values it does not know about
macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$variant_meta:meta])* $variant:ident = $value:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
            /// A value with no known meaning, kept as read
            Unknown(i32),
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                match raw {
                    $($value => $name::$variant,)+
                    other => $name::Unknown(other),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                match value {
                    $($name::$variant => $value,)+
                    $name::Unknown(other) => other,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant => f.write_str(stringify!($variant)),)+
                    $name::Unknown(other) => write!(f, "invalid ({other})"),
                }
            }
        }
    };
}

raw_enum! {
    /// How the sprite is oriented relative to the camera
    SpriteType {
        /// Faces the camera, Z axis locked
        ParallelUpright = 0,
        /// Faces the player origin, Z axis locked
        FacingUpright = 1,
        /// Always faces the camera
        Parallel = 2,
        /// Orientation set by the level
        Oriented = 3,
        /// Faces the camera, rotated by the level
        ParallelOriented = 4,
    }
}

raw_enum! {
    /// How the palette is interpreted when rendering
    TextureFormat {
        /// 256 opaque colors
        Normal = 0,
        /// 256 colors blended additively
        Additive = 1,
        /// One color, the index is the alpha
        IndexAlpha = 2,
        /// 255 colors, the last one fully transparent
        AlphaTest = 3,
    }
}

raw_enum! {
    /// Whether client-side animations start in sync
    SyncType {
        /// All sprites animate together
        Sync = 0,
        /// Each sprite starts after a random delay
        Random = 1,
    }
}

/// Sprite file header, palette included
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq)]
#[brw(magic = b"IDSP", little)]
pub struct SpriteHeader {
    /// Format version, [`SpriteHeader::VERSION`]
    pub version: i32,

    /// Orientation
    #[br(map = |raw: i32| SpriteType::from(raw))]
    #[bw(map = |t: &SpriteType| i32::from(*t))]
    pub sprite_type: SpriteType,

    /// Palette interpretation
    #[br(map = |raw: i32| TextureFormat::from(raw))]
    #[bw(map = |t: &TextureFormat| i32::from(*t))]
    pub texture_format: TextureFormat,

    /// Radius of the bounding sphere, trusted as read
    pub bounding_radius: f32,

    /// Largest frame width
    pub width: i32,
    /// Largest frame height
    pub height: i32,

    /// Number of frames following the header
    pub frame_count: i32,

    /// Unused by GoldSrc
    pub beam_length: i32,

    /// Animation start
    #[br(map = |raw: i32| SyncType::from(raw))]
    #[bw(map = |t: &SyncType| i32::from(*t))]
    pub sync_type: SyncType,

    /// Number of palette colors, always 256
    pub palette_size: i16,

    /// Colors shared by every frame
    pub palette: Palette,
}

impl FixedSize for SpriteHeader {
    const SIZE: usize = 810;
}

const _: () = assert!(SpriteHeader::SIZE == 4 + 9 * 4 + 2 + Palette::SIZE);

impl SpriteHeader {
    /// The Valve sprite version
    pub const VERSION: i32 = 2;

    /// Check the version, palette size and frame count.
    pub fn validate(&self) -> Result<()> {
        if self.version != SpriteHeader::VERSION {
            return Err(Error::UnsupportedVersion {
                expected: SpriteHeader::VERSION,
                found: self.version,
            });
        }

        if self.palette_size != Palette::COLORS_FIELD {
            return Err(Error::InvalidPaletteSize(self.palette_size));
        }

        if self.frame_count < 0 {
            return Err(Error::InvalidFrameCount(self.frame_count));
        }

        Ok(())
    }
}

impl fmt::Display for SpriteHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Header:")?;
        writeln!(f, "  Version: {}", self.version)?;
        writeln!(f, "  Type: {}", self.sprite_type)?;
        writeln!(f, "  TextureFormat: {}", self.texture_format)?;
        writeln!(f, "  BoundingRadius: {:.6}", self.bounding_radius)?;
        writeln!(f, "  Width: {}", self.width)?;
        writeln!(f, "  Height: {}", self.height)?;
        writeln!(f, "  NumFrames: {}", self.frame_count)?;
        writeln!(f, "  BeamLength: {}", self.beam_length)?;
        writeln!(f, "  SyncType: {}", self.sync_type)?;
        writeln!(f, "  PaletteSize: {}", self.palette_size)?;
        writeln!(f, "  Palette: {} bytes", Palette::SIZE)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinRead, BinWrite};
    use goldsrc_types::record::FixedSize;
    use goldsrc_types::Palette;
    use pretty_assertions::{assert_eq, assert_str_eq};

    use crate::error::{Error, Result};
    use crate::header::{SpriteHeader, SpriteType, SyncType, TextureFormat};

    fn header() -> SpriteHeader {
        SpriteHeader {
            version: 2,
            sprite_type: SpriteType::Oriented,
            texture_format: TextureFormat::AlphaTest,
            bounding_radius: 1.0,
            width: 16,
            height: 32,
            frame_count: 3,
            beam_length: 5,
            sync_type: SyncType::Random,
            palette_size: 256,
            palette: Palette::default(),
        }
    }

    #[test]
    fn write_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            // Magic
            0x49, 0x44, 0x53, 0x50,
            // Version
            0x02, 0x00, 0x00, 0x00,
            // Type, texture format
            0x03, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            // Bounding radius
            0x00, 0x00, 0x80, 0x3F,
            // Width, height
            0x10, 0x00, 0x00, 0x00,
            0x20, 0x00, 0x00, 0x00,
            // Frame count
            0x03, 0x00, 0x00, 0x00,
            // Beam length
            0x05, 0x00, 0x00, 0x00,
            // Sync type
            0x01, 0x00, 0x00, 0x00,
            // Palette size
            0x00, 0x01,
        ];

        let mut output = Cursor::new(Vec::new());
        header().write(&mut output)?;

        let output = output.into_inner();
        assert_eq!(output.len(), SpriteHeader::SIZE);
        assert_str_eq!(
            format!("{:02X?}", &output[..42]),
            format!("{:02X?}", expected)
        );

        Ok(())
    }

    #[test]
    fn display_header() {
        let text = header().to_string();

        assert!(text.contains("  BeamLength: 5\n"));
        assert!(text.contains("  BoundingRadius: 1.000000\n"));
        assert!(text.contains("  TextureFormat: AlphaTest\n"));
    }

    #[test]
    fn unknown_enum_values_survive() -> Result<()> {
        let mut input = Vec::new();
        SpriteHeader {
            sprite_type: SpriteType::Unknown(9),
            ..header()
        }
        .write(&mut Cursor::new(&mut input))?;

        let read = SpriteHeader::read(&mut Cursor::new(&input))?;
        assert_eq!(read.sprite_type, SpriteType::Unknown(9));
        assert_eq!(read.sprite_type.to_string(), "invalid (9)");
        assert_eq!(i32::from(read.sprite_type), 9);

        Ok(())
    }

    #[test]
    fn quake_version_rejected() {
        let header = SpriteHeader {
            version: 1,
            ..header()
        };

        assert!(matches!(
            header.validate(),
            Err(Error::UnsupportedVersion {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn palette_size_checked() {
        let header = SpriteHeader {
            palette_size: 255,
            ..header()
        };

        assert!(matches!(
            header.validate(),
            Err(Error::InvalidPaletteSize(255))
        ));
    }
}
