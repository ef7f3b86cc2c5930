//! 256 color RGB palettes.

use std::fmt;

use binrw::{BinRead, BinWrite};
use derive_more::derive::{Deref, Index};

use crate::record::FixedSize;

/// One palette color
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// A color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

impl FixedSize for Rgb {
    const SIZE: usize = 3;
}

/// A palette of exactly [`Palette::COLORS`] colors.
///
/// Indexed bitmaps store one byte per pixel, each an index into the palette stored alongside.
#[derive(BinRead, BinWrite, Clone, PartialEq, Eq, Deref, Index)]
#[brw(little)]
pub struct Palette([Rgb; 256]);

impl FixedSize for Palette {
    const SIZE: usize = Palette::COLORS * Rgb::SIZE;
}

const _: () = assert!(Palette::SIZE == 768);

impl Palette {
    /// Number of colors in every palette
    pub const COLORS: usize = 256;

    /// Value of the size field preceding a palette on disk
    pub const COLORS_FIELD: i16 = 256;

    /// Wrap a full set of colors
    pub const fn new(colors: [Rgb; 256]) -> Palette {
        Palette(colors)
    }

    /// Build a palette by computing each color from its index
    pub fn from_fn(f: impl FnMut(usize) -> Rgb) -> Palette {
        Palette(std::array::from_fn(f))
    }

    /// A palette from up to 256 colors, the remaining entries left black.
    ///
    /// Returns `None` when more than 256 colors are given.
    pub fn from_colors(colors: &[Rgb]) -> Option<Palette> {
        if colors.len() > Self::COLORS {
            return None;
        }

        let mut palette = Palette::default();
        palette.0[..colors.len()].copy_from_slice(colors);
        Some(palette)
    }

    /// The colors
    pub fn colors(&self) -> &[Rgb; 256] {
        &self.0
    }

    /// Replace a single color
    pub fn set(&mut self, index: u8, color: Rgb) {
        self.0[index as usize] = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette([Rgb::default(); 256])
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Palette({} colors)", self.0.len())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinRead, BinWrite};
    use pretty_assertions::assert_eq;

    use crate::palette::{Palette, Rgb};
    use crate::record::FixedSize;

    #[test]
    fn palette_layout() -> binrw::BinResult<()> {
        let palette = Palette::from_fn(|i| Rgb::new(i as u8, 0x10, 0xFF - i as u8));

        let mut output = Vec::new();
        palette.write(&mut Cursor::new(&mut output))?;

        assert_eq!(output.len(), Palette::SIZE);
        assert_eq!(&output[..6], &[0x00, 0x10, 0xFF, 0x01, 0x10, 0xFE]);
        assert_eq!(&output[765..], &[0xFF, 0x10, 0x00]);

        let read = Palette::read(&mut Cursor::new(&output))?;
        assert_eq!(read, palette);
        assert_eq!(read[1], Rgb::new(1, 0x10, 0xFE));

        Ok(())
    }

    #[test]
    fn from_colors() {
        let palette = Palette::from_colors(&[Rgb::new(1, 2, 3)]).unwrap();
        assert_eq!(palette[0], Rgb::new(1, 2, 3));
        assert_eq!(palette[255], Rgb::default());

        assert!(Palette::from_colors(&[Rgb::default(); 257]).is_none());
    }
}
