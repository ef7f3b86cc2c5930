use std::io::Cursor;

use goldsrc_types::{Palette, Rgb};
use goldsrc_wad::error::Result;
use goldsrc_wad::{MipTexture, Wad};
use pretty_assertions::{assert_eq, assert_str_eq};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn sixteen_square_texture_end_to_end() -> Result<()> {
    let palette = Palette::from_fn(|i| Rgb::new(i as u8, 0, 0));
    let pixels: Vec<u8> = (0..=255).collect();

    let mut texture = MipTexture::new("TEST", 16, 16, palette)?;
    texture.set_data(&pixels)?;
    assert_eq!(texture.name().to_string(), "test");
    assert_eq!(texture.header().mip_offsets, [40, 296, 360, 376]);

    let mut wad = Wad::new();
    wad.add_texture(texture)?;

    let mut output = Cursor::new(Vec::new());
    let written = wad.write(&mut output)?;

    // Header, one texture of 40 + 340 + 772 bytes, one directory entry
    assert_eq!(written, 12 + 1152 + 32);
    assert_eq!(output.get_ref().len() as u64, written);

    #[rustfmt::skip]
    let expected_header: Vec<u8> = vec![
        0x57, 0x41, 0x44, 0x33,
        0x01, 0x00, 0x00, 0x00,
        0x8C, 0x04, 0x00, 0x00,
    ];
    assert_str_eq!(
        format!("{:02X?}", &output.get_ref()[..12]),
        format!("{:02X?}", expected_header)
    );

    #[rustfmt::skip]
    let expected_entry: Vec<u8> = vec![
        0x0C, 0x00, 0x00, 0x00,
        0x80, 0x04, 0x00, 0x00,
        0x80, 0x04, 0x00, 0x00,
        0x43, 0x00, 0x00, 0x00,
        0x54, 0x45, 0x53, 0x54, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_str_eq!(
        format!("{:02X?}", &output.get_ref()[1164..]),
        format!("{:02X?}", expected_entry)
    );

    let wad = Wad::read(&mut output)?;
    assert_eq!(wad.names().collect::<Vec<_>>(), ["TEST"]);

    let texture = wad.get("TEST").expect("texture should be present");
    assert_eq!(texture.name().to_string(), "test");
    assert_eq!(texture.level(0), Some(pixels.as_slice()));
    assert_eq!(texture.level(1).map(<[u8]>::len), Some(64));
    assert_eq!(texture.level(1).map(|l| l[1]), Some(2));
    assert_eq!(texture.level(3).map(<[u8]>::len), Some(4));
    assert_eq!(texture.palette()[200], Rgb::new(200, 0, 0));

    Ok(())
}

#[traced_test]
#[test]
fn textures_keep_insertion_order() -> Result<()> {
    let mut wad = Wad::new();
    for name in ["zeta", "alpha", "mid"] {
        let mut texture = MipTexture::new(name, 16, 16, Palette::default())?;
        texture.set_data(&[0; 256])?;
        wad.add_texture(texture)?;
    }

    let mut output = Cursor::new(Vec::new());
    wad.write(&mut output)?;
    let read = Wad::read(&mut output)?;

    assert_eq!(read.names().collect::<Vec<_>>(), ["ZETA", "ALPHA", "MID"]);

    let offsets: Vec<i32> = read.entries().map(|(entry, _)| entry.offset).collect();
    assert_eq!(offsets, [12, 12 + 1152, 12 + 2 * 1152]);

    Ok(())
}
