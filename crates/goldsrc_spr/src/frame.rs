//! Sprite frames: a 20 byte header followed by raw palette indices.

use std::fmt;
use std::io::{Read, Seek, Write};

use binrw::{BinRead, BinWrite};
use goldsrc_types::record::{stream_len, FixedSize};
use tracing::trace;

use crate::error::{Error, Result};

/// On-disk value of a single frame
pub const FRAME_SINGLE: i32 = 0;

/// On-disk value of a frame group, never implemented by the engine
pub const FRAME_GROUP: i32 = 1;

/// Frame header as stored
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct FrameHeader {
    /// [`FRAME_SINGLE`] or [`FRAME_GROUP`]
    pub frame_type: i32,
    /// Horizontal origin
    pub origin_x: i32,
    /// Vertical origin
    pub origin_y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl FixedSize for FrameHeader {
    const SIZE: usize = 20;
}

/// One single frame
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    origin_x: i32,
    origin_y: i32,
    width: i32,
    height: i32,
    data: Vec<u8>,
}

impl Frame {
    /// A frame of `width × height` palette indices
    pub fn new(width: i32, height: i32, origin_x: i32, origin_y: i32, data: Vec<u8>) -> Result<Frame> {
        let expected = pixel_count(width, height)?;
        if data.len() as u64 != expected {
            return Err(Error::DataLength {
                expected: expected as usize,
                found: data.len(),
            });
        }

        Ok(Frame {
            origin_x,
            origin_y,
            width,
            height,
            data,
        })
    }

    /// Read one frame at the current position.
    ///
    /// The header is consumed in full before its type and size are checked, so on error the
    /// stream sits right after it.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Frame> {
        let header = FrameHeader::read(reader)?;
        trace!(?header, "read frame header");

        match header.frame_type {
            FRAME_SINGLE => {}
            FRAME_GROUP => return Err(Error::GroupFrame),
            other => return Err(Error::InvalidFrameType(other)),
        }

        let len = pixel_count(header.width, header.height)?;
        let position = reader.stream_position()?;
        let remaining = stream_len(reader)?.saturating_sub(position);
        if len > remaining {
            return Err(Error::FrameTruncated { len, remaining });
        }

        let mut data = vec![0u8; len as usize];
        reader.read_exact(&mut data)?;

        Ok(Frame {
            origin_x: header.origin_x,
            origin_y: header.origin_y,
            width: header.width,
            height: header.height,
            data,
        })
    }

    /// Write the frame, returning the number of bytes written
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<u64> {
        self.header().write(writer)?;
        writer.write_all(&self.data)?;

        Ok(FrameHeader::SIZE as u64 + self.data.len() as u64)
    }

    /// The header this frame is stored with
    pub fn header(&self) -> FrameHeader {
        FrameHeader {
            frame_type: FRAME_SINGLE,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            width: self.width,
            height: self.height,
        }
    }

    /// Horizontal origin
    pub fn origin_x(&self) -> i32 {
        self.origin_x
    }

    /// Vertical origin
    pub fn origin_y(&self) -> i32 {
        self.origin_y
    }

    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Palette indices, row by row
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

fn pixel_count(width: i32, height: i32) -> Result<u64> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidFrameDimensions { width, height });
    }

    Ok(width as u64 * height as u64)
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data", &format_args!("{} bytes", self.data.len()))
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Type: Single")?;
        writeln!(f, "  OriginX: {}", self.origin_x)?;
        writeln!(f, "  OriginY: {}", self.origin_y)?;
        writeln!(f, "  Width: {}", self.width)?;
        writeln!(f, "  Height: {}", self.height)?;
        writeln!(f, "  Data: {} bytes", self.data.len())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::{assert_eq, assert_str_eq};

    use crate::error::{Error, Result};
    use crate::frame::Frame;

    #[test]
    fn write_frame() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            // Type
            0x00, 0x00, 0x00, 0x00,
            // Origin
            0xFE, 0xFF, 0xFF, 0xFF,
            0x01, 0x00, 0x00, 0x00,
            // Width, height
            0x02, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            // Data
            0x01, 0x02, 0x03, 0x04,
        ];

        let frame = Frame::new(2, 2, -2, 1, vec![1, 2, 3, 4])?;
        let mut output = Cursor::new(Vec::new());
        assert_eq!(frame.write(&mut output)?, 24);
        assert_str_eq!(
            format!("{:02X?}", output.get_ref()),
            format!("{:02X?}", expected)
        );

        output.set_position(0);
        assert_eq!(Frame::read(&mut output)?, frame);

        Ok(())
    }

    #[test]
    fn new_checks_length() {
        assert!(matches!(
            Frame::new(4, 4, 0, 0, vec![0; 15]),
            Err(Error::DataLength {
                expected: 16,
                found: 15
            })
        ));
        assert!(matches!(
            Frame::new(0, 4, 0, 0, Vec::new()),
            Err(Error::InvalidFrameDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn non_positive_size_rejected_before_allocating() {
        let mut input = Vec::new();
        for value in [0i32, 0, 0, -16, 16] {
            input.extend_from_slice(&value.to_le_bytes());
        }

        assert!(matches!(
            Frame::read(&mut Cursor::new(input)),
            Err(Error::InvalidFrameDimensions {
                width: -16,
                height: 16
            })
        ));
    }

    #[test]
    fn oversized_frame_rejected() {
        let mut input = Vec::new();
        for value in [0i32, 0, 0, 0x4000, 0x4000] {
            input.extend_from_slice(&value.to_le_bytes());
        }
        input.extend_from_slice(&[0; 64]);

        assert!(matches!(
            Frame::read(&mut Cursor::new(input)),
            Err(Error::FrameTruncated {
                len: 0x1000_0000,
                remaining: 64
            })
        ));
    }

    #[test]
    fn unknown_frame_type() {
        let mut input = Vec::new();
        for value in [7i32, 0, 0, 1, 1] {
            input.extend_from_slice(&value.to_le_bytes());
        }
        input.push(0);

        assert!(matches!(
            Frame::read(&mut Cursor::new(input)),
            Err(Error::InvalidFrameType(7))
        ));
    }
}
