//! Fixed-size record helpers shared by every format reader and writer.

use std::io::{self, Seek, SeekFrom, Write};

/// A record with a constant on-disk size.
///
/// The value is asserted at compile time next to each record definition and checked by tests
/// that serialize a record and count the bytes, so offsets computed from `SIZE` always agree
/// with what [`binrw`] actually reads and writes.
pub trait FixedSize {
    /// Size of the encoded record in bytes
    const SIZE: usize;
}

/// Length of the whole stream, leaving the cursor where it was.
pub fn stream_len<S: Seek + ?Sized>(stream: &mut S) -> io::Result<u64> {
    let position = stream.stream_position()?;
    let end = stream.seek(SeekFrom::End(0))?;
    if position != end {
        stream.seek(SeekFrom::Start(position))?;
    }

    Ok(end)
}

/// Write the zero bytes needed to bring `written` up to a multiple of `alignment`.
///
/// Returns the number of padding bytes emitted.
pub fn write_padding<W: Write + ?Sized>(
    writer: &mut W,
    written: u64,
    alignment: u64,
) -> io::Result<u64> {
    let padding = (alignment - written % alignment) % alignment;
    if padding > 0 {
        writer.write_all(&vec![0u8; padding as usize])?;
    }

    Ok(padding)
}
