//! This library handles reading from and creating **WAD3** texture archives used by *GoldSrc*
//! (Half-Life) and the **MIP textures** they hold.
//!
//! # WAD3 Archive Format Documentation
//!
//! A WAD3 file is a header, the texture payloads back to back, and a directory describing them.
//! WAD files are typically identified with the `.wad` extension.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field            | Description                                       |
//! |----------------|------------------|---------------------------------------------------|
//! | 0x0000         | Magic number     | 4 bytes: "WAD3"                                   |
//! | 0x0004         | Entry Count      | 4 bytes: Number of directory entries              |
//! | 0x0008         | Directory Offset | 4 bytes: Offset of the directory from file start  |
//!
//! ### Directory
//!
//! Each entry is 32 bytes:
//!
//! | Offset (bytes) | Field             | Description                                     |
//! |----------------|-------------------|-------------------------------------------------|
//! | 0x0000         | Offset            | 4 bytes: Offset of the texture from file start  |
//! | 0x0004         | Size              | 4 bytes: Size of the texture                    |
//! | 0x0008         | Uncompressed Size | 4 bytes: Always equal to Size                   |
//! | 0x000C         | Type              | 1 byte: `0x43` for MIP textures                 |
//! | 0x000D         | Compression       | 1 byte: Always `0`                              |
//! | 0x000E         | Padding           | 2 bytes                                         |
//! | 0x0010         | Name              | 16 bytes: upper-cased, NUL-terminated           |
//!
//! Names are unique within a directory.
//!
//! ## MIP Textures
//!
//! | Offset (bytes) | Field        | Description                                           |
//! |----------------|--------------|-------------------------------------------------------|
//! | 0x0000         | Name         | 16 bytes: lower-cased, NUL-terminated                 |
//! | 0x0010         | Width        | 4 bytes: multiple of 16                               |
//! | 0x0014         | Height       | 4 bytes: multiple of 16                               |
//! | 0x0018         | Mip Offsets  | 4 × 4 bytes: offset of each level from texture start  |
//! | 0x0028         | Levels       | `w*h`, `w*h/4`, `w*h/16`, `w*h/64` palette indices    |
//! |                | Palette Size | 2 bytes: always 256                                   |
//! |                | Palette      | 768 bytes: 256 RGB triples                            |
//! |                | Padding      | 2 bytes                                               |
//!
//! A texture whose mip offsets are all zero carries no pixels: only its header is stored and the
//! engine looks the pixels up in an external WAD by name.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.wad`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression**: None
//!

pub mod error;
pub mod mip;
pub mod wad;

pub use mip::{MipTexture, MipTextureHeader};
pub use wad::{Wad, WadEntry, WadHeader};
