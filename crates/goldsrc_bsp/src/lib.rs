//! This library handles reading, validating and rewriting **BSP v30** levels used by *GoldSrc*
//! (Half-Life).
//!
//! # BSP Format Documentation
//!
//! A BSP file is a header holding a version and a table of 15 lump descriptors, followed by the
//! lumps themselves. Only the texture lump is decoded, every other lump is kept byte for byte.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field      | Description                                          |
//! |----------------|------------|------------------------------------------------------|
//! | 0x0000         | Version    | 4 bytes: always 30                                   |
//! | 0x0004         | Lump Table | 15 × 8 bytes: offset and length of each lump         |
//!
//! ### Lumps
//!
//! | Index | Lump         | Index | Lump         | Index | Lump         |
//! |-------|--------------|-------|--------------|-------|--------------|
//! | 0     | Entities     | 5     | Nodes        | 10    | Leaves       |
//! | 1     | Planes       | 6     | TexInfo      | 11    | MarkSurfaces |
//! | 2     | Textures     | 7     | Faces        | 12    | Edges        |
//! | 3     | Vertices     | 8     | Lighting     | 13    | SurfEdges    |
//! | 4     | Visibility   | 9     | ClipNodes    | 14    | Models       |
//!
//! Offsets are relative to the start of the file. When written, lumps follow the order the map
//! compilers use and are padded to 4 bytes, the recorded length staying unpadded.
//!
//! See [`texture`] for the layout of the texture lump.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.bsp`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod bsp;
pub mod error;
pub mod header;
pub mod lump;
pub mod texture;

pub use bsp::{Bsp, ReadOptions};
pub use header::{BspHeader, LumpEntry, LumpType};
pub use lump::{Lump, LumpCodec, RawLump};
pub use texture::TextureLump;
