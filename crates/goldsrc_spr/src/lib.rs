//! This library handles reading and creating **IDSP v2** sprites used by *GoldSrc* (Half-Life).
//!
//! # Sprite Format Documentation
//!
//! A sprite is a header, holding the palette shared by every frame, followed by the frames back
//! to back. There is no frame offset table.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field           | Description                                      |
//! |----------------|-----------------|--------------------------------------------------|
//! | 0x0000         | Magic number    | 4 bytes: "IDSP"                                  |
//! | 0x0004         | Version         | 4 bytes: 2 (1 is the Quake format)               |
//! | 0x0008         | Type            | 4 bytes: orientation                             |
//! | 0x000C         | Texture Format  | 4 bytes: palette interpretation                  |
//! | 0x0010         | Bounding Radius | 4 bytes: float                                   |
//! | 0x0014         | Width           | 4 bytes                                          |
//! | 0x0018         | Height          | 4 bytes                                          |
//! | 0x001C         | Frame Count     | 4 bytes                                          |
//! | 0x0020         | Beam Length     | 4 bytes: float, unused                           |
//! | 0x0024         | Sync Type       | 4 bytes                                          |
//! | 0x0028         | Palette Size    | 2 bytes: always 256                              |
//! | 0x002A         | Palette         | 768 bytes: 256 RGB triples                       |
//!
//! ### Frames
//!
//! | Offset (bytes) | Field    | Description                                     |
//! |----------------|----------|-------------------------------------------------|
//! | 0x0000         | Type     | 4 bytes: 0 for single frames, groups unsupported |
//! | 0x0004         | Origin X | 4 bytes                                         |
//! | 0x0008         | Origin Y | 4 bytes                                         |
//! | 0x000C         | Width    | 4 bytes                                         |
//! | 0x0010         | Height   | 4 bytes                                         |
//! | 0x0014         | Data     | `width × height` palette indices                |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.spr`
//! - **Endianness**: Little-endian for all multi-byte values
//!

pub mod error;
pub mod frame;
pub mod header;
pub mod sprite;

pub use frame::{Frame, FrameHeader};
pub use header::{SpriteHeader, SpriteType, SyncType, TextureFormat};
pub use sprite::{Sprite, SpriteOptions, SpriteReader};
