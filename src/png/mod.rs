#![forbid(unsafe_code)]

//! Reading and writing the chunk layer of PNG data.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! A PNG is an 8 byte signature followed by "chunks". Each chunk is:
//!
//! * A big-endian `u32` length, counting only the data.
//! * A four byte type code, such as `IHDR` or `tEXt`.
//! * The data.
//! * A big-endian CRC-32 of the type code and the data.
//!
//! This module doesn't look at pixels at all. It only cares about three chunk
//! types:
//! * **Header** (`IHDR`) - must be the first chunk.
//! * **Text** (`tEXt`) - a keyword and some Latin-1 text, see [`TextChunk`].
//! * **End** (`IEND`) - the last chunk, lets you know you had the full PNG and
//!   your data wasn't truncated accidentally.
//!
//! Every other chunk is carried along as opaque bytes.
//!
//! ## Strictness
//!
//! Unlike a PNG decoder that only wants the pixels, [`decode_png_chunks`]
//! rejects the data if the signature is wrong, if the first chunk isn't
//! `IHDR`, if any CRC doesn't match, or if the data runs out before `IEND`.
//! The point of reading chunks here is to write them back out again, and
//! rewriting a damaged file with fresh CRC values would hide the damage.
//!
//! ```
//! use charcard::png::*;
//! let png = encode_png_chunks(&[
//!   Chunk::new(ChunkType::IHDR, vec![0; 13]),
//!   TextChunk::new("Title", "example").unwrap().to_chunk(),
//!   Chunk::iend(),
//! ]);
//! let chunks = decode_png_chunks(&png).unwrap();
//! assert_eq!(TextChunk::try_from(&chunks[1]).unwrap().text(), "example");
//! ```

use alloc::{string::String, vec::Vec};

use crate::{parser_helpers::*, AsciiArray, CardError, CardResult, U32BE};

mod chunk;
pub use chunk::*;

mod container;
pub use container::*;

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

mod text;
pub use text::*;
