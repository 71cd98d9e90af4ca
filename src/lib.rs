#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! A crate for character cards: JSON character definitions carried inside of
//! image files.
//!
//! The primary format is PNG. The card is a `tEXt` chunk with the keyword
//! `chara` and base64 text, see the [`card`] module. Reading and writing goes
//! through a strict PNG chunk codec in the [`png`] module.
//!
//! Cards are also found as WebP files, with the JSON in the EXIF
//! `UserComment` tag. Those can be read with the [`webp`] module, but not
//! written.
//!
//! Everything here works on byte slices that are already in memory. There's
//! no file I/O, no global state, and no pixel decoding.
//!
//! ```
//! use charcard::{card, png::*};
//! let blank = encode_png_chunks(&[Chunk::new(ChunkType::IHDR, vec![0; 13]), Chunk::iend()]);
//! let with_card = card::embed(&blank, r#"{"name":"Alice"}"#).unwrap();
//! assert_eq!(charcard::read_card(&with_card).unwrap(), r#"{"name":"Alice"}"#);
//! ```

extern crate alloc;
use alloc::string::String;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod ascii_array;
pub use ascii_array::*;

pub mod int_endian;
pub use int_endian::*;

mod error;
pub use error::*;

mod parser_helpers;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod png;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod card;

#[cfg(feature = "webp")]
#[cfg_attr(docs_rs, doc(cfg(feature = "webp")))]
pub mod webp;

/// The image formats that cards can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CardFormat {
  /// Portable Network Graphics, the card is a `tEXt` chunk.
  Png,
  /// WebP, the card is the EXIF `UserComment`.
  Webp,
}
impl CardFormat {
  /// Guesses the format from the first few bytes.
  ///
  /// PNG only needs the first four signature bytes. The rest are the CR/LF
  /// bytes that line ending conversion damages, and the PNG reader gives a
  /// better error about those.
  #[inline]
  #[must_use]
  pub const fn sniff(bytes: &[u8]) -> Option<Self> {
    match bytes {
      [137, 80, 78, 71, ..] => Some(Self::Png),
      [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
      _ => None,
    }
  }
}

/// Reads the card out of image bytes of any supported format.
///
/// PNG cards are read with [`card::extract`], WebP cards with
/// [`webp::extract`]. Bytes that aren't either format (or whose format wasn't
/// enabled as a crate feature) are [`CardError::UnsupportedFormat`].
pub fn read_card(bytes: &[u8]) -> CardResult<String> {
  let format = CardFormat::sniff(bytes);
  tracing::trace!(?format, len = bytes.len(), "reading card");
  match format {
    #[cfg(feature = "png")]
    Some(CardFormat::Png) => card::extract(bytes),
    #[cfg(feature = "webp")]
    Some(CardFormat::Webp) => webp::extract(bytes),
    _ => Err(CardError::UnsupportedFormat),
  }
}

#[test]
fn test_sniff() {
  assert_eq!(CardFormat::sniff(&[137, 80, 78, 71, 13, 10, 26, 10]), Some(CardFormat::Png));
  assert_eq!(CardFormat::sniff(&[137, 80, 78, 71, 10, 26, 10, 0]), Some(CardFormat::Png));
  assert_eq!(CardFormat::sniff(&[137, 80, 78]), None);
  assert_eq!(CardFormat::sniff(b"RIFF\0\0\0\0WEBPVP8L"), Some(CardFormat::Webp));
  assert_eq!(CardFormat::sniff(b"RIFF\0\0\0\0WAVE"), None);
  assert_eq!(CardFormat::sniff(b""), None);
  assert_eq!(read_card(b"GIF89a"), Err(CardError::UnsupportedFormat));
}
