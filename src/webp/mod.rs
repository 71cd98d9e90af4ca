#![forbid(unsafe_code)]

//! Reading character cards out of WebP files.
//!
//! WebP cards don't use a text chunk. Instead the JSON is stored as the EXIF
//! `UserComment` tag, in the WebP's `EXIF` chunk. This is read-only: to write
//! a card, convert the image to PNG and use [`card::embed`](crate::card::embed).
//!
//! A WebP file is a RIFF container:
//! * `RIFF`, a little-endian `u32` size of everything after it, then `WEBP`.
//! * Chunks, each a four byte code, a little-endian `u32` size, and the data.
//!   Odd sized data is followed by one padding byte.

use alloc::string::String;

use crate::{parser_helpers::*, AsciiArray, CardError, CardResult};

mod exif;
pub use exif::*;

/// A chunk inside a RIFF container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffChunk<'b> {
  /// The chunk's four character code.
  pub fourcc: AsciiArray<4>,
  /// The chunk's data, without padding.
  pub data: &'b [u8],
}

/// Iterates the chunks of a WebP file.
///
/// Once an error has been produced the iterator only gives `None`.
#[derive(Debug, Clone)]
pub struct RiffChunkIter<'b> {
  spare: &'b [u8],
  failed: bool,
}
impl<'b> RiffChunkIter<'b> {
  /// Pass the full WebP bytes. The RIFF header is checked and skipped.
  ///
  /// Anything past the size that the RIFF header declares is ignored.
  pub fn new(bytes: &'b [u8]) -> CardResult<Self> {
    let (riff, rest) = try_split_off_byte_array::<4>(bytes).ok_or(CardError::InvalidWebp)?;
    let (size, rest) = try_split_off_byte_array::<4>(rest).ok_or(CardError::InvalidWebp)?;
    if &riff != b"RIFF" {
      return Err(CardError::InvalidWebp);
    }
    let size = usize::try_from(u32::from_le_bytes(size)).map_err(|_| CardError::InvalidWebp)?;
    let (body, _) = try_split_off_slice(rest, size).ok_or(CardError::InvalidWebp)?;
    let (form, spare) = try_split_off_byte_array::<4>(body).ok_or(CardError::InvalidWebp)?;
    if &form != b"WEBP" {
      return Err(CardError::InvalidWebp);
    }
    Ok(Self { spare, failed: false })
  }

  fn read_chunk(&mut self) -> CardResult<RiffChunk<'b>> {
    let (fourcc, rest) = try_split_off_byte_array::<4>(self.spare).ok_or(CardError::InvalidWebp)?;
    let (size, rest) = try_split_off_byte_array::<4>(rest).ok_or(CardError::InvalidWebp)?;
    let size = usize::try_from(u32::from_le_bytes(size)).map_err(|_| CardError::InvalidWebp)?;
    let (data, rest) = try_split_off_slice(rest, size).ok_or(CardError::InvalidWebp)?;
    // a missing pad byte on the final chunk is tolerated
    self.spare = if size % 2 == 1 { rest.get(1..).unwrap_or(&[]) } else { rest };
    Ok(RiffChunk { fourcc: AsciiArray(fourcc), data })
  }
}
impl<'b> Iterator for RiffChunkIter<'b> {
  type Item = CardResult<RiffChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.spare.is_empty() {
      return None;
    }
    let out = self.read_chunk();
    self.failed = out.is_err();
    Some(out)
  }
}
impl core::iter::FusedIterator for RiffChunkIter<'_> {}

/// Gets the data of the `EXIF` chunk, if there is one.
pub fn webp_get_exif(bytes: &[u8]) -> CardResult<Option<&[u8]>> {
  for chunk in RiffChunkIter::new(bytes)? {
    let chunk = chunk?;
    if chunk.fourcc.as_bytes() == b"EXIF" {
      return Ok(Some(chunk.data));
    }
  }
  Ok(None)
}

/// Gets the character payload out of WebP bytes.
///
/// The payload is the EXIF `UserComment` tag, as picked by
/// [`ExifTag::payload`]. A file without EXIF data, or without the tag, has
/// no payload.
pub fn extract(bytes: &[u8]) -> CardResult<String> {
  let exif = webp_get_exif(bytes)?.ok_or(CardError::NoPayload)?;
  let tag = read_user_comment(exif)?.ok_or(CardError::NoPayload)?;
  tracing::debug!(description = tag.description(), values = tag.values().len(), "found UserComment");
  Ok(tag.payload())
}
