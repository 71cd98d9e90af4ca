//! Character cards: a JSON document stored inside of a PNG.
//!
//! The card is stored as a `tEXt` chunk with the keyword `chara`, and the
//! text is the standard base64 encoding of the UTF-8 JSON bytes. A card file
//! has exactly one such chunk, right before `IEND`.
//!
//! The JSON itself is never parsed here, it's just a string.

use alloc::{string::String, vec::Vec};

use base64::{
  alphabet,
  engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
  Engine,
};

use crate::{
  png::{check_keyword, decode_png_chunks, encode_png_chunks, Chunk, ChunkType, TextChunk},
  CardError, CardResult,
};

/// The keyword that character card payloads are stored under.
pub const CARD_KEYWORD: &str = "chara";

/// Standard alphabet. Writes padding, and accepts text with or without it.
const CARD_BASE64: GeneralPurpose = GeneralPurpose::new(
  &alphabet::STANDARD,
  GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How [`extract_with`] picks the text chunk holding the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PayloadLookup {
  /// The first `tEXt` chunk, whatever its keyword.
  ///
  /// Card writers only ever leave one text chunk, and older readers just
  /// grabbed the first one, so this is the default.
  #[default]
  FirstTextChunk,
  /// The first `tEXt` chunk whose keyword matches (ignoring ascii case).
  Keyword,
}

/// Settings for reading and writing cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardOptions {
  /// The keyword to write the payload under, and to search for when
  /// `lookup` is [`PayloadLookup::Keyword`].
  pub keyword: String,
  /// How to find the payload when reading.
  pub lookup: PayloadLookup,
}
impl Default for CardOptions {
  #[inline]
  fn default() -> Self {
    Self { keyword: CARD_KEYWORD.into(), lookup: PayloadLookup::default() }
  }
}

/// Gets the character payload out of PNG bytes.
///
/// Same as [`extract_with`] using the default options.
#[inline]
pub fn extract(png: &[u8]) -> CardResult<String> {
  extract_with(png, &CardOptions::default())
}

/// Gets the character payload out of PNG bytes.
///
/// All of the `tEXt` chunks are decoded, so one broken text chunk anywhere in
/// the file fails the extraction. The chosen chunk's text is then base64
/// decoded and must be UTF-8.
pub fn extract_with(png: &[u8], options: &CardOptions) -> CardResult<String> {
  let chunks = decode_png_chunks(png)?;
  let texts = chunks
    .iter()
    .filter(|chunk| chunk.ty == ChunkType::tEXt)
    .map(TextChunk::try_from)
    .collect::<CardResult<Vec<_>>>()?;
  if texts.is_empty() {
    tracing::debug!("PNG has no text chunks");
    return Err(CardError::NoPayload);
  }
  let found = match options.lookup {
    PayloadLookup::FirstTextChunk => texts.first(),
    PayloadLookup::Keyword => {
      texts.iter().find(|t| t.keyword().eq_ignore_ascii_case(&options.keyword))
    }
  };
  let text_chunk = found.ok_or(CardError::NoPayload)?;
  tracing::debug!(keyword = text_chunk.keyword(), text_chunks = texts.len(), "found card payload");
  decode_payload(text_chunk.text())
}

/// Writes a character payload into PNG bytes, giving new PNG bytes.
///
/// Same as [`embed_with`] using the default options.
#[inline]
pub fn embed(png: &[u8], payload: &str) -> CardResult<Vec<u8>> {
  embed_with(png, payload, &CardOptions::default())
}

/// Writes a character payload into PNG bytes, giving new PNG bytes.
///
/// Every `tEXt` chunk already in the PNG is dropped, so the output has
/// exactly one, holding `payload`, just before `IEND`. All other chunks are
/// kept in their original order.
pub fn embed_with(png: &[u8], payload: &str, options: &CardOptions) -> CardResult<Vec<u8>> {
  check_keyword(&options.keyword)?;
  let chunks = decode_png_chunks(png)?;
  let payload_chunk = TextChunk::new(&options.keyword, &CARD_BASE64.encode(payload))?.to_chunk();

  let mut rebuilt: Vec<Chunk> = Vec::with_capacity(chunks.len() + 1);
  let mut dropped = 0_usize;
  for chunk in chunks {
    match chunk.ty {
      ChunkType::tEXt => dropped += 1,
      ChunkType::IEND => {}
      _ => rebuilt.push(chunk),
    }
  }
  rebuilt.push(payload_chunk);
  rebuilt.push(Chunk::iend());
  tracing::debug!(dropped, payload_len = payload.len(), "embedding card payload");
  Ok(encode_png_chunks(&rebuilt))
}

fn decode_payload(text: &str) -> CardResult<String> {
  let bytes = CARD_BASE64.decode(text).map_err(|_| CardError::InvalidPayloadEncoding)?;
  String::from_utf8(bytes).map_err(|_| CardError::InvalidPayloadEncoding)
}
