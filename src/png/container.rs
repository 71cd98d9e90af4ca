use super::*;

/// The first eight bytes of a PNG datastream must match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Offsets of the CR and LF bytes in the signature.
const LINE_ENDING_OFFSETS: [usize; 3] = [4, 5, 7];

/// Checks if the PNG's initial 8 bytes are correct.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Like [`is_png_signature_correct`], but gives an error saying what went
/// wrong.
pub fn check_png_signature(bytes: &[u8]) -> CardResult<()> {
  if is_png_signature_correct(bytes) {
    return Ok(());
  }
  let first_bad = PNG_SIGNATURE
    .iter()
    .enumerate()
    .position(|(i, expected)| bytes.get(i) != Some(expected))
    .unwrap_or(0);
  let line_ending_damage = LINE_ENDING_OFFSETS.contains(&first_bad);
  tracing::debug!(first_bad, line_ending_damage, "bad PNG signature");
  Err(CardError::InvalidSignature { line_ending_damage })
}

/// Decodes PNG bytes into a list of chunks.
///
/// Every chunk is checked as described on [`RawChunkReader`]. On success the
/// list starts with `IHDR` and ends with an `IEND` that has no data.
pub fn decode_png_chunks(bytes: &[u8]) -> CardResult<Vec<Chunk>> {
  let mut chunks = Vec::new();
  for raw in RawChunkReader::new(bytes)? {
    chunks.push(Chunk::from(raw?));
  }
  tracing::trace!(count = chunks.len(), "decoded PNG chunks");
  Ok(chunks)
}

/// Encodes a list of chunks as PNG bytes.
///
/// This writes whatever it's given, in order, with fresh CRC values. It
/// doesn't check that the list starts with `IHDR` or ends with `IEND`, that's
/// up to the caller.
///
/// ## Panics
/// * If any chunk has more than `u32::MAX` bytes of data.
#[must_use]
pub fn encode_png_chunks(chunks: &[Chunk]) -> Vec<u8> {
  let total = PNG_SIGNATURE.len() + chunks.iter().map(|c| 12 + c.data.len()).sum::<usize>();
  let mut out = Vec::with_capacity(total);
  out.extend_from_slice(&PNG_SIGNATURE);
  for chunk in chunks {
    let length = u32::try_from(chunk.data.len()).unwrap_or_else(|_| {
      panic!("{} chunk has {} bytes of data, more than PNG allows", chunk.ty, chunk.data.len())
    });
    let header = ChunkHeader { length: U32BE::from(length), chunk_ty: chunk.ty };
    out.extend_from_slice(bytemuck::bytes_of(&header));
    out.extend_from_slice(&chunk.data);
    out.extend_from_slice(&U32BE::from(chunk.compute_crc()).to_bytes());
  }
  out
}
