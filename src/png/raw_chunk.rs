use super::*;

/// Reads successive chunks out of PNG bytes, checking as it goes.
///
/// * The signature is checked when the reader is made.
/// * The first chunk must be `IHDR`.
/// * Every chunk's CRC must match.
/// * The `IEND` chunk ends the stream. Its data and CRC aren't read, and
///   neither is anything after it.
///
/// Once an error or `IEND` has been produced the iterator only gives `None`.
#[derive(Debug, Clone)]
pub struct RawChunkReader<'b> {
  spare: &'b [u8],
  seen_header: bool,
  finished: bool,
}
impl<'b> RawChunkReader<'b> {
  /// Pass the full PNG bytes, the signature is checked and skipped.
  #[inline]
  pub fn new(bytes: &'b [u8]) -> CardResult<Self> {
    check_png_signature(bytes)?;
    Ok(Self { spare: &bytes[PNG_SIGNATURE.len()..], seen_header: false, finished: false })
  }

  fn read_chunk(&mut self) -> CardResult<RawChunk<'b>> {
    if self.spare.is_empty() {
      return Err(CardError::TruncatedStream);
    }
    let (header_bytes, rest) =
      try_split_off_byte_array::<8>(self.spare).ok_or(CardError::TruncatedStream)?;
    let header: ChunkHeader = bytemuck::pod_read_unaligned(&header_bytes);
    let chunk_ty = header.chunk_ty;
    if !self.seen_header && chunk_ty != ChunkType::IHDR {
      return Err(CardError::MissingHeader);
    }
    self.seen_header = true;
    if chunk_ty == ChunkType::IEND {
      self.spare = &[];
      return Ok(RawChunk { chunk_ty, data: &[], declared_crc: None });
    }
    let length = usize::try_from(header.length.to_u32()).map_err(|_| CardError::TruncatedStream)?;
    let (data, rest) = try_split_off_slice(rest, length).ok_or(CardError::TruncatedStream)?;
    let (crc_bytes, rest) =
      try_split_off_byte_array::<4>(rest).ok_or(CardError::TruncatedStream)?;
    self.spare = rest;
    let raw = RawChunk { chunk_ty, data, declared_crc: Some(U32BE::from(u32::from_be_bytes(crc_bytes))) };
    if !raw.is_crc_correct() {
      tracing::debug!(
        chunk = %chunk_ty,
        declared = raw.declared_crc().unwrap_or_default(),
        actual = raw.compute_crc(),
        "chunk CRC mismatch"
      );
      return Err(CardError::CorruptChunk(chunk_ty));
    }
    Ok(raw)
  }
}
impl<'b> Iterator for RawChunkReader<'b> {
  type Item = CardResult<RawChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }
    let out = self.read_chunk();
    match &out {
      Ok(raw) => self.finished = raw.chunk_ty == ChunkType::IEND,
      Err(_) => self.finished = true,
    }
    Some(out)
  }
}
impl core::iter::FusedIterator for RawChunkReader<'_> {}
