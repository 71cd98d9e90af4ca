use super::*;

/// The four byte type code of a PNG chunk.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  /// Image header, must be the first chunk.
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image end, must be the last chunk.
  pub const IEND: Self = Self(*b"IEND");
  /// Latin-1 text, a keyword and a value.
  pub const tEXt: Self = Self(*b"tEXt");

  /// The raw code bytes.
  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 4] {
    self.0
  }
}
impl From<[u8; 4]> for ChunkType {
  #[inline]
  #[must_use]
  fn from(bytes: [u8; 4]) -> Self {
    Self(bytes)
  }
}
impl core::fmt::Debug for ChunkType {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(&AsciiArray(self.0), f)
  }
}
impl core::fmt::Display for ChunkType {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&AsciiArray(self.0), f)
  }
}

/// The 8 bytes in front of every chunk's data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[derive(bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub(crate) struct ChunkHeader {
  pub(crate) length: U32BE,
  pub(crate) chunk_ty: ChunkType,
}

/// A chunk that owns its data.
///
/// This is what [`decode_png_chunks`] gives back, and what
/// [`encode_png_chunks`] takes. The CRC isn't stored, it's checked during
/// decoding and recomputed during encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
  /// The chunk's type code.
  pub ty: ChunkType,
  /// The chunk's data. Must not be longer than `u32::MAX`.
  pub data: Vec<u8>,
}
impl Chunk {
  /// Makes a new chunk.
  #[inline]
  #[must_use]
  pub fn new(ty: ChunkType, data: Vec<u8>) -> Self {
    Self { ty, data }
  }

  /// The `IEND` chunk, which has no data.
  #[inline]
  #[must_use]
  pub const fn iend() -> Self {
    Self { ty: ChunkType::IEND, data: Vec::new() }
  }

  /// The CRC this chunk will have once it's encoded.
  #[inline]
  #[must_use]
  pub fn compute_crc(&self) -> u32 {
    png_crc(&self.ty.to_bytes(), &self.data)
  }
}
impl From<RawChunk<'_>> for Chunk {
  #[inline]
  #[must_use]
  fn from(raw: RawChunk<'_>) -> Self {
    Self { ty: raw.chunk_ty, data: raw.data.to_vec() }
  }
}

/// A chunk that's still borrowing from the PNG bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawChunk<'b> {
  pub(crate) chunk_ty: ChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: Option<U32BE>,
}
impl<'b> RawChunk<'b> {
  /// The chunk's type code.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkType {
    self.chunk_ty
  }
  /// The chunk's data.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC the file claims the chunk has.
  ///
  /// This is `None` for `IEND`, the reader stops before that CRC.
  #[inline]
  #[must_use]
  pub fn declared_crc(&self) -> Option<u32> {
    self.declared_crc.map(U32BE::to_u32)
  }
  /// The CRC the chunk actually has.
  #[inline]
  #[must_use]
  pub fn compute_crc(&self) -> u32 {
    png_crc(&self.chunk_ty.to_bytes(), self.data)
  }
  /// If the declared and actual CRC agree.
  #[inline]
  #[must_use]
  pub fn is_crc_correct(&self) -> bool {
    match self.declared_crc {
      Some(declared) => declared.to_i32() == self.compute_crc() as i32,
      None => true,
    }
  }
}
impl core::fmt::Debug for RawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("chunk_ty", &self.chunk_ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

#[test]
fn test_chunk_header_layout() {
  assert_eq!(core::mem::size_of::<ChunkHeader>(), 8);
  assert_eq!(core::mem::align_of::<ChunkHeader>(), 1);
  let bytes = [0, 0, 0, 13, b'I', b'H', b'D', b'R'];
  let header: ChunkHeader = bytemuck::pod_read_unaligned(&bytes);
  assert_eq!(header.length.to_u32(), 13);
  assert_eq!(header.chunk_ty, ChunkType::IHDR);
}

#[test]
fn test_iend_crc() {
  assert_eq!(Chunk::iend().compute_crc(), 0xAE42_6082);
}
