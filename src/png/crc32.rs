//! CRC-32 as PNG uses it (ISO-3309, the same one zip and gzip use).

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

/// A running CRC-32 value.
///
/// A chunk's CRC covers the type bytes and then the data bytes, so this lets
/// the two slices be fed in one after the other without joining them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32(u32);
impl Default for Crc32 {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self::new()
  }
}
impl Crc32 {
  /// A fresh CRC.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(u32::MAX)
  }

  /// Adds more bytes to the CRC.
  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    for byte in bytes.iter().copied() {
      let i = (self.0 ^ u32::from(byte)) as u8 as usize;
      self.0 = CRC_TABLE[i] ^ (self.0 >> 8);
    }
  }

  /// The final CRC value.
  #[inline]
  #[must_use]
  pub const fn finish(self) -> u32 {
    self.0 ^ u32::MAX
  }
}

/// The CRC of a PNG chunk, over `type || data`.
#[inline]
#[must_use]
pub fn png_crc(chunk_ty: &[u8; 4], data: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(chunk_ty);
  crc.update(data);
  crc.finish()
}

#[test]
fn test_crc32_check_value() {
  let mut crc = Crc32::new();
  crc.update(b"123456789");
  assert_eq!(crc.finish(), 0xCBF4_3926);
  assert_eq!(Crc32::new().finish(), 0);
}

#[test]
fn test_png_crc_known_chunks() {
  assert_eq!(png_crc(b"IEND", &[]), 0xAE42_6082);
  // 1x1 8-bit RGBA header
  let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0];
  assert_eq!(png_crc(b"IHDR", &ihdr), 0x1F15_C489);
}

#[test]
fn test_png_crc_split_point_doesnt_matter() {
  let mut crc = Crc32::new();
  crc.update(b"tE");
  crc.update(b"Xtchara\0");
  crc.update(b"e30=");
  assert_eq!(crc.finish(), png_crc(b"tEXt", b"chara\0e30="));
}
