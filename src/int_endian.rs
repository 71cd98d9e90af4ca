//! Integers with a fixed or declared byte order.

/// A `u32` stored as big-endian bytes.
///
/// This stores only an array of bytes, so unlike a normal `u32` it has an
/// alignment of 1 and can be part of a `Pod` header read from any offset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct U32BE([u8; 4]);
impl U32BE {
  /// Convert this value to a native `u32`
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes(self.0)
  }
  /// Reinterpret the bits as an `i32`.
  ///
  /// PNG writers in some languages store the CRC through a signed view, so
  /// the CRC claim gets compared this way.
  #[inline]
  #[must_use]
  pub const fn to_i32(self) -> i32 {
    i32::from_be_bytes(self.0)
  }
  /// Make a value from a native `u32`
  #[inline]
  #[must_use]
  pub const fn from_u32(u: u32) -> Self {
    Self(u.to_be_bytes())
  }
  /// The big-endian bytes.
  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 4] {
    self.0
  }
}
impl core::fmt::Debug for U32BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("U32BE").field(&self.to_u32()).finish()
  }
}
impl From<u32> for U32BE {
  #[inline]
  #[must_use]
  fn from(value: u32) -> Self {
    Self::from_u32(value)
  }
}
impl From<U32BE> for u32 {
  #[inline]
  #[must_use]
  fn from(value: U32BE) -> Self {
    value.to_u32()
  }
}

/// Reads `u16` and `u32` values with a byte order picked at runtime.
///
/// TIFF data (inside of EXIF) declares its own byte order in the first two
/// bytes, so readers of it can't pick the order at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
  /// `II`, Intel order.
  Little,
  /// `MM`, Motorola order.
  Big,
}
impl ByteOrder {
  /// Reads a `u16` from exactly 2 bytes.
  #[inline]
  #[must_use]
  pub const fn u16(self, bytes: [u8; 2]) -> u16 {
    match self {
      Self::Little => u16::from_le_bytes(bytes),
      Self::Big => u16::from_be_bytes(bytes),
    }
  }
  /// Reads a `u32` from exactly 4 bytes.
  #[inline]
  #[must_use]
  pub const fn u32(self, bytes: [u8; 4]) -> u32 {
    match self {
      Self::Little => u32::from_le_bytes(bytes),
      Self::Big => u32::from_be_bytes(bytes),
    }
  }
}

#[test]
fn test_u32be_views() {
  let x = U32BE::from_u32(0xAE42_6082);
  assert_eq!(x.to_bytes(), [0xAE, 0x42, 0x60, 0x82]);
  assert_eq!(x.to_u32(), 0xAE42_6082);
  assert_eq!(x.to_i32(), 0xAE42_6082_u32 as i32);
  assert!(x.to_i32() < 0);
}

#[test]
fn test_byte_order() {
  assert_eq!(ByteOrder::Little.u16([0x2A, 0x00]), 42);
  assert_eq!(ByteOrder::Big.u16([0x00, 0x2A]), 42);
  assert_eq!(ByteOrder::Little.u32([8, 0, 0, 0]), 8);
  assert_eq!(ByteOrder::Big.u32([0, 0, 0, 8]), 8);
}
