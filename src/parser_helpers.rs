#![forbid(unsafe_code)]

//! Shorthands for cutting fixed size fields off the front of a byte slice.

/// Splits `N` bytes off the front as an array, or `None` if there's not
/// enough bytes.
#[inline]
#[must_use]
pub fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().ok()?;
    Some((a, tail))
  } else {
    None
  }
}

/// Splits `n` bytes off the front, or `None` if there's not enough bytes.
#[inline]
#[must_use]
pub fn try_split_off_slice(bytes: &[u8], n: usize) -> Option<(&[u8], &[u8])> {
  if bytes.len() >= n {
    Some(bytes.split_at(n))
  } else {
    None
  }
}

#[test]
fn test_split_helpers() {
  assert_eq!(try_split_off_byte_array::<2>(&[1, 2, 3]), Some(([1, 2], &[3][..])));
  assert_eq!(try_split_off_byte_array::<4>(&[1, 2, 3]), None);
  assert_eq!(try_split_off_slice(&[1, 2, 3], 3), Some((&[1, 2, 3][..], &[][..])));
  assert_eq!(try_split_off_slice(&[1, 2, 3], 4), None);
}
