use alloc::{string::String, vec::Vec};

use crate::{parser_helpers::*, ByteOrder, CardError, CardResult};

/// Tag of the pointer from IFD0 to the Exif IFD.
const EXIF_IFD_POINTER: u16 = 0x8769;
/// Tag of the user comment.
const USER_COMMENT: u16 = 0x9286;

/// What the description of a tag is when the value can't be described.
pub const UNDEFINED_DESCRIPTION: &str = "Undefined";

/// The raw values of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValues {
  /// `ASCII` type: the value split at each 0 byte, empty pieces dropped.
  Ascii(Vec<String>),
  /// `BYTE` or `UNDEFINED` type: the bytes.
  Bytes(Vec<u8>),
  /// Any other type, nothing here uses these.
  Other,
}
impl TagValues {
  /// The number of raw values.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    match self {
      Self::Ascii(strings) => strings.len(),
      Self::Bytes(bytes) => bytes.len(),
      Self::Other => 0,
    }
  }
  /// If there's no raw values.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// A `UserComment` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifTag {
  values: TagValues,
  description: String,
}
impl ExifTag {
  /// The raw values.
  #[inline]
  #[must_use]
  pub fn values(&self) -> &TagValues {
    &self.values
  }

  /// The readable form of the comment.
  ///
  /// The first 8 bytes of a user comment name its character code:
  /// * `ASCII` - the rest of the bytes are the text.
  /// * `UNICODE` - the rest is UTF-16, in the TIFF data's byte order.
  /// * `JIS` - not decoded, this is `[JIS encoded text]`.
  /// * all zero - this is `[Undefined encoding]`.
  ///
  /// Anything else, including comments stored with the `ASCII` type instead
  /// of `UNDEFINED`, is [`UNDEFINED_DESCRIPTION`].
  #[inline]
  #[must_use]
  pub fn description(&self) -> &str {
    &self.description
  }

  /// The string that a character card stored in this tag.
  ///
  /// Usually that's the description. Some writers store the JSON with the
  /// `ASCII` type, which has no character code prefix. Then the description
  /// is [`UNDEFINED_DESCRIPTION`] and, if there's exactly one raw value,
  /// that value is used instead.
  #[must_use]
  pub fn payload(&self) -> String {
    if self.description == UNDEFINED_DESCRIPTION && self.values.len() == 1 {
      match &self.values {
        TagValues::Ascii(strings) => return strings[0].clone(),
        TagValues::Bytes(bytes) => return String::from(char::from(bytes[0])),
        TagValues::Other => (),
      }
    }
    self.description.clone()
  }
}

/// Finds the `UserComment` tag in EXIF data.
///
/// The data is TIFF, optionally with an `Exif\0\0` prefix. A comment in the
/// Exif IFD is used over one in IFD0.
pub fn read_user_comment(exif: &[u8]) -> CardResult<Option<ExifTag>> {
  let tiff = exif.strip_prefix(b"Exif\0\0").unwrap_or(exif);
  let (order_bytes, rest) = try_split_off_byte_array::<2>(tiff).ok_or(CardError::InvalidExif)?;
  let order = match &order_bytes {
    b"II" => ByteOrder::Little,
    b"MM" => ByteOrder::Big,
    _ => return Err(CardError::InvalidExif),
  };
  let (magic, rest) = try_split_off_byte_array::<2>(rest).ok_or(CardError::InvalidExif)?;
  if order.u16(magic) != 42 {
    return Err(CardError::InvalidExif);
  }
  let (ifd0, _) = try_split_off_byte_array::<4>(rest).ok_or(CardError::InvalidExif)?;
  let reader = TiffReader { tiff, order };

  let mut comment = None;
  let mut exif_ifd = None;
  for entry in reader.ifd_entries(order.u32(ifd0))? {
    match entry.tag {
      USER_COMMENT => comment = Some(entry),
      EXIF_IFD_POINTER => exif_ifd = Some(order.u32(entry.value_field)),
      _ => (),
    }
  }
  if let Some(offset) = exif_ifd {
    if let Some(entry) = reader.ifd_entries(offset)?.into_iter().find(|e| e.tag == USER_COMMENT) {
      comment = Some(entry);
    }
  }
  match comment {
    Some(entry) => Ok(Some(reader.user_comment(entry)?)),
    None => Ok(None),
  }
}

#[derive(Debug, Clone, Copy)]
struct IfdEntry {
  tag: u16,
  field_type: u16,
  count: u32,
  value_field: [u8; 4],
}

struct TiffReader<'b> {
  tiff: &'b [u8],
  order: ByteOrder,
}
impl<'b> TiffReader<'b> {
  fn slice_at(&self, offset: u32, len: usize) -> CardResult<&'b [u8]> {
    let offset = usize::try_from(offset).map_err(|_| CardError::InvalidExif)?;
    let tail = self.tiff.get(offset..).ok_or(CardError::InvalidExif)?;
    try_split_off_slice(tail, len).map(|(head, _)| head).ok_or(CardError::InvalidExif)
  }

  fn ifd_entries(&self, offset: u32) -> CardResult<Vec<IfdEntry>> {
    let count = self.order.u16(
      self.slice_at(offset, 2)?.try_into().map_err(|_| CardError::InvalidExif)?,
    );
    let entries_offset = offset.checked_add(2).ok_or(CardError::InvalidExif)?;
    let mut spare = self.slice_at(entries_offset, usize::from(count) * 12)?;
    let mut out = Vec::with_capacity(usize::from(count));
    while let Some((entry, rest)) = try_split_off_byte_array::<12>(spare) {
      spare = rest;
      let [t0, t1, f0, f1, c0, c1, c2, c3, v0, v1, v2, v3] = entry;
      out.push(IfdEntry {
        tag: self.order.u16([t0, t1]),
        field_type: self.order.u16([f0, f1]),
        count: self.order.u32([c0, c1, c2, c3]),
        value_field: [v0, v1, v2, v3],
      });
    }
    Ok(out)
  }

  /// The bytes of an entry's value, either inline or at the offset.
  ///
  /// Only for the one byte types.
  fn value_bytes(&self, entry: &IfdEntry) -> CardResult<Vec<u8>> {
    let len = usize::try_from(entry.count).map_err(|_| CardError::InvalidExif)?;
    if len <= 4 {
      Ok(entry.value_field[..len].to_vec())
    } else {
      Ok(self.slice_at(self.order.u32(entry.value_field), len)?.to_vec())
    }
  }

  fn user_comment(&self, entry: IfdEntry) -> CardResult<ExifTag> {
    let values = match entry.field_type {
      // BYTE, UNDEFINED
      1 | 7 => TagValues::Bytes(self.value_bytes(&entry)?),
      // ASCII
      2 => TagValues::Ascii(
        self
          .value_bytes(&entry)?
          .split(|&b| b == 0)
          .filter(|s| !s.is_empty())
          .map(text_from_bytes)
          .collect(),
      ),
      _ => TagValues::Other,
    };
    let description = describe_user_comment(&values, self.order);
    Ok(ExifTag { values, description })
  }
}

fn describe_user_comment(values: &TagValues, order: ByteOrder) -> String {
  let bytes = match values {
    TagValues::Bytes(bytes) if bytes.len() >= 8 => bytes,
    _ => return UNDEFINED_DESCRIPTION.into(),
  };
  let (code, text) = bytes.split_at(8);
  match code {
    b"ASCII\0\0\0" => text_from_bytes(trim_nuls(text)),
    b"UNICODE\0" => {
      let units = text.chunks_exact(2).map(|pair| order.u16([pair[0], pair[1]]));
      let decoded: String =
        char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)).collect();
      String::from(decoded.trim_end_matches('\0'))
    }
    b"JIS\0\0\0\0\0" => "[JIS encoded text]".into(),
    [0, 0, 0, 0, 0, 0, 0, 0] => "[Undefined encoding]".into(),
    _ => UNDEFINED_DESCRIPTION.into(),
  }
}

/// UTF-8 if it's valid UTF-8, otherwise Latin-1.
fn text_from_bytes(bytes: &[u8]) -> String {
  match core::str::from_utf8(bytes) {
    Ok(s) => String::from(s),
    Err(_) => bytes.iter().copied().map(char::from).collect(),
  }
}

fn trim_nuls(mut bytes: &[u8]) -> &[u8] {
  while let [rest @ .., 0] = bytes {
    bytes = rest;
  }
  bytes
}
