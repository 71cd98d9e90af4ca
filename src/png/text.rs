use super::*;

/// Textual data, a keyword and a value.
///
/// See [tEXt](https://www.w3.org/TR/png/#11tEXt)
///
/// In the chunk both parts are Latin-1, one byte per character, with a single
/// 0 byte between them. Both strings here only ever hold characters from
/// `U+0000` to `U+00FF`, which is what makes [`encode`](Self::encode) total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextChunk {
  keyword: String,
  text: String,
}
impl TextChunk {
  /// Makes a text chunk value.
  ///
  /// Fails with [`CardError::NotLatin1`] if either string has a character
  /// that won't fit in one byte. This does *not* check for 0 bytes or the
  /// keyword length, see [`check_keyword`] for that.
  pub fn new(keyword: &str, text: &str) -> CardResult<Self> {
    if !is_latin1(keyword) || !is_latin1(text) {
      return Err(CardError::NotLatin1);
    }
    Ok(Self { keyword: keyword.into(), text: text.into() })
  }

  /// The keyword.
  #[inline]
  #[must_use]
  pub fn keyword(&self) -> &str {
    &self.keyword
  }

  /// The text.
  #[inline]
  #[must_use]
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Parses `tEXt` chunk data.
  ///
  /// The data is split at the first 0 byte. Data with no 0 byte, or with a
  /// second 0 byte somewhere in the text, is an error.
  pub fn decode(data: &[u8]) -> CardResult<Self> {
    let split = data
      .iter()
      .position(|&b| b == 0)
      .ok_or(CardError::InvalidTextChunk("no keyword terminator found"))?;
    let (keyword, rest) = data.split_at(split);
    let text = &rest[1..];
    if text.contains(&0) {
      return Err(CardError::InvalidTextChunk("NUL not permitted in content"));
    }
    Ok(Self { keyword: latin1_to_string(keyword), text: latin1_to_string(text) })
  }

  /// Writes the chunk data: `keyword`, a 0 byte, then `text`.
  #[must_use]
  pub fn encode(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(self.keyword.len() + 1 + self.text.len());
    out.extend(self.keyword.chars().map(|c| c as u8));
    out.push(0);
    out.extend(self.text.chars().map(|c| c as u8));
    out
  }

  /// Encodes this as a full `tEXt` chunk.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    Chunk::new(ChunkType::tEXt, self.encode())
  }
}
impl TryFrom<&Chunk> for TextChunk {
  type Error = CardError;
  #[inline]
  fn try_from(chunk: &Chunk) -> Result<Self, Self::Error> {
    if chunk.ty != ChunkType::tEXt {
      return Err(CardError::InvalidTextChunk("not a tEXt chunk"));
    }
    Self::decode(&chunk.data)
  }
}

/// Checks that a keyword is usable in a `tEXt` chunk.
///
/// That's 1 to 79 characters, all of them Latin-1, none of them `'\0'`.
pub fn check_keyword(keyword: &str) -> CardResult<()> {
  let count = keyword.chars().count();
  if !(1..=79).contains(&count) || keyword.contains('\0') || !is_latin1(keyword) {
    return Err(CardError::InvalidKeyword);
  }
  Ok(())
}

#[inline]
fn is_latin1(s: &str) -> bool {
  s.chars().all(|c| u32::from(c) <= 0xFF)
}

#[inline]
fn latin1_to_string(bytes: &[u8]) -> String {
  bytes.iter().copied().map(char::from).collect()
}
