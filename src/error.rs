use thiserror::Error;

#[cfg(feature = "png")]
use crate::png::ChunkType;

/// An error from the `charcard` crate.
///
/// Every error here is a property of the input bytes. Retrying the same call
/// on the same bytes gives the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CardError {
  /// The first 8 bytes aren't the PNG signature.
  ///
  /// When the first wrong byte is one of the CR/LF/LF bytes of the signature
  /// then `line_ending_damage` is set. That usually means the file went
  /// through a text-mode line ending conversion at some point.
  #[error("invalid PNG signature{}", line_ending_note(.line_ending_damage))]
  InvalidSignature {
    /// The deviation hit a line ending byte.
    line_ending_damage: bool,
  },

  /// The first chunk isn't `IHDR`.
  #[error("IHDR chunk missing at the start of the stream")]
  MissingHeader,

  /// The data ended in the middle of a chunk, or before the `IEND` chunk.
  #[error("stream ended before the IEND chunk")]
  TruncatedStream,

  /// A chunk's declared CRC doesn't match its contents.
  #[cfg(feature = "png")]
  #[error("CRC mismatch in {0} chunk, the data is likely corrupted")]
  CorruptChunk(ChunkType),

  /// Chunk data that was supposed to be a `tEXt` chunk isn't well formed.
  #[error("invalid tEXt chunk: {0}")]
  InvalidTextChunk(&'static str),

  /// There's no character payload in the container.
  #[error("no character payload present")]
  NoPayload,

  /// The payload text wasn't base64, or it didn't decode to UTF-8.
  #[error("character payload is not base64 encoded UTF-8")]
  InvalidPayloadEncoding,

  /// A text chunk keyword must be 1 to 79 Latin-1 bytes, none of them 0.
  #[error("invalid tEXt keyword")]
  InvalidKeyword,

  /// A text chunk string had a character that doesn't fit in one byte.
  #[error("text contains characters outside of Latin-1")]
  NotLatin1,

  /// The bytes aren't any card format this crate can read.
  #[error("unsupported card format")]
  UnsupportedFormat,

  /// The RIFF framing of a WebP file is broken.
  #[error("invalid WebP container")]
  InvalidWebp,

  /// The EXIF block of a WebP file isn't readable TIFF data.
  #[error("invalid EXIF data")]
  InvalidExif,
}

fn line_ending_note(line_ending_damage: &bool) -> &'static str {
  if *line_ending_damage {
    ", possibly caused by DOS/Unix line ending conversion"
  } else {
    ""
  }
}

/// Shorthand for results in this crate.
pub type CardResult<T> = Result<T, CardError>;
