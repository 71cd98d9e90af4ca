use charcard::{read_card, webp, CardError, CardFormat};

const USER_COMMENT: u16 = 0x9286;
const EXIF_IFD_POINTER: u16 = 0x8769;

/// A big-endian TIFF block with only an Exif IFD holding the comment.
fn tiff_be(field_type: u16, comment: &[u8]) -> Vec<u8> {
  let mut out = b"MM\0\x2A\0\0\0\x08".to_vec();
  // IFD0 at 8
  out.extend_from_slice(&1_u16.to_be_bytes());
  out.extend_from_slice(&EXIF_IFD_POINTER.to_be_bytes());
  out.extend_from_slice(&4_u16.to_be_bytes());
  out.extend_from_slice(&1_u32.to_be_bytes());
  out.extend_from_slice(&26_u32.to_be_bytes());
  out.extend_from_slice(&0_u32.to_be_bytes());
  // Exif IFD at 26, comment bytes at 44
  out.extend_from_slice(&1_u16.to_be_bytes());
  out.extend_from_slice(&USER_COMMENT.to_be_bytes());
  out.extend_from_slice(&field_type.to_be_bytes());
  out.extend_from_slice(&(comment.len() as u32).to_be_bytes());
  out.extend_from_slice(&44_u32.to_be_bytes());
  out.extend_from_slice(&0_u32.to_be_bytes());
  out.extend_from_slice(comment);
  out
}

/// A WebP file with an odd sized image chunk and then the given chunks.
fn webp_with(chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
  let mut body = b"WEBP".to_vec();
  let mut push = |fourcc: &[u8; 4], data: &[u8]| {
    body.extend_from_slice(fourcc);
    body.extend_from_slice(&(data.len() as u32).to_le_bytes());
    body.extend_from_slice(data);
    if data.len() % 2 == 1 {
      body.push(0);
    }
  };
  push(b"VP8L", &[0x2F, 0, 0, 0, 0x10]);
  for (fourcc, data) in chunks {
    push(fourcc, data);
  }
  let mut out = b"RIFF".to_vec();
  out.extend_from_slice(&(body.len() as u32).to_le_bytes());
  out.extend_from_slice(&body);
  out
}

#[test]
fn test_undefined_type_ascii_comment() {
  let mut comment = b"ASCII\0\0\0".to_vec();
  comment.extend_from_slice(br#"{"name":"W"}"#);
  let file = webp_with(&[(b"EXIF", tiff_be(7, &comment))]);
  assert_eq!(CardFormat::sniff(&file), Some(CardFormat::Webp));
  assert_eq!(webp::extract(&file).unwrap(), r#"{"name":"W"}"#);
  assert_eq!(read_card(&file).unwrap(), r#"{"name":"W"}"#);
}

#[test]
fn test_ascii_type_comment_uses_the_raw_value() {
  let file = webp_with(&[(b"EXIF", tiff_be(2, b"{\"name\":\"\xC3\xA9\"}\0"))]);
  assert_eq!(webp::extract(&file).unwrap(), "{\"name\":\"\u{e9}\"}");
}

#[test]
fn test_unknown_code_is_returned_verbatim() {
  let file = webp_with(&[(b"EXIF", tiff_be(7, b"NOTACODE{}"))]);
  assert_eq!(webp::extract(&file).unwrap(), webp::UNDEFINED_DESCRIPTION);
}

#[test]
fn test_exif_chunk_after_other_chunks() {
  let mut comment = b"ASCII\0\0\0".to_vec();
  comment.extend_from_slice(b"[]");
  let file = webp_with(&[(b"ICCP", b"abc".to_vec()), (b"EXIF", tiff_be(7, &comment)), (b"XMP ", b"<x/>".to_vec())]);
  assert_eq!(read_card(&file).unwrap(), "[]");
  assert_eq!(webp::webp_get_exif(&file).unwrap().map(<[u8]>::len), Some(tiff_be(7, &comment).len()));
}

#[test]
fn test_no_exif_is_no_payload() {
  let file = webp_with(&[]);
  assert_eq!(webp::extract(&file), Err(CardError::NoPayload));
  let no_comment = webp_with(&[(b"EXIF", b"II*\0\x08\0\0\0\0\0\0\0\0\0".to_vec())]);
  assert_eq!(webp::extract(&no_comment), Err(CardError::NoPayload));
}

#[test]
fn test_broken_riff() {
  let mut file = webp_with(&[(b"EXIF", tiff_be(2, b"x\0"))]);
  // claim more bytes than there are
  file[4] = 0xFF;
  file[5] = 0xFF;
  assert_eq!(webp::extract(&file), Err(CardError::InvalidWebp));
  assert_eq!(webp::extract(b"RIFF"), Err(CardError::InvalidWebp));
  assert_eq!(webp::extract(b"RIFF\x04\0\0\0WAVE"), Err(CardError::InvalidWebp));
}

#[test]
fn test_broken_exif() {
  let file = webp_with(&[(b"EXIF", b"not tiff".to_vec())]);
  assert_eq!(webp::extract(&file), Err(CardError::InvalidExif));
}

#[test]
fn test_random_bytes_no_panics() {
  for _ in 0..100 {
    let noise = super::rand_bytes(256);
    let _ = webp::extract(&webp_with(&[(b"EXIF", noise.clone())]));
    let mut tiff = b"II*\0\x08\0\0\0".to_vec();
    tiff.extend_from_slice(&noise);
    let _ = webp::extract(&webp_with(&[(b"EXIF", tiff)]));
  }
}
