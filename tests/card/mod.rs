use charcard::{
  card::{self, CardOptions, PayloadLookup},
  png::*,
  CardError,
};
use proptest::prelude::*;

fn blank_png() -> Vec<u8> {
  encode_png_chunks(&[Chunk::new(ChunkType::IHDR, vec![0; 13]), Chunk::iend()])
}

fn text_chunks(png: &[u8]) -> Vec<TextChunk> {
  decode_png_chunks(png)
    .unwrap()
    .iter()
    .filter(|c| c.ty == ChunkType::tEXt)
    .map(|c| TextChunk::try_from(c).unwrap())
    .collect()
}

#[test]
fn test_minimal_container_has_no_payload() {
  assert_eq!(card::extract(&blank_png()), Err(CardError::NoPayload));
  // the IHDR contents are never looked at, even when empty
  let empty_header = encode_png_chunks(&[Chunk::new(ChunkType::IHDR, Vec::new()), Chunk::iend()]);
  assert_eq!(card::extract(&empty_header), Err(CardError::NoPayload));
  let with_card = card::embed(&empty_header, "{}").unwrap();
  assert_eq!(card::extract(&with_card).unwrap(), "{}");
}

#[test]
fn test_embed_extract_name() {
  let with_card = card::embed(&blank_png(), r#"{"name":"A"}"#).unwrap();
  assert_eq!(card::extract(&with_card).unwrap(), r#"{"name":"A"}"#);
}

#[test]
fn test_fixture_card() {
  let png = super::fixture("card_1x1.png");
  assert_eq!(card::extract(&png).unwrap(), "{\"name\":\"Fixture\",\"description\":\"caf\u{e9} \u{2615}\"}");
  assert_eq!(card::extract(&super::fixture("blank_1x1.png")), Err(CardError::NoPayload));
}

#[test]
fn test_embed_keeps_other_chunks_in_order() {
  let png = super::fixture("card_1x1.png");
  let rewritten = card::embed(&png, "{}").unwrap();
  let types: Vec<ChunkType> = decode_png_chunks(&rewritten).unwrap().iter().map(|c| c.ty).collect();
  assert_eq!(types, [ChunkType::IHDR, ChunkType::from(*b"IDAT"), ChunkType::tEXt, ChunkType::IEND]);
  // the input wasn't touched
  assert_eq!(png, super::fixture("card_1x1.png"));
}

#[test]
fn test_embed_removes_every_text_chunk() {
  let png = encode_png_chunks(&[
    Chunk::new(ChunkType::IHDR, vec![0; 13]),
    TextChunk::new("Software", "paint").unwrap().to_chunk(),
    Chunk::new(ChunkType::from(*b"IDAT"), vec![7; 5]),
    TextChunk::new("chara", "e30=").unwrap().to_chunk(),
    TextChunk::new("Comment", "old").unwrap().to_chunk(),
    Chunk::iend(),
  ]);
  let out = card::embed(&png, "[1]").unwrap();
  let texts = text_chunks(&out);
  assert_eq!(texts.len(), 1);
  assert_eq!(texts[0].keyword(), "chara");
  assert_eq!(texts[0].text(), "WzFd");
}

#[test]
fn test_first_text_chunk_wins() {
  let png = encode_png_chunks(&[
    Chunk::new(ChunkType::IHDR, vec![0; 13]),
    TextChunk::new("other", "eyJ4IjoxfQ==").unwrap().to_chunk(),
    TextChunk::new("chara", "e30=").unwrap().to_chunk(),
    Chunk::iend(),
  ]);
  assert_eq!(card::extract(&png).unwrap(), r#"{"x":1}"#);
  let keyed = CardOptions { lookup: PayloadLookup::Keyword, ..CardOptions::default() };
  assert_eq!(card::extract_with(&png, &keyed).unwrap(), "{}");
}

#[test]
fn test_nul_in_text_content() {
  let mut data = b"chara\0".to_vec();
  data.extend_from_slice(b"e30=");
  data.push(0);
  data.extend_from_slice(b"extra");
  assert!(matches!(TextChunk::decode(&data), Err(CardError::InvalidTextChunk(_))));
  let png = encode_png_chunks(&[
    Chunk::new(ChunkType::IHDR, vec![0; 13]),
    Chunk::new(ChunkType::tEXt, data),
    Chunk::iend(),
  ]);
  assert!(matches!(card::extract(&png), Err(CardError::InvalidTextChunk(_))));
}

#[test]
fn test_payload_not_base64() {
  let png = encode_png_chunks(&[
    Chunk::new(ChunkType::IHDR, vec![0; 13]),
    TextChunk::new("chara", "{not base64}").unwrap().to_chunk(),
    Chunk::iend(),
  ]);
  assert_eq!(card::extract(&png), Err(CardError::InvalidPayloadEncoding));
}

#[test]
fn test_embed_rejects_broken_input() {
  let mut png = blank_png();
  png[0] = 0;
  assert_eq!(card::embed(&png, "{}"), Err(CardError::InvalidSignature { line_ending_damage: false }));
  let blank = blank_png();
  assert_eq!(card::embed(&blank[..20], "{}"), Err(CardError::TruncatedStream));
}

#[test]
fn test_concurrent_embedding() {
  let base = blank_png();
  std::thread::scope(|s| {
    let handles: Vec<_> = (0..8)
      .map(|n| {
        let base = &base;
        s.spawn(move || {
          let payload = format!(r#"{{"n":{n}}}"#);
          let out = card::embed(base, &payload).unwrap();
          assert_eq!(card::extract(&out).unwrap(), payload);
        })
      })
      .collect();
    for h in handles {
      h.join().unwrap();
    }
  });
}

proptest! {
  #[test]
  fn test_extract_after_embed(payload in any::<String>()) {
    let out = card::embed(&blank_png(), &payload).unwrap();
    prop_assert_eq!(card::extract(&out).unwrap(), payload);
  }

  #[test]
  fn test_second_embed_replaces_the_first(p1 in any::<String>(), p2 in any::<String>()) {
    let once = card::embed(&blank_png(), &p1).unwrap();
    let twice = card::embed(&once, &p2).unwrap();
    prop_assert_eq!(card::extract(&twice).unwrap(), p2.clone());
    let texts = text_chunks(&twice);
    prop_assert_eq!(texts.len(), 1);
    prop_assert_eq!(texts[0].keyword(), "chara");
    prop_assert_eq!(twice, card::embed(&blank_png(), &p2).unwrap());
  }
}
