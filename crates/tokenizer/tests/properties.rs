use pairwise_tokenizer::{EncodingMode, Tokenizer};
use proptest::prelude::*;

fn trained(mode: EncodingMode, text: &str, merges: usize) -> Tokenizer {
    let mut tokenizer = Tokenizer::builder().encoding_mode(mode).build().unwrap();
    tokenizer.train(text, merges).unwrap();
    tokenizer
}

proptest! {
    #[test]
    fn byte_level_roundtrip(train in ".{0,64}", text in ".{0,64}", merges in 0usize..40) {
        let tokenizer = trained(EncodingMode::ByteLevel, &train, merges);
        let encoding = tokenizer.encode(&text);

        prop_assert_eq!(tokenizer.decode_strict(&encoding.ids).unwrap(), text);
    }

    #[test]
    fn char_level_roundtrip(train in "\\PC{0,48}", text in "\\PC{0,48}", merges in 0usize..30) {
        let tokenizer = trained(EncodingMode::CharLevel, &train, merges);
        let encoding = tokenizer.encode(&text);

        prop_assert_eq!(tokenizer.decode_strict(&encoding.ids).unwrap(), text);
    }

    #[test]
    fn merge_count_bounded(text in "[a-d ]{0,80}", merges in 0usize..50) {
        let mut tokenizer = Tokenizer::default();
        let outcome = tokenizer.train(&text, merges).unwrap();

        prop_assert!(outcome.num_merges() <= merges);
        prop_assert!(outcome.num_merges() <= text.len().saturating_sub(1));
        prop_assert_eq!(tokenizer.vocab_size(), 256 + outcome.num_merges());
    }

    #[test]
    fn training_is_deterministic(text in "[a-c]{0,60}", merges in 0usize..20) {
        let first = trained(EncodingMode::ByteLevel, &text, merges);
        let second = trained(EncodingMode::ByteLevel, &text, merges);

        prop_assert_eq!(first.rules().as_slice(), second.rules().as_slice());
    }

    #[test]
    fn encoding_training_text_matches_training_stream(text in "[a-c]{0,60}", merges in 0usize..20) {
        let mut tokenizer = Tokenizer::default();
        let outcome = tokenizer.train(&text, merges).unwrap();

        prop_assert_eq!(tokenizer.encode(&text).ids, outcome.stream.into_ids());
    }

    #[test]
    fn untrained_encode_is_identity(text in ".{0,64}") {
        let tokenizer = Tokenizer::default();
        let ids: Vec<u32> = text.bytes().map(u32::from).collect();

        prop_assert_eq!(tokenizer.encode(&text).ids, ids);
    }

    #[test]
    fn json_roundtrip_preserves_encoding(text in "[a-e ]{1,60}", merges in 0usize..20) {
        let tokenizer = trained(EncodingMode::ByteLevel, &text, merges);
        let loaded = Tokenizer::from_json(&tokenizer.to_json().unwrap()).unwrap();

        prop_assert_eq!(loaded.rules().as_slice(), tokenizer.rules().as_slice());
        prop_assert_eq!(loaded.encode(&text).ids, tokenizer.encode(&text).ids);
    }
}
