//! Property-based tests for the preprocessing pipeline
//!
//! These check the properties every pipeline must hold regardless of input:
//! - bypass with no stages is the identity over the tokenizer's output
//! - every output span points into the source text
//! - stages that do not reorder keep tokens in input order
//! - running twice gives identical output
//! - n-grams are only emitted where a full window exists

use prepline_core::prep::testing::assert_provenance;
use prepline_core::prep::transforms::standard::IDENTITY;
use prepline_core::prep::{
    tokenize, BuiltinStage, Locale, PipelineOptions, ProcessedDocument, StageRegistry,
};
use proptest::prelude::*;

/// Generate free text with mixed case, accents, punctuation and arbitrary Unicode
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Plain sentences
        "[a-zA-Z ,.!?']{0,80}",
        // Accented words
        "[a-zA-Zéèàüöñç ,.]{0,60}",
        // Digits and underscores count as word characters
        "[a-z0-9_ -]{0,40}",
        // Any printable Unicode: CJK, emoji, combining marks, other scripts
        "\\PC{0,40}",
        // Zero-width joiners and lone combining accents between words
        "[a-z\\x{200D}\\x{301}👍👩 ]{0,30}",
    ]
}

/// Generate a list of simple lowercase words
fn words_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..max)
}

fn full_options() -> PipelineOptions {
    PipelineOptions::default()
        .with_builtin(BuiltinStage::StripAccents)
        .with_builtin(BuiltinStage::Stem(Locale::English))
        .with_builtin(BuiltinStage::RemoveStopwords(Locale::English))
        .with_ngrams(2)
}

fn run(options: &PipelineOptions, text: &str) -> ProcessedDocument {
    StageRegistry::new()
        .build(options)
        .unwrap()
        .process_text(text)
        .unwrap()
}

proptest! {
    #[test]
    fn bypass_is_identity(text in text_strategy()) {
        let raw = tokenize(&text).unwrap();
        let doc = IDENTITY.process_text(&text).unwrap();

        let raw_texts: Vec<String> = raw.iter().map(|t| t.text().to_string()).collect();
        prop_assert_eq!(doc.texts(), raw_texts);
        for (token, raw) in doc.tokens().iter().zip(&raw) {
            prop_assert_eq!(token.spans(), &[raw.span()][..]);
        }
    }

    #[test]
    fn spans_point_into_source(text in text_strategy()) {
        let doc = run(&full_options(), &text);
        assert_provenance(&text, doc.tokens());
    }

    #[test]
    fn one_to_one_stages_keep_raw_slices(text in text_strategy()) {
        let raw = tokenize(&text).unwrap();
        let doc = run(&PipelineOptions::default(), &text);

        prop_assert_eq!(doc.len(), raw.len());
        for (token, raw) in doc.tokens().iter().zip(&raw) {
            prop_assert_eq!(token.raw_parts(&text), vec![raw.text()]);
            prop_assert_eq!(&token.text, &raw.text().to_lowercase());
        }
    }

    #[test]
    fn stemming_preserves_order(text in text_strategy()) {
        let raw = tokenize(&text).unwrap();
        let options = PipelineOptions::empty().with_builtin(BuiltinStage::Stem(Locale::English));
        let doc = run(&options, &text);

        let spans: Vec<_> = doc.tokens().iter().flat_map(|t| t.spans().to_vec()).collect();
        let raw_spans: Vec<_> = raw.iter().map(|t| t.span()).collect();
        prop_assert_eq!(spans, raw_spans);
    }

    #[test]
    fn processing_is_deterministic(text in text_strategy()) {
        let pipeline = StageRegistry::new().build(&full_options()).unwrap();
        let first = pipeline.process_text(&text).unwrap();
        let second = pipeline.process_text(&text).unwrap();
        prop_assert_eq!(first.to_json().to_string(), second.to_json().to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ngrams_need_a_full_window(words in words_strategy(8), size in 1usize..5) {
        let text = words.join(" ");
        let options = PipelineOptions::bypass().with_ngrams(size);
        let doc = run(&options, &text);

        prop_assert_eq!(doc.len(), words.len().saturating_sub(size - 1));
        for token in doc.tokens() {
            prop_assert_eq!(token.spans().len(), size);
        }
    }

    #[test]
    fn lower_orders_count(words in words_strategy(8), size in 1usize..5) {
        let text = words.join(" ");
        let options = PipelineOptions::bypass().with_ngrams(size).with_lower_orders(true);
        let doc = run(&options, &text);

        let n = words.len();
        let expected: usize = (1..=size).map(|order| n.saturating_sub(order - 1)).sum();
        prop_assert_eq!(doc.len(), expected);
    }
}
