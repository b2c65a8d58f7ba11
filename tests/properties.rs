//! Property tests for segmentation, windows, highlighting and statistics.

use proptest::prelude::*;

use termscope::document::TextDocument;
use termscope::highlight::{HighlightConfig, Highlighter};
use termscope::pipeline::{ExtractorConfig, KeywordExtractor};
use termscope::search::{ContextRadius, context_range};
use termscope::segment::SentenceSegmenter;
use termscope::term::TermSet;

const VOCABULARY: &[&str] = &[
    "scope", "emissions", "Scope", "GHG", "water", "red", "color", "board", "diversity", "b",
    "style", "the", "fund",
];

const ENDINGS: &[&str] = &[".", "!", "?"];

const GAPS: &[&str] = &[" ", "  ", "\n", " \n", "\n\n"];

fn arb_sentence() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(proptest::sample::select(VOCABULARY), 1..8),
        proptest::sample::select(ENDINGS),
    )
        .prop_map(|(words, end)| format!("{}{}", words.join(" "), end))
}

fn arb_page() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(arb_sentence(), 0..6),
        proptest::sample::select(GAPS),
    )
        .prop_map(|(sentences, gap)| sentences.join(gap))
}

fn arb_terms() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::vec(proptest::sample::select(VOCABULARY), 0..4)
}

fn extractor() -> KeywordExtractor {
    KeywordExtractor::new(ExtractorConfig::default())
}

mod prop_segmentation {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn spans_reconstruct_text_modulo_whitespace(text in arb_page()) {
            let sentences = SentenceSegmenter::new().segment(&text);

            let mut cursor = 0;
            for sentence in &sentences {
                prop_assert!(sentence.span.start >= cursor);
                prop_assert!(text[cursor..sentence.span.start].trim().is_empty());
                prop_assert_eq!(&text[sentence.span.clone()], sentence.text.as_str());
                prop_assert!(!sentence.text.is_empty());
                cursor = sentence.span.end;
            }
            prop_assert!(text[cursor..].trim().is_empty());
        }

        #[test]
        fn arbitrary_unicode_never_loses_text(text in "\\PC{0,120}") {
            let sentences = SentenceSegmenter::new().segment(&text);
            let joined: String = sentences.iter().map(|s| s.text.as_str()).collect();
            let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            let got: String = joined.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(got, expected);
        }
    }
}

mod prop_context_window {
    use super::*;

    proptest! {
        #[test]
        fn window_length_matches_formula(len in 1usize..50, index in 0usize..50, radius in 1usize..=5) {
            prop_assume!(index < len);
            let range = context_range(len, index, radius);
            let expected = radius.min(index) + 1 + radius.min(len - 1 - index);
            prop_assert_eq!(range.len(), expected);
            prop_assert!(range.contains(&index));
        }
    }
}

mod prop_highlighting {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn highlighting_is_idempotent(text in arb_page(), terms in arb_terms()) {
            let terms: TermSet = terms.into_iter().collect();
            let highlighter = Highlighter::new(HighlightConfig::default(), &terms).unwrap();

            let once = highlighter.highlight(&text);
            let twice = highlighter.highlight(&once);
            prop_assert_eq!(&twice, &once);
            prop_assert_eq!(highlighter.strip(&once), text);
        }
    }
}

mod prop_statistics {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn adding_a_term_never_lowers_counts(
            pages in proptest::collection::vec(arb_page(), 1..4),
            terms in arb_terms(),
            extra in proptest::sample::select(VOCABULARY),
        ) {
            let doc = TextDocument::from_pages("doc", pages);
            let base: TermSet = terms.iter().copied().collect();
            let mut extended = base.clone();
            extended.insert_str(extra);

            let before = extractor().extract(&doc, &base).unwrap();
            let after = extractor().extract(&doc, &extended).unwrap();

            for row in &before.statistics {
                let later = after
                    .statistics
                    .iter()
                    .find(|s| s.term == row.term)
                    .unwrap();
                prop_assert!(later.occurrences >= row.occurrences);
            }
        }

        #[test]
        fn pages_without_matches_are_never_keys(
            pages in proptest::collection::vec(arb_page(), 1..5),
            terms in arb_terms(),
            radius in 1usize..=5,
        ) {
            let doc = TextDocument::from_pages("doc", pages);
            let terms: TermSet = terms.into_iter().collect();
            let config = ExtractorConfig::new().radius(ContextRadius::new(radius).unwrap());
            let extraction = KeywordExtractor::new(config).extract(&doc, &terms).unwrap();

            for (page, matches) in extraction.matches.iter() {
                prop_assert!(!matches.is_empty());
                for m in matches {
                    prop_assert_eq!(m.page, page);
                    prop_assert!(m.context.contains(&m.sentence));
                    prop_assert!(m.context.len() <= 2 * radius + 1);
                }
            }
            for row in &extraction.statistics {
                prop_assert_eq!(row.occurrences == 0, row.pages.is_empty());
            }
        }
    }
}
