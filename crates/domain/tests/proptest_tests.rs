//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{Accent, SpeechRate, SynthesisRequest, SynthesisText};
use proptest::prelude::*;

// ============================================================================
// SpeechRate Property Tests
// ============================================================================

mod speech_rate_tests {
    use super::*;

    proptest! {
        #[test]
        fn sanitized_rate_is_always_finite_and_positive(raw in any::<f64>()) {
            let rate = SpeechRate::new(raw).multiplier();
            prop_assert!(rate.is_finite());
            prop_assert!(rate > 0.0);
        }

        #[test]
        fn non_positive_rate_falls_back_to_default(raw in -1000.0f64..=0.0f64) {
            prop_assert_eq!(SpeechRate::new(raw), SpeechRate::DEFAULT);
        }

        #[test]
        fn positive_rate_is_preserved(raw in 1e-6f64..=1e6f64) {
            prop_assert!((SpeechRate::new(raw).multiplier() - raw).abs() < f64::EPSILON);
        }

        #[test]
        fn percent_delta_sign_follows_rate(raw in 0.01f64..=20.0f64) {
            let delta = SpeechRate::new(raw).percent_delta();
            if raw > 1.01 {
                prop_assert!(delta > 0);
            } else if raw < 0.99 {
                prop_assert!(delta < 0);
            } else {
                prop_assert!(delta.abs() <= 1);
            }
        }
    }
}

// ============================================================================
// Accent Property Tests
// ============================================================================

mod accent_tests {
    use super::*;

    proptest! {
        #[test]
        fn parsing_never_panics(raw in ".*") {
            let accent = Accent::parse_lenient(&raw);
            prop_assert!(Accent::all().contains(&accent));
        }

        #[test]
        fn bucket_roundtrips(accent in prop_oneof![Just(Accent::Us), Just(Accent::Gb)]) {
            prop_assert_eq!(Accent::parse_lenient(accent.bucket()), accent);
            prop_assert_eq!(Accent::parse_lenient(accent.language_tag()), accent);
        }
    }
}

// ============================================================================
// SynthesisText / SynthesisRequest Property Tests
// ============================================================================

mod request_tests {
    use super::*;

    proptest! {
        #[test]
        fn whitespace_only_text_is_rejected(raw in "[ \t\n\r]*") {
            prop_assert!(SynthesisText::new(&raw).is_err());
            prop_assert!(SynthesisRequest::from_raw(&raw, None, None, None).is_err());
        }

        #[test]
        fn text_with_content_is_accepted_and_trimmed(
            pad_left in "[ \t]{0,4}",
            body in "[a-zA-Z][a-zA-Z ,.!?]{0,40}[a-zA-Z.!?]",
            pad_right in "[ \t]{0,4}"
        ) {
            let raw = format!("{pad_left}{body}{pad_right}");
            let text = SynthesisText::new(&raw).unwrap();
            prop_assert_eq!(text.as_str(), body.as_str());
        }

        #[test]
        fn non_text_fields_never_fail(
            accent in proptest::option::of(".*"),
            rate in proptest::option::of(any::<f64>()),
            voice in proptest::option::of(".*")
        ) {
            let request = SynthesisRequest::from_raw(
                "Hello",
                accent.as_deref(),
                rate,
                voice.as_deref(),
            );
            prop_assert!(request.is_ok());
        }
    }
}
