//! Property-based tests for the rule-based tutor
//!
//! Invariants checked:
//! - Detection is total and deterministic for arbitrary text
//! - Any text containing "derivative" is about derivatives
//! - The current message always wins over history
//! - Greetings short-circuit regardless of history
//! - Only the last six history entries matter

use super::context::{history_window, resolve, Signals, HISTORY_WINDOW};
use super::mode::detect_mode;
use super::response::GREETING;
use super::topic::{detect_topic, Topic};
use super::respond;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Filler words that match no topic or mode keyword
fn arb_neutral_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("hello there".to_string()),
        Just("ok".to_string()),
        Just("thanks".to_string()),
        Just("what about this".to_string()),
        Just("hmm".to_string()),
        Just("cool".to_string()),
    ]
}

/// Text seeded with keywords from any rule
fn arb_keyword_text() -> impl Strategy<Value = String> {
    let keyword = prop_oneof![
        Just("derivative"),
        Just("integration"),
        Just("limits"),
        Just("matrices"),
        Just("stats"),
        Just("explain"),
        Just("questions"),
        Just("notes"),
    ];
    proptest::collection::vec(prop_oneof![keyword.prop_map(String::from), arb_neutral_word()], 0..5)
        .prop_map(|words| words.join(" "))
}

/// Keyword casing variants
fn arb_casing(word: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn detection_is_total_and_deterministic(text in any::<String>()) {
        prop_assert_eq!(detect_topic(&text), detect_topic(&text));
        prop_assert_eq!(detect_mode(&text), detect_mode(&text));
    }

    #[test]
    fn derivative_keyword_always_detected(
        prefix in "[a-z ]{0,20}",
        keyword in prop_oneof![arb_casing("derivative"), arb_casing("derivatives")],
        suffix in "[a-z ]{0,20}",
    ) {
        let text = format!("{prefix}{keyword}{suffix}");
        prop_assert_eq!(detect_topic(&text), Some(Topic::Derivatives));
    }

    #[test]
    fn message_signals_take_precedence(
        message in arb_keyword_text(),
        history in proptest::collection::vec(arb_keyword_text(), 0..10),
    ) {
        let from_message = Signals::detect(&message);
        let resolved = resolve(&message, &history);
        if from_message.topic.is_some() {
            prop_assert_eq!(resolved.topic, from_message.topic);
        }
        if from_message.mode.is_some() {
            prop_assert_eq!(resolved.mode, from_message.mode);
        }
    }

    #[test]
    fn greeting_ignores_history(
        greeting in prop_oneof![
            Just("hi"), Just("Hi "), Just(" HELLO"), Just("Hello\n"),
        ],
        history in proptest::collection::vec(arb_keyword_text(), 0..10),
    ) {
        prop_assert_eq!(respond(greeting, &history), GREETING);
    }

    #[test]
    fn only_last_six_entries_matter(
        old in proptest::collection::vec(arb_keyword_text(), 1..5),
        recent in proptest::collection::vec(arb_neutral_word(), HISTORY_WINDOW),
    ) {
        let mut history = old;
        history.extend(recent.iter().cloned());
        prop_assert_eq!(history_window(&history), history_window(&recent));
        prop_assert_eq!(resolve("ok", &history), Signals::default());
    }
}
