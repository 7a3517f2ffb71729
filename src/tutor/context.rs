//! Dialogue context resolution
//!
//! The tutor keeps no state between turns. "Memory" comes from re-reading
//! the recent history the client sends along with each message.

use super::mode::{detect_mode, Mode};
use super::topic::{detect_topic, Topic};

/// Number of trailing history entries consulted
pub const HISTORY_WINDOW: usize = 6;

/// Separator used when flattening the history window into one text
const HISTORY_SEPARATOR: &str = " | ";

/// Topic and mode signals found in a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub topic: Option<Topic>,
    pub mode: Option<Mode>,
}

impl Signals {
    pub fn detect(text: &str) -> Self {
        Self {
            topic: detect_topic(text),
            mode: detect_mode(text),
        }
    }

    /// Fill absent signals from `fallback`; present ones are kept.
    #[must_use]
    pub fn or(self, fallback: Signals) -> Self {
        Self {
            topic: self.topic.or(fallback.topic),
            mode: self.mode.or(fallback.mode),
        }
    }
}

/// Join the last [`HISTORY_WINDOW`] entries into a single text blob.
pub fn history_window<S: AsRef<str>>(history: &[S]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(HISTORY_SEPARATOR)
}

/// Effective signals for a turn: the message wins, history fills gaps.
///
/// The history window is scanned as one blob, so a topic from one entry and
/// a mode from another combine.
pub fn resolve<S: AsRef<str>>(message: &str, history: &[S]) -> Signals {
    let from_message = Signals::detect(message);
    let from_history = Signals::detect(&history_window(history));
    from_message.or(from_history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_keeps_last_six() {
        let history: Vec<String> = (1..=8).map(|i| format!("m{i}")).collect();
        assert_eq!(history_window(&history), "m3 | m4 | m5 | m6 | m7 | m8");
    }

    #[test]
    fn test_window_short_history() {
        assert_eq!(history_window(&["a", "b"]), "a | b");
        assert_eq!(history_window::<&str>(&[]), "");
    }

    #[test]
    fn test_message_takes_precedence() {
        let signals = resolve("explain integrals", &["derivatives practice"]);
        assert_eq!(signals.topic, Some(Topic::Integrals));
        assert_eq!(signals.mode, Some(Mode::Explain));
    }

    #[test]
    fn test_history_fills_gaps_independently() {
        let signals = resolve("give me practice questions", &["let's do derivatives"]);
        assert_eq!(signals.topic, Some(Topic::Derivatives));
        assert_eq!(signals.mode, Some(Mode::Practice));
    }

    #[test]
    fn test_topic_and_mode_from_different_entries() {
        let signals = resolve("ok", &["derivatives", "unrelated", "summary"]);
        assert_eq!(signals.topic, Some(Topic::Derivatives));
        assert_eq!(signals.mode, Some(Mode::Summary));
    }

    #[test]
    fn test_entry_outside_window_ignored() {
        let mut history = vec!["derivatives".to_string()];
        history.extend((0..6).map(|_| "hmm".to_string()));
        assert_eq!(resolve("ok", &history), Signals::default());
    }
}
