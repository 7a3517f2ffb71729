//! Reply selection
//!
//! A total function from the resolved signals and the raw message to a reply.
//! Canned bodies live in [`CONTENT`]; only derivatives is wired up so far,
//! other topics paired with a mode fall through to [`FALLBACK`].

use super::context::Signals;
use super::mode::Mode;
use super::topic::Topic;

pub const GREETING: &str = "Hi! What are you studying today? (example: derivatives) And do you want explain, practice, or summary?";

pub const FALLBACK: &str =
    "Tell me: (1) topic, and (2) explain/practice/summary. Example: `explain derivatives`.";

/// Messages that short-circuit to [`GREETING`] after trim and lower-casing
const GREETING_WORDS: &[&str] = &["hi", "hello"];

const DERIVATIVES_EXPLAIN: &str = "Derivatives tell you the *instant rate of change* (slope) of a function at a point.

Quick intuition: if f(x) is position, then f′(x) is speed.

Rules you must know:
1) Power: d/dx(x^n) = n·x^(n−1)
2) Constant: d/dx(c) = 0
3) Sum: d/dx(f+g) = f′+g′
4) Product: (fg)′ = f′g + fg′
5) Quotient: (f/g)′ = (f′g − fg′)/g^2
6) Chain: d/dx f(g(x)) = f′(g(x))·g′(x)

Send ONE function and I’ll do it step-by-step (example: 3x^2+5x, or sin(x^2)).";

const DERIVATIVES_PRACTICE: &str = "Practice (reply with your answers):
1) d/dx(5x^3)
2) d/dx(x^2 + 4x + 7)
3) d/dx(sin x)
4) d/dx(sin(x^2))  (chain rule)
";

const DERIVATIVES_SUMMARY: &str = "Derivative summary:
- Meaning: slope / rate of change
- Power: (x^n)' = n x^(n−1)
- Product: (fg)' = f'g + fg'
- Quotient: (f/g)' = (f'g − fg')/g^2
- Chain: f(g(x))' = f'(g(x)) g'(x)

Want 5 quick examples to memorize?";

/// Canned bodies keyed by (topic, mode), checked in order.
pub const CONTENT: &[(Topic, Mode, &str)] = &[
    (Topic::Derivatives, Mode::Explain, DERIVATIVES_EXPLAIN),
    (Topic::Derivatives, Mode::Practice, DERIVATIVES_PRACTICE),
    (Topic::Derivatives, Mode::Summary, DERIVATIVES_SUMMARY),
];

/// True if the message is a bare greeting.
pub fn is_greeting(message: &str) -> bool {
    let clean = message.trim().to_lowercase();
    GREETING_WORDS.contains(&clean.as_str())
}

/// Pick the reply for a turn. First match wins:
/// greeting, canned content, topic-only prompt, mode-only prompt, fallback.
pub fn select_reply(signals: Signals, message: &str) -> String {
    if is_greeting(message) {
        return GREETING.to_string();
    }

    match (signals.topic, signals.mode) {
        (Some(topic), Some(mode)) => content_for(topic, mode).map_or_else(
            || FALLBACK.to_string(),
            ToString::to_string,
        ),
        (Some(topic), None) => format!(
            "Got it: **{topic}**. Do you want **explain**, **practice**, or a **summary**?"
        ),
        (None, Some(mode)) => format!(
            "Cool — you want **{mode}**. What topic? (example: derivatives, integrals, limits)"
        ),
        (None, None) => FALLBACK.to_string(),
    }
}

fn content_for(topic: Topic, mode: Mode) -> Option<&'static str> {
    CONTENT
        .iter()
        .find(|(t, m, _)| *t == topic && *m == mode)
        .map(|(_, _, body)| *body)
}
