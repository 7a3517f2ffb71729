//! Rule-based study tutor
//!
//! Detects the topic and mode of a message, fills gaps from recent history,
//! and picks a canned reply. Every turn is a pure function of its inputs.

mod context;
mod mode;
mod response;
mod topic;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use context::{resolve, Signals, HISTORY_WINDOW};
#[allow(unused_imports)]
pub use mode::{detect_mode, Mode};
#[allow(unused_imports)]
pub use response::{select_reply, FALLBACK, GREETING};
#[allow(unused_imports)]
pub use topic::{detect_topic, Topic};

/// Produce the tutor's reply for one turn.
pub fn respond<S: AsRef<str>>(message: &str, history: &[S]) -> String {
    let signals = resolve(message, history);
    tracing::debug!(
        topic = ?signals.topic,
        mode = ?signals.mode,
        history_len = history.len(),
        "Resolved dialogue signals"
    );
    select_reply(signals, message)
}
