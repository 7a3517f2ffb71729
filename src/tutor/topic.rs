//! Topic detection
//!
//! Maps free text to the subject the student is asking about.

use std::fmt;

/// Academic subject a message refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Derivatives,
    Integrals,
    Limits,
    LinearAlgebra,
    Statistics,
}

impl Topic {
    /// Name echoed back to the student
    pub fn display_name(self) -> &'static str {
        match self {
            Topic::Derivatives => "derivatives",
            Topic::Integrals => "integrals",
            Topic::Limits => "limits",
            Topic::LinearAlgebra => "linear algebra",
            Topic::Statistics => "statistics",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Keyword rules, checked in order. The first rule with any keyword
/// contained in the lower-cased text wins.
pub const TOPIC_RULES: &[(&[&str], Topic)] = &[
    (&["derivative", "derivatives"], Topic::Derivatives),
    (&["integral", "integration"], Topic::Integrals),
    (&["limit", "limits"], Topic::Limits),
    (&["matrix", "matrices", "linear algebra"], Topic::LinearAlgebra),
    (&["probability", "stats", "statistics"], Topic::Statistics),
];

/// Detect the topic of `text`, if any keyword matches.
pub fn detect_topic(text: &str) -> Option<Topic> {
    let lowered = text.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, topic)| *topic)
}
