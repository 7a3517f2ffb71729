//! Mode detection
//!
//! Maps free text to the kind of help the student wants.

use std::fmt;

/// Requested interaction style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Explain,
    Practice,
    Summary,
}

impl Mode {
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Explain => "explain",
            Mode::Practice => "practice",
            Mode::Summary => "summary",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Keyword rules in priority order: explain > practice > summary.
pub const MODE_RULES: &[(&[&str], Mode)] = &[
    (&["explain"], Mode::Explain),
    (&["practice", "questions"], Mode::Practice),
    (&["summary", "summarize", "notes"], Mode::Summary),
];

/// Detect the requested mode of `text`, if any keyword matches.
pub fn detect_mode(text: &str) -> Option<Mode> {
    let lowered = text.to_lowercase();
    MODE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, mode)| *mode)
}
