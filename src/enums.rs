use serde::Serialize;

/// Outcome of comparing a series' slice count against its configured rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    Pass,
    Fail,
    NoRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UniformityStatus {
    Pass,
    Fail,
    SkipNoFiles,
}

/// Why a discovered file did not contribute to any series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The header could not be parsed; carries the reader's message.
    Unreadable(String),
    MissingSeriesUid,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Unreadable(message) => write!(f, "unreadable header: {message}"),
            SkipReason::MissingSeriesUid => write!(f, "no Series Instance UID"),
        }
    }
}
