//! Conversion-residue detection.
//!
//! A failed office-format conversion sometimes leaves encoded-document
//! control syntax where prose should be. Storing that as legal text is
//! worse than storing nothing, so segments are screened before acceptance.
//! The rules are deliberately conservative: wrongly discarding valid text
//! is the failure mode to avoid, missing the odd corrupted segment is not.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// How many control words at the very start of the text count as residue.
const CONTROL_WORD_RUN_MIN: usize = 4;

/// How many escaped codepoints within the scan window count as residue.
const ESCAPED_CODEPOINT_MIN: usize = 8;

/// Scan window in characters for the escaped-codepoint rule.
const SCAN_WINDOW_CHARS: usize = 2000;

/// Run of backslash control words (`\par`, `\fs24`, ...) at text start.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONTROL_WORD_RUN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern =
        format!(r"^[\s{{]*(?:\\[a-zA-Z]{{1,32}}-?\d*[\s{{}}]*){{{CONTROL_WORD_RUN_MIN},}}");
    Regex::new(&pattern).expect("valid regex")
});

/// Escaped codepoint, e.g. `\'e8` or `\u0434`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ESCAPED_CODEPOINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\'[0-9a-fA-F]{2}|\\u-?\d{2,6}").expect("valid regex"));

/// Why a text was classified as conversion residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactReason {
    /// Text opens with an encoded-document header (`{\rtf...`).
    EncodedHeader,

    /// Text opens with a run of backslash control words.
    ControlWordRun,

    /// Text is dense with escaped numeric codepoints.
    EscapedCodepoints,
}

impl ArtifactReason {
    /// Get the string value used in reprocess events.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EncodedHeader => "encoded_header",
            Self::ControlWordRun => "control_word_run",
            Self::EscapedCodepoints => "escaped_codepoints",
        }
    }
}

impl fmt::Display for ArtifactReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a segment text as conversion residue.
///
/// Returns `None` for anything that looks like prose; a `Some` means the
/// segment must be excluded from consumer indexes and the owning law
/// flagged for reprocessing.
#[must_use]
pub fn detect_markup_residue(text: &str) -> Option<ArtifactReason> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("{\\rtf") {
        tracing::debug!(reason = %ArtifactReason::EncodedHeader, "markup residue detected");
        return Some(ArtifactReason::EncodedHeader);
    }

    if CONTROL_WORD_RUN.is_match(trimmed) {
        tracing::debug!(reason = %ArtifactReason::ControlWordRun, "markup residue detected");
        return Some(ArtifactReason::ControlWordRun);
    }

    let window_end = trimmed
        .char_indices()
        .nth(SCAN_WINDOW_CHARS)
        .map_or(trimmed.len(), |(idx, _)| idx);
    let escapes = ESCAPED_CODEPOINT.find_iter(&trimmed[..window_end]).count();
    if escapes >= ESCAPED_CODEPOINT_MIN {
        tracing::debug!(
            reason = %ArtifactReason::EscapedCodepoints,
            escapes,
            "markup residue detected"
        );
        return Some(ArtifactReason::EscapedCodepoints);
    }

    None
}
