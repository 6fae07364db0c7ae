//! Article-heading recognition.
//!
//! Recognizes heading tokens ("Član", "Čl.", "Члан", ...) followed by an
//! ordinal, tolerating the stray whitespace that broken format conversions
//! insert between letters ("Č l a n  6"). One scanner is built per script
//! profile; the pattern is derived from the profile's vocabulary instead
//! of being spelled per script.

use regex::Regex;

use crate::profile::ScriptProfile;

/// One recognized heading occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Ordinal number following the token, base 10, leading zeros ignored.
    pub ordinal: u32,

    /// Byte offset of the start of the heading token.
    pub start: usize,

    /// Byte offset just past the heading (token, ordinal and terminator).
    pub end: usize,

    /// Literal matched text.
    pub raw: String,
}

/// Scanner for the heading vocabulary of one script profile.
#[derive(Debug)]
pub struct HeadingScanner {
    pattern: Regex,
}

impl HeadingScanner {
    /// Build a scanner from a script profile.
    ///
    /// Longer token spellings are tried first, so an overlapping candidate
    /// at the same offset resolves to the longer spelling ("članak" over
    /// "član" over "čl").
    #[must_use]
    #[allow(clippy::expect_used)] // Pattern is assembled from letter-only tokens
    pub fn new(profile: &ScriptProfile) -> Self {
        let mut tokens: Vec<&str> = profile.heading_tokens.to_vec();
        tokens.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

        let alternation = tokens
            .iter()
            .map(|token| {
                token
                    .chars()
                    .map(|c| regex::escape(&c.to_string()))
                    .collect::<Vec<_>>()
                    .join(r"\s*")
            })
            .collect::<Vec<_>>()
            .join("|");

        // Token, optional abbreviation dot, 1-3 digit ordinal, then a
        // period/dash/colon, whitespace or end of text.
        let pattern = format!(r"(?i)(?:{alternation})\s*\.?\s*(\d{{1,3}})(?:\s*[.\-–—:]|\s|$)");
        Self {
            pattern: Regex::new(&pattern).expect("valid generated pattern"),
        }
    }

    /// Scan text for headings, yielding matches in left-to-right order.
    ///
    /// The scan is lazy, finite and restartable: calling `scan` again on
    /// the same input yields the same sequence.
    pub fn scan<'s, 't>(&'s self, text: &'t str) -> HeadingScan<'s, 't> {
        HeadingScan {
            text,
            inner: self.pattern.captures_iter(text),
        }
    }
}

/// Lazy iterator over heading matches. Created by [`HeadingScanner::scan`].
pub struct HeadingScan<'s, 't> {
    text: &'t str,
    inner: regex::CaptureMatches<'s, 't>,
}

impl Iterator for HeadingScan<'_, '_> {
    type Item = HeadingMatch;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let caps = self.inner.next()?;
            let whole = caps.get(0)?;

            // Reject hits glued to a preceding word ("učlan 6") and
            // inflected in-text references that happen to align.
            let preceded_by_word = self.text[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
            if preceded_by_word {
                continue;
            }

            let Ok(ordinal) = caps.get(1)?.as_str().parse::<u32>() else {
                continue;
            };

            return Some(HeadingMatch {
                ordinal,
                start: whole.start(),
                end: whole.end(),
                raw: whole.as_str().to_string(),
            });
        }
    }
}
