//! Title comparison keys.
//!
//! A law title yields three keys: the folded `normalized` form, a `root`
//! with amendment boilerplate and case endings stripped, and a bounded
//! `slug`. The root is what groups an amending act with its base act; the
//! gazette key keeps them apart during dedup (see the pipeline crate).

use crate::config::{
    AMENDMENT_PREFIXES, CONNECTIVE_INFIX, GENERIC_TITLE_SUFFIXES, SLUG_MAX_LEN, SLUG_SEPARATOR,
    STEM_MIN_WORD_LEN, STEM_SUFFIXES,
};
use crate::scriptfold;

/// Comparison keys derived from one raw title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleKey {
    /// Folded title (see [`scriptfold::fold`]).
    pub normalized: String,

    /// Normalized title with amendment boilerplate, generic nouns and the
    /// final word's case ending stripped.
    pub root: String,

    /// Root title with spaces replaced by `_`, bounded in length.
    pub slug: String,
}

impl TitleKey {
    /// Derive all keys from a raw title.
    ///
    /// Deterministic and total: empty input produces empty keys.
    ///
    /// # Examples
    /// ```
    /// use zakonik_engine::TitleKey;
    ///
    /// let amending = TitleKey::derive("ЗАКОН О ИЗМЈЕНАМА И ДОПУНАМА ЗАКОНА О РАДУ");
    /// let base = TitleKey::derive("Zakon o radu");
    /// assert_eq!(amending.root, base.root);
    /// ```
    #[must_use]
    pub fn derive(title: &str) -> Self {
        let normalized = scriptfold::fold(title);
        let root = root_title(&normalized);
        let slug = slugify(&root);
        Self {
            normalized,
            root,
            slug,
        }
    }
}

/// Strip boilerplate from a folded title down to its root.
///
/// Order: one amendment prefix (longest match wins), the connective infix
/// left at the new start, trailing generic nouns, then the final word's
/// case ending. Stripping never reduces a non-empty title to fewer than
/// two characters; a strip that would is discarded.
fn root_title(normalized: &str) -> String {
    let mut rest = normalized;

    if let Some(prefix) = AMENDMENT_PREFIXES
        .iter()
        .filter(|p| starts_with_word(rest, p))
        .max_by_key(|p| p.len())
    {
        rest = rest[prefix.len()..].trim_start();
    }

    if starts_with_word(rest, CONNECTIVE_INFIX) {
        rest = rest[CONNECTIVE_INFIX.len()..].trim_start();
    }

    for suffix in GENERIC_TITLE_SUFFIXES {
        if ends_with_word(rest, suffix) {
            let candidate = rest[..rest.len() - suffix.len()].trim_end();
            if candidate.len() > 1 {
                rest = candidate;
            }
            break;
        }
    }

    let root = stem_final_word(rest);
    if root.is_empty() {
        // A prefix consumed the whole title ("Ispravka" on its own).
        return normalized.to_string();
    }
    root
}

/// `needle` matches at the start of `haystack` on a word boundary.
fn starts_with_word(haystack: &str, needle: &str) -> bool {
    haystack.strip_prefix(needle).is_some_and(|tail| {
        !needle.is_empty() && (tail.is_empty() || tail.starts_with(' '))
    })
}

/// `needle` matches at the end of `haystack` on a word boundary.
fn ends_with_word(haystack: &str, needle: &str) -> bool {
    haystack.strip_suffix(needle).is_some_and(|head| {
        !needle.is_empty() && (head.is_empty() || head.ends_with(' '))
    })
}

/// Strip one case-ending suffix from the final word.
///
/// Folded titles are ASCII, so byte indexing is safe here. Words shorter
/// than [`STEM_MIN_WORD_LEN`] characters are left alone, and a strip that
/// would leave a single character is discarded.
fn stem_final_word(title: &str) -> String {
    let (head, word) = match title.rsplit_once(' ') {
        Some((head, word)) => (Some(head), word),
        None => (None, title),
    };

    if word.len() < STEM_MIN_WORD_LEN {
        return title.to_string();
    }

    for suffix in STEM_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() > 1 {
                return match head {
                    Some(head) => format!("{head} {stem}"),
                    None => stem.to_string(),
                };
            }
            break;
        }
    }

    title.to_string()
}

/// Turn a root title into a bounded slug.
fn slugify(root: &str) -> String {
    let mut slug: String = root
        .chars()
        .map(|c| if c == ' ' { SLUG_SEPARATOR } else { c })
        .collect();
    slug.truncate(SLUG_MAX_LEN);
    slug.trim_matches(SLUG_SEPARATOR).to_string()
}
