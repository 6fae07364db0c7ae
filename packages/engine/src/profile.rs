//! Per-jurisdiction script profiles.
//!
//! A profile bundles everything script-dependent: which alphabets a
//! jurisdiction publishes in, the heading vocabulary in those alphabets,
//! and the canonical heading word used when synthesizing labels. The
//! heading scanner and segmenter are parameterized by a profile instead of
//! carrying per-script pattern literals.

use crate::types::Jurisdiction;

/// Writing script of a published gazette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Cyrillic,
}

/// Script-dependent configuration for one or more jurisdictions.
#[derive(Debug)]
pub struct ScriptProfile {
    /// Scripts this jurisdiction publishes in, primary first.
    pub scripts: &'static [Script],

    /// Heading vocabulary: full words and abbreviations, in every active
    /// script. Matching is case-insensitive and whitespace-tolerant; the
    /// scanner prefers longer spellings on overlap.
    pub heading_tokens: &'static [&'static str],

    /// Canonical heading word used for synthesized segment labels.
    pub heading_label: &'static str,
}

/// Latin-only gazettes.
static LATIN: ScriptProfile = ScriptProfile {
    scripts: &[Script::Latin],
    heading_tokens: &["članak", "član", "čl"],
    heading_label: "Član",
};

/// Gazettes published in Cyrillic with Latin re-publications.
static CYRILLIC_FIRST: ScriptProfile = ScriptProfile {
    scripts: &[Script::Cyrillic, Script::Latin],
    heading_tokens: &["članak", "члан", "član", "чл", "čl"],
    heading_label: "Član",
};

/// Gazettes published in Latin with Cyrillic re-publications.
static LATIN_FIRST: ScriptProfile = ScriptProfile {
    scripts: &[Script::Latin, Script::Cyrillic],
    heading_tokens: &["članak", "члан", "član", "чл", "čl"],
    heading_label: "Član",
};

/// Resolve the script profile for a jurisdiction.
#[must_use]
pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> &'static ScriptProfile {
    match jurisdiction {
        Jurisdiction::FederacijaBih => &LATIN,
        Jurisdiction::RepublikaSrpska | Jurisdiction::Srbija => &CYRILLIC_FIRST,
        Jurisdiction::BrckoDistrikt | Jurisdiction::CrnaGora => &LATIN_FIRST,
    }
}
