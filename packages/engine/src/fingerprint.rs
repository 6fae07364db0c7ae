//! Document fingerprint derivation.
//!
//! Two records that resolved the same source file through different path
//! spellings (case, separator style, doubled separators) must carry the
//! same fingerprint, since the fingerprint is a dedup grouping component.

/// Derive a fingerprint from a resolved source file path or URL.
///
/// Lowercases, converts backslashes to forward slashes, collapses doubled
/// separators (keeping the `://` of a URL scheme intact) and strips the
/// trailing separator. Empty input yields an empty fingerprint.
#[must_use]
pub fn document_fingerprint(source: &str) -> String {
    let lowered = source.trim().to_lowercase().replace('\\', "/");

    let (scheme, path) = match lowered.split_once("://") {
        Some((scheme, path)) => (Some(scheme), path),
        None => (None, lowered.as_str()),
    };

    let mut collapsed = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                collapsed.push(c);
            }
            prev_slash = true;
        } else {
            collapsed.push(c);
            prev_slash = false;
        }
    }
    let trimmed = collapsed.trim_end_matches('/');

    match scheme {
        Some(scheme) => format!("{scheme}://{trimmed}"),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_case_and_separator_invariance() {
        let a = document_fingerprint("Scans\\RS\\Zakon_o_radu.PDF");
        let b = document_fingerprint("scans/rs/zakon_o_radu.pdf");
        assert_eq!(a, b);
        assert_eq!(a, "scans/rs/zakon_o_radu.pdf");
    }

    #[test]
    fn test_fingerprint_collapses_doubled_separators() {
        assert_eq!(
            document_fingerprint("scans//rs///zakon.pdf"),
            "scans/rs/zakon.pdf"
        );
    }

    #[test]
    fn test_fingerprint_preserves_url_scheme() {
        assert_eq!(
            document_fingerprint("HTTPS://Gazette.example/RS//30_98.pdf"),
            "https://gazette.example/rs/30_98.pdf"
        );
    }

    #[test]
    fn test_fingerprint_strips_trailing_separator() {
        assert_eq!(document_fingerprint("scans/rs/"), "scans/rs");
    }

    #[test]
    fn test_fingerprint_empty() {
        assert_eq!(document_fingerprint(""), "");
        assert_eq!(document_fingerprint("   "), "");
    }
}
