//! Page stream to segment splitting.
//!
//! Pages are concatenated into one logical stream with an offset→page map,
//! the heading scanner runs once over the stream, and each consecutive
//! pair of matches bounds one segment. A document with no recognizable
//! heading yields exactly one whole-document fallback segment, so a law is
//! never stored without segments.

use crate::config::{FALLBACK_EXCERPT_CHARS, FALLBACK_SEGMENT_LABEL};
use crate::heading::{HeadingMatch, HeadingScanner};
use crate::types::{Jurisdiction, Page, SegmentDraft, SegmentKind};

/// Splits extracted pages into segments for one jurisdiction.
pub struct Segmenter {
    scanner: HeadingScanner,
    heading_label: &'static str,
}

impl Segmenter {
    /// Create a segmenter for a jurisdiction's script profile.
    #[must_use]
    pub fn new(jurisdiction: Jurisdiction) -> Self {
        let profile = jurisdiction.profile();
        Self {
            scanner: HeadingScanner::new(profile),
            heading_label: profile.heading_label,
        }
    }

    /// Split pages into an ordered segment list.
    ///
    /// Each segment's `page_hint` is the page where its *heading* occurred,
    /// even when the body spills onto following pages. Consecutive headings
    /// with the same ordinal each produce a distinct segment; collapsing
    /// true duplicates is merge logic's job, not the segmenter's.
    #[must_use]
    pub fn segment(&self, pages: &[Page]) -> Vec<SegmentDraft> {
        let (stream, page_starts) = concat_pages(pages);
        let matches: Vec<HeadingMatch> = self.scanner.scan(&stream).collect();

        if matches.is_empty() {
            tracing::warn!(
                pages = pages.len(),
                chars = stream.len(),
                "no headings detected, emitting whole-document fallback segment"
            );
            return vec![fallback_segment(&stream, pages)];
        }

        let mut segments = Vec::with_capacity(matches.len());
        for (i, m) in matches.iter().enumerate() {
            let body_end = matches.get(i + 1).map_or(stream.len(), |next| next.start);
            segments.push(SegmentDraft {
                kind: SegmentKind::Article,
                label: format!("{} {}", self.heading_label, m.ordinal),
                number: Some(m.ordinal),
                text: stream[m.end..body_end].trim().to_string(),
                page_hint: page_for_offset(&page_starts, m.start),
            });
        }
        segments
    }
}

/// Concatenate page texts, recording each page's start offset.
///
/// A newline joins adjacent pages so a heading split across a page break
/// still reads as whitespace-separated.
fn concat_pages(pages: &[Page]) -> (String, Vec<(usize, u32)>) {
    let mut stream = String::with_capacity(pages.iter().map(|p| p.text.len() + 1).sum());
    let mut starts = Vec::with_capacity(pages.len());

    for page in pages {
        if !stream.is_empty() {
            stream.push('\n');
        }
        starts.push((stream.len(), page.number));
        stream.push_str(&page.text);
    }
    (stream, starts)
}

/// Page number owning a stream offset.
fn page_for_offset(starts: &[(usize, u32)], offset: usize) -> u32 {
    let idx = starts.partition_point(|(start, _)| *start <= offset);
    idx.checked_sub(1)
        .and_then(|i| starts.get(i))
        .map_or(1, |(_, page)| *page)
}

/// The single whole-document segment for heading-less input.
fn fallback_segment(stream: &str, pages: &[Page]) -> SegmentDraft {
    let trimmed = stream.trim();
    let cut = trimmed
        .char_indices()
        .nth(FALLBACK_EXCERPT_CHARS)
        .map_or(trimmed.len(), |(idx, _)| idx);

    SegmentDraft {
        kind: SegmentKind::Fulltext,
        label: FALLBACK_SEGMENT_LABEL.to_string(),
        number: None,
        text: trimmed[..cut].to_string(),
        page_hint: pages.first().map_or(1, |p| p.number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segmenter() -> Segmenter {
        Segmenter::new(Jurisdiction::RepublikaSrpska)
    }

    #[test]
    fn test_simple_two_article_split() {
        let pages = vec![Page::new(
            1,
            "Član 1. Ovim zakonom uređuje se rad. Član 2. Pojmovi imaju značenje.",
        )];
        let segments = segmenter().segment(&pages);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, "Član 1");
        assert_eq!(segments[0].number, Some(1));
        assert_eq!(segments[0].text, "Ovim zakonom uređuje se rad.");
        assert_eq!(segments[1].label, "Član 2");
        assert_eq!(segments[1].text, "Pojmovi imaju značenje.");
    }

    #[test]
    fn test_page_hint_is_heading_page_not_body_page() {
        // Article 2 starts on page 1 and its body continues onto page 2.
        let pages = vec![
            Page::new(1, "Član 1. Kratki tekst. Član 2. Ovaj tekst se nastavlja"),
            Page::new(2, "na sljedećoj stranici. Član 3. Kraj."),
        ];
        let segments = segmenter().segment(&pages);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].number, Some(2));
        assert_eq!(segments[1].page_hint, 1);
        assert!(segments[1].text.contains("nastavlja"));
        assert!(segments[1].text.contains("na sljedećoj stranici."));
        assert_eq!(segments[2].page_hint, 2);
    }

    #[test]
    fn test_cyrillic_document() {
        let pages = vec![Page::new(
            1,
            "Члан 1. Овим законом уређује се рад. Члан 2. Појмови.",
        )];
        let segments = segmenter().segment(&pages);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, "Član 1");
    }

    #[test]
    fn test_no_heading_yields_single_fallback() {
        let pages = vec![Page::new(1, "Tekst bez ijednog prepoznatljivog naslova.")];
        let segments = segmenter().segment(&pages);

        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_fallback());
        assert_eq!(segments[0].number, None);
        assert_eq!(segments[0].label, "Cijeli tekst");
        assert_eq!(segments[0].page_hint, 1);
        assert_eq!(segments[0].text, "Tekst bez ijednog prepoznatljivog naslova.");
    }

    #[test]
    fn test_empty_input_still_yields_fallback() {
        assert_eq!(segmenter().segment(&[]).len(), 1);

        let segments = segmenter().segment(&[Page::new(1, "")]);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_fallback());
        assert_eq!(segments[0].text, "");
    }

    #[test]
    fn test_fallback_excerpt_is_bounded() {
        let pages = vec![Page::new(1, "x".repeat(FALLBACK_EXCERPT_CHARS * 2))];
        let segments = segmenter().segment(&pages);
        assert_eq!(segments[0].text.chars().count(), FALLBACK_EXCERPT_CHARS);
    }

    #[test]
    fn test_duplicate_ordinals_each_produce_a_segment() {
        // Re-printed heading, a common conversion artifact.
        let pages = vec![Page::new(1, "Član 4. Prva verzija. Član 4. Druga verzija.")];
        let segments = segmenter().segment(&pages);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].number, Some(4));
        assert_eq!(segments[1].number, Some(4));
        assert_eq!(segments[0].text, "Prva verzija.");
        assert_eq!(segments[1].text, "Druga verzija.");
    }

    #[test]
    fn test_heading_split_across_page_break() {
        let pages = vec![
            Page::new(1, "Član 1. Tekst prvog člana. Čla"),
            Page::new(2, "n 2. Tekst drugog člana."),
        ];
        let segments = segmenter().segment(&pages);

        // The broken heading reads "Čla\nn 2." across the page join.
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].number, Some(2));
        assert_eq!(segments[1].page_hint, 1);
    }

    #[test]
    fn test_last_segment_runs_to_end_of_stream() {
        let pages = vec![Page::new(1, "Član 1. Prvi. Član 2. Posljednji tekst ide do kraja.")];
        let segments = segmenter().segment(&pages);
        assert_eq!(segments[1].text, "Posljednji tekst ide do kraja.");
    }
}
