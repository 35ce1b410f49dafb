//! Inline citation marker parser
//!
//! Splits explanation text into plain runs and citation groups. A marker is
//! `[` followed by one or more decimal numbers separated by `,` (whitespace
//! allowed after each comma) and a closing `]`, e.g. `[2]` or `[1, 3,4]`.
//!
//! ```text
//! Algorithm split_citations(T, C):
//! 1. last ← 0, search ← 0
//! 2. While a '[' exists in T[search..] at position i:
//!      If a marker matches at i, ending at j:
//!        Emit T[last..i] as text (if non-empty)
//!        R ← [n - 1 for n in marker if 1 ≤ n ≤ |C|]
//!        If R = ∅: emit T[i..j] as text
//!        Else: emit group R
//!        last ← j, search ← j
//!      Else: search ← i + 1
//! 3. Emit T[last..] as text (if non-empty)
//!
//! Complexity: O(n), no input is scanned twice once matched
//! ```

use serde::Serialize;

/// One resolved reference inside a citation group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationRef {
    /// 1-based number shown to the reader
    pub number: usize,
    /// Source URL the number points at
    pub url: String,
}

/// A display segment of explanation text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Plain text, shown as-is
    Text { text: String },
    /// A bracketed group of references, in the order written
    Citations { refs: Vec<CitationRef> },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    /// Text form: plain runs verbatim, groups as `[1,2]`
    pub fn to_plain_text(&self) -> String {
        match self {
            Segment::Text { text } => text.clone(),
            Segment::Citations { refs } => {
                let numbers: Vec<String> = refs.iter().map(|r| r.number.to_string()).collect();
                format!("[{}]", numbers.join(","))
            }
        }
    }
}

/// A marker found in the text, before resolution
#[derive(Debug)]
struct Marker<'a> {
    end: usize,
    numbers: Vec<&'a str>,
}

/// Split `text` into plain and citation segments resolved against `citations`
///
/// Text without markers, or an empty citation list, yields one plain segment
/// holding the text unchanged.
pub fn split_citations(text: &str, citations: &[String]) -> Vec<Segment> {
    if citations.is_empty() {
        return vec![Segment::text(text)];
    }

    let mut segments = Vec::new();
    let mut last = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find('[') {
        let open = search + offset;

        let Some(marker) = match_marker(text, open) else {
            search = open + 1;
            continue;
        };

        if open > last {
            segments.push(Segment::text(&text[last..open]));
        }

        let refs = resolve(&marker.numbers, citations);
        if refs.is_empty() {
            segments.push(Segment::text(&text[open..marker.end]));
        } else {
            segments.push(Segment::Citations { refs });
        }

        last = marker.end;
        search = marker.end;
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::text(&text[last..]));
    }

    segments
}

/// Try to match a marker whose `[` sits at byte offset `open`
fn match_marker(text: &str, open: usize) -> Option<Marker<'_>> {
    let bytes = text.as_bytes();
    let mut pos = open + 1;
    let mut numbers = Vec::new();

    loop {
        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == digits_start {
            return None;
        }
        numbers.push(&text[digits_start..pos]);

        match bytes.get(pos) {
            Some(b']') => {
                return Some(Marker {
                    end: pos + 1,
                    numbers,
                })
            }
            Some(b',') => {
                pos += 1;
                let rest = &text[pos..];
                pos += rest.len() - rest.trim_start().len();
            }
            _ => return None,
        }
    }
}

/// Map 1-based numbers onto citations, dropping any that fall outside the list
fn resolve(numbers: &[&str], citations: &[String]) -> Vec<CitationRef> {
    numbers
        .iter()
        .filter_map(|n| n.parse::<usize>().ok()?.checked_sub(1))
        .filter(|index| *index < citations.len())
        .map(|index| CitationRef {
            number: index + 1,
            url: citations[index].clone(),
        })
        .collect()
}

/// Reassemble segments into text, groups rendered as `[1,2]`
pub fn to_plain_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::to_plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn urls(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://source{}.example", i)).collect()
    }

    fn group(numbers: &[usize], citations: &[String]) -> Segment {
        Segment::Citations {
            refs: numbers
                .iter()
                .map(|n| CitationRef {
                    number: *n,
                    url: citations[n - 1].clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_mixed_markers() {
        let citations = vec!["https://a.com".to_string(), "https://b.com".to_string()];
        let segments = split_citations("Spend more on Google [1] and less on TikTok [2,5]", &citations);

        assert_eq!(
            segments,
            vec![
                Segment::text("Spend more on Google "),
                Segment::Citations {
                    refs: vec![CitationRef {
                        number: 1,
                        url: "https://a.com".to_string()
                    }]
                },
                Segment::text(" and less on TikTok "),
                Segment::Citations {
                    refs: vec![CitationRef {
                        number: 2,
                        url: "https://b.com".to_string()
                    }]
                },
            ]
        );
    }

    #[test]
    fn test_multiple_numbers_keep_order_and_duplicates() {
        let citations = urls(3);
        let segments = split_citations("See [3, 1,1].", &citations);

        assert_eq!(
            segments,
            vec![
                Segment::text("See "),
                group(&[3, 1, 1], &citations),
                Segment::text("."),
            ]
        );
    }

    #[test]
    fn test_all_out_of_range_stays_literal() {
        let citations = urls(2);
        let segments = split_citations("Benchmarks [7, 9] apply", &citations);

        assert_eq!(
            segments,
            vec![
                Segment::text("Benchmarks "),
                Segment::text("[7, 9]"),
                Segment::text(" apply"),
            ]
        );
        assert_eq!(to_plain_text(&segments), "Benchmarks [7, 9] apply");
    }

    #[test]
    fn test_zero_is_out_of_range() {
        let citations = urls(2);
        let segments = split_citations("[0]", &citations);
        assert_eq!(segments, vec![Segment::text("[0]")]);
    }

    #[test]
    fn test_huge_number_is_dropped() {
        let citations = urls(1);
        let segments = split_citations("[99999999999999999999999,1]", &citations);
        assert_eq!(segments, vec![group(&[1], &citations)]);
    }

    #[test]
    fn test_no_markers_returns_single_segment() {
        let citations = urls(2);
        let text = "LinkedIn performs well for B2B lead generation.";
        assert_eq!(split_citations(text, &citations), vec![Segment::text(text)]);
        assert_eq!(split_citations("", &citations), vec![Segment::text("")]);
    }

    #[test]
    fn test_empty_citation_list_returns_text_unchanged() {
        let text = "Google drives intent [1][2].";
        assert_eq!(split_citations(text, &[]), vec![Segment::text(text)]);
    }

    #[test]
    fn test_malformed_markers_are_text() {
        let citations = urls(3);
        let text = "Not markers: [1,] [ 1] [1 ,2] [a] [] [1;2] [2";
        assert_eq!(split_citations(text, &citations), vec![Segment::text(text)]);
    }

    #[test]
    fn test_adjacent_markers_match_independently() {
        let citations = urls(3);
        let segments = split_citations("TikTok[1][2][3]", &citations);

        assert_eq!(
            segments,
            vec![
                Segment::text("TikTok"),
                group(&[1], &citations),
                group(&[2], &citations),
                group(&[3], &citations),
            ]
        );
    }

    #[test]
    fn test_nested_bracket_resumes_after_failed_open() {
        let citations = urls(2);
        let segments = split_citations("[[2]]", &citations);

        assert_eq!(
            segments,
            vec![Segment::text("["), group(&[2], &citations), Segment::text("]")]
        );
    }

    #[test]
    fn test_whitespace_after_comma_variants() {
        let citations = urls(3);
        let segments = split_citations("x [1,\t2,\n 3]", &citations);
        assert_eq!(
            segments,
            vec![Segment::text("x "), group(&[1, 2, 3], &citations)]
        );
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        let citations = urls(1);
        let segments = split_citations("Rendimiento élevé [1] — ok", &citations);
        assert_eq!(
            segments,
            vec![
                Segment::text("Rendimiento élevé "),
                group(&[1], &citations),
                Segment::text(" — ok"),
            ]
        );
    }

    #[test]
    fn test_plain_text_rendering_of_groups() {
        let citations = urls(2);
        let segments = split_citations("a [2, 1, 5] b", &citations);
        assert_eq!(to_plain_text(&segments), "a [2,1] b");
    }

    #[quickcheck]
    fn prop_marker_free_text_round_trips(text: String, citations: Vec<String>) -> TestResult {
        if text.contains('[') {
            return TestResult::discard();
        }
        TestResult::from_bool(split_citations(&text, &citations) == vec![Segment::text(text.clone())])
    }

    #[quickcheck]
    fn prop_empty_citations_round_trip(text: String) -> bool {
        split_citations(&text, &[]) == vec![Segment::text(text.clone())]
    }

    #[quickcheck]
    fn prop_digit_free_text_round_trips(text: String, citations: Vec<String>) -> TestResult {
        if text.chars().any(|c| c.is_ascii_digit()) {
            return TestResult::discard();
        }
        TestResult::from_bool(split_citations(&text, &citations) == vec![Segment::text(text.clone())])
    }
}
