//! Character-window paginator for cleaned book text.
//!
//! Pages are cut at natural boundaries inside a fixed-size character window:
//! a paragraph break beats a line break beats a sentence break, and the
//! nearest break before the window edge wins within each tier. A window with
//! no break at all is cut at the edge so a page never exceeds `page_size`
//! characters and the scan always advances.
//!
//! Page counts depend on `page_size`, so stored page numbers go stale the
//! moment a reader changes font or window. `resolve_page_index` maps a
//! percentage back onto whatever page list the current settings produced;
//! the percentage, not the page number, is the durable position.
//!
//! Offsets: sizes count Unicode characters, cuts happen at char boundaries,
//! and the internal arithmetic is in byte offsets so slicing never lands
//! inside a multi-byte sequence.

/// Break patterns tried highest-priority first inside each window.
const BREAK_PATTERNS: [&str; 3] = ["\n\n", "\n", ". "];

/// Splits `text` into pages of at most `page_size` characters.
///
/// Empty input produces no pages, and pages that trim down to nothing are
/// dropped rather than emitted. The output is fully deterministic.
pub fn paginate(text: &str, page_size: usize) -> Vec<String> {
    // A zero window cannot advance; treat it as the smallest usable one.
    let page_size = page_size.max(1);

    let mut pages = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let window_end = byte_offset_after_chars(text, start, page_size);
        let cut = if window_end >= text.len() {
            text.len()
        } else {
            resolve_cut(text, start, window_end)
        };

        let page = text[start..cut].trim();
        if !page.is_empty() {
            pages.push(page.to_string());
        }

        // `cut` is strictly past `start` in every branch, so the loop is finite.
        start = cut;
    }

    pages
}

/// Maps a stored percentage onto a page index for the current pagination.
///
/// Linear interpolation over the page range, floored, so 0% is the first
/// page and 100% is exactly the last. Out-of-range percentages clamp and a
/// zero-page book resolves to 0.
pub fn resolve_page_index(page_count: usize, percentage: f64) -> usize {
    if page_count == 0 {
        return 0;
    }
    if percentage.is_nan() {
        return 0;
    }
    let pct = percentage.clamp(0.0, 100.0);
    let index = ((pct / 100.0) * (page_count - 1) as f64).floor() as usize;
    index.min(page_count - 1)
}

/// Byte offset of the position `count` characters after `start`, saturating
/// at the end of the text.
fn byte_offset_after_chars(text: &str, start: usize, count: usize) -> usize {
    match text[start..].char_indices().nth(count) {
        Some((offset, _)) => start + offset,
        None => text.len(),
    }
}

/// Picks the cut position for a full window: the end of the nearest break,
/// searched by priority tier, or the raw window edge when no tier matches.
/// The break characters stay on the left page, so a sentence cut keeps its
/// period and sheds the following space to the trim.
fn resolve_cut(text: &str, start: usize, window_end: usize) -> usize {
    let window = &text[start..window_end];
    for pattern in BREAK_PATTERNS {
        if let Some(pos) = window.rfind(pattern) {
            return start + pos + pattern.len();
        }
    }
    window_end
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_empty_input_yields_no_pages() {
        assert_eq!(paginate("", 100), Vec::<String>::new());
    }

    #[test]
    fn test_paginate_whitespace_only_yields_no_pages() {
        assert_eq!(paginate("  \n\n \n  ", 3), Vec::<String>::new());
        assert_eq!(paginate("   ", 100), Vec::<String>::new());
    }

    #[test]
    fn test_paginate_short_text_is_single_page() {
        let pages = paginate("A short story.", 1000);
        assert_eq!(pages, vec!["A short story."]);
    }

    #[test]
    fn test_paginate_exact_fit_is_single_page() {
        // 10 chars, window of 10: the window reaches the end, no break search.
        let pages = paginate("ABCDEFGHIJ", 10);
        assert_eq!(pages, vec!["ABCDEFGHIJ"]);
    }

    #[test]
    fn test_paginate_cuts_at_sentence_breaks() {
        let pages = paginate("AAAA. BBBB. CCCC.", 6);
        assert_eq!(pages, vec!["AAAA.", "BBBB.", "CCCC."]);
    }

    #[test]
    fn test_paginate_prefers_paragraph_break_over_sentence() {
        // Window of 20 sees both "\n\n" and ". " — the paragraph break wins
        // even though the sentence break is nearer the window edge.
        let text = "Alpha.\n\nBeta. Gamma and more text beyond";
        let pages = paginate(text, 20);
        assert_eq!(pages[0], "Alpha.", "cut should land at the paragraph break");
        assert!(
            pages[1].starts_with("Beta"),
            "second page should start right after the paragraph break, got {:?}",
            pages[1]
        );
    }

    #[test]
    fn test_paginate_prefers_line_break_over_sentence() {
        let text = "Alpha.\nBeta. Gamma and more text well beyond the window";
        let pages = paginate(text, 20);
        assert_eq!(pages[0], "Alpha.", "cut should land at the line break");
    }

    #[test]
    fn test_paginate_hard_cutoff_when_no_break_exists() {
        let pages = paginate("AAAAAAAAAA", 4);
        assert_eq!(pages, vec!["AAAA", "AAAA", "AA"]);
    }

    #[test]
    fn test_paginate_no_page_exceeds_page_size() {
        let text = "Lorem ipsum dolor sit amet. Consectetur adipiscing elit. \
                    Sed do eiusmod tempor.\n\nIncididunt ut labore et dolore magna aliqua. \
                    Ut enim ad minim veniam, quis nostrud.";
        for page_size in [5, 13, 40, 80] {
            for page in paginate(text, page_size) {
                assert!(
                    page.chars().count() <= page_size,
                    "page {page:?} exceeds size {page_size}"
                );
            }
        }
    }

    #[test]
    fn test_paginate_emits_no_empty_pages() {
        let text = "A.\n\n\n\n\n\nB.\n\n\n\n\n\nC.";
        for page_size in [2, 3, 5, 8] {
            for page in paginate(text, page_size) {
                assert!(!page.trim().is_empty(), "empty page at size {page_size}");
            }
        }
    }

    #[test]
    fn test_paginate_pages_preserve_text_in_order() {
        let text = "First sentence here. Second one follows.\n\nA new paragraph \
                    with several words. And a final thought to finish the sample.";
        let pages = paginate(text, 30);

        // Every page appears in the original, in order.
        let mut cursor = 0;
        for page in &pages {
            let found = text[cursor..]
                .find(page.as_str())
                .unwrap_or_else(|| panic!("page {page:?} not found in order"));
            cursor += found + page.len();
        }

        // Nothing but whitespace is lost at the boundaries.
        let rejoined: String = pages.concat().chars().filter(|c| !c.is_whitespace()).collect();
        let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(rejoined, original, "pagination dropped non-whitespace text");
    }

    #[test]
    fn test_paginate_is_deterministic() {
        let text = "Some repeated body of text. With sentences.\nAnd lines.\n\nAnd paragraphs.";
        assert_eq!(paginate(text, 24), paginate(text, 24));
    }

    #[test]
    fn test_paginate_multibyte_text_counts_chars_not_bytes() {
        // 10 chars of 2-byte codepoints; a byte-counting window would panic
        // or split inside a codepoint.
        let text = "éééééééééé";
        let pages = paginate(text, 4);
        assert_eq!(pages, vec!["éééé", "éééé", "éé"]);
    }

    #[test]
    fn test_paginate_multibyte_with_breaks() {
        let text = "Première phrase. Deuxième phrase. Troisième phrase très longue.";
        for page in paginate(text, 20) {
            assert!(page.chars().count() <= 20);
            assert!(!page.is_empty());
        }
    }

    #[test]
    fn test_paginate_zero_page_size_still_terminates() {
        // Degenerate input from a caller that skipped validation; the floor
        // of one char per window keeps the scan finite.
        let pages = paginate("ab", 0);
        assert_eq!(pages, vec!["a", "b"]);
    }

    #[test]
    fn test_paginate_break_chars_stay_on_left_page() {
        let pages = paginate("AAAA. BBBB. CCCC.", 6);
        assert!(
            pages[0].ends_with('.'),
            "period should remain on the left page, got {:?}",
            pages[0]
        );
        assert!(
            !pages[1].starts_with(' '),
            "whitespace after the cut should be trimmed, got {:?}",
            pages[1]
        );
    }

    #[test]
    fn test_resolve_page_index_midpoint() {
        // 50% of a 4-page book lands on index 1: floor(0.5 * 3).
        assert_eq!(resolve_page_index(4, 50.0), 1);
    }

    #[test]
    fn test_resolve_page_index_boundaries() {
        assert_eq!(resolve_page_index(7, 0.0), 0);
        assert_eq!(resolve_page_index(7, 100.0), 6);
        assert_eq!(resolve_page_index(1, 0.0), 0);
        assert_eq!(resolve_page_index(1, 100.0), 0);
    }

    #[test]
    fn test_resolve_page_index_clamps_out_of_range() {
        assert_eq!(resolve_page_index(5, -10.0), 0);
        assert_eq!(resolve_page_index(5, 250.0), 4);
    }

    #[test]
    fn test_resolve_page_index_empty_book() {
        assert_eq!(resolve_page_index(0, 50.0), 0);
    }

    #[test]
    fn test_resolve_page_index_is_monotonic() {
        let count = 12;
        let mut last = 0;
        for pct in 0..=100 {
            let index = resolve_page_index(count, pct as f64);
            assert!(index >= last, "index went backwards at {pct}%");
            assert!(index < count);
            last = index;
        }
    }

    #[test]
    fn test_resolve_page_index_nan_resolves_to_first_page() {
        assert_eq!(resolve_page_index(5, f64::NAN), 0);
    }

    #[test]
    fn test_resume_survives_page_size_change() {
        // A 50% position points at the same region of text whether the book
        // was paginated at 12 chars or 40 chars per page.
        let text = "One. Two. Three. Four. Five. Six. Seven. Eight. Nine. Ten. \
                    Eleven. Twelve. Thirteen. Fourteen. Fifteen. Sixteen.";
        let small = paginate(text, 12);
        let large = paginate(text, 40);

        let small_page = &small[resolve_page_index(small.len(), 50.0)];
        let large_page = &large[resolve_page_index(large.len(), 50.0)];

        let small_mid = text.find(small_page.as_str()).expect("page is in text");
        let large_mid = text.find(large_page.as_str()).expect("page is in text");
        let drift = small_mid.abs_diff(large_mid);
        assert!(
            drift < text.len() / 2,
            "50% restore should land in the same half of the text, drift {drift}"
        );
    }
}
