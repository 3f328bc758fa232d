//! Strips archive boilerplate from raw book text.
//!
//! Gutenberg-style banners name the book between the marker phrase and the
//! closing delimiter (`*** START OF THE PROJECT GUTENBERG EBOOK MOBY DICK ***`),
//! so the cut lands after the delimiter, not after the phrase. The end banner
//! is searched only in the text that survives the start cut, which keeps
//! header references to the end phrase from truncating the whole book.

use crate::reader::markers::MarkerSet;

/// Removes everything up to and including the start banner, and everything
/// from the end banner onward. Text without markers passes through trimmed.
pub fn clean(text: &str, markers: &MarkerSet) -> String {
    let mut remaining = text;

    if let Some((pos, phrase)) = find_first(remaining, &markers.start_markers) {
        let after_phrase = pos + phrase.len();
        // Cut after the delimiter that closes the banner line; a banner with
        // no trailing delimiter cuts right after the phrase.
        let cut = match non_empty(&markers.delimiter)
            .and_then(|d| remaining[after_phrase..].find(d).map(|i| (i, d.len())))
        {
            Some((offset, len)) => after_phrase + offset + len,
            None => after_phrase,
        };
        remaining = &remaining[cut..];
    }

    if let Some((pos, _)) = find_first(remaining, &markers.end_markers) {
        remaining = &remaining[..pos];
    }

    remaining.trim().to_string()
}

/// Earliest occurrence of any phrase, with the phrase that matched.
/// Byte positions returned by `find` are always char boundaries, so the
/// slicing in `clean` stays UTF-8 safe.
fn find_first<'a>(text: &str, phrases: &'a [String]) -> Option<(usize, &'a str)> {
    phrases
        .iter()
        .filter(|p| !p.is_empty())
        .filter_map(|p| text.find(p.as_str()).map(|pos| (pos, p.as_str())))
        .min_by_key(|(pos, _)| *pos)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn gutenberg_markers() -> MarkerSet {
        MarkerSet::default()
    }

    #[test]
    fn test_clean_strips_both_banners() {
        let raw = "noise *** START OF THE PROJECT GUTENBERG EBOOK *** Hello world. \
                   *** END OF THE PROJECT GUTENBERG EBOOK ***more noise";
        assert_eq!(clean(raw, &gutenberg_markers()), "Hello world.");
    }

    #[test]
    fn test_clean_skips_title_inside_banner() {
        let raw = "license text\n*** START OF THE PROJECT GUTENBERG EBOOK MOBY DICK ***\n\
                   Call me Ishmael.\n*** END OF THE PROJECT GUTENBERG EBOOK MOBY DICK ***\nlicense";
        assert_eq!(clean(raw, &gutenberg_markers()), "Call me Ishmael.");
    }

    #[test]
    fn test_clean_without_markers_passes_through_trimmed() {
        let raw = "  \n Just a plain manuscript. \n ";
        assert_eq!(
            clean(raw, &gutenberg_markers()),
            "Just a plain manuscript."
        );
    }

    #[test]
    fn test_clean_start_marker_only() {
        let raw = "junk *** START OF THE PROJECT GUTENBERG EBOOK X *** body text";
        assert_eq!(clean(raw, &gutenberg_markers()), "body text");
    }

    #[test]
    fn test_clean_end_marker_only() {
        let raw = "body text *** END OF THE PROJECT GUTENBERG EBOOK X *** junk";
        assert_eq!(clean(raw, &gutenberg_markers()), "body text");
    }

    #[test]
    fn test_clean_banner_without_closing_delimiter_cuts_after_phrase() {
        let markers = MarkerSet {
            start_markers: vec!["BEGIN:".to_string()],
            end_markers: vec!["FINIS".to_string()],
            delimiter: "~~~".to_string(),
        };
        // No "~~~" anywhere after the phrase: fall back to cutting after it.
        assert_eq!(clean("header BEGIN: the story FINIS tail", &markers), "the story");
    }

    #[test]
    fn test_clean_earliest_start_phrase_wins() {
        let markers = MarkerSet {
            start_markers: vec!["SECOND".to_string(), "FIRST".to_string()],
            end_markers: vec![],
            delimiter: "@@".to_string(),
        };
        // "FIRST" appears earlier in the text even though it is listed second.
        assert_eq!(
            clean("x FIRST @@ kept SECOND @@ also kept", &markers),
            "kept SECOND @@ also kept"
        );
    }

    #[test]
    fn test_clean_end_search_runs_on_remainder_only() {
        let markers = gutenberg_markers();
        // An end-phrase mention before the start banner must not truncate the body.
        let raw = "see *** END OF THE PROJECT GUTENBERG EBOOK *** notice above \
                   *** START OF THE PROJECT GUTENBERG EBOOK *** the real body";
        assert_eq!(clean(raw, &markers), "the real body");
    }

    #[test]
    fn test_clean_empty_input() {
        assert_eq!(clean("", &gutenberg_markers()), "");
    }

    #[test]
    fn test_clean_is_deterministic() {
        let raw = "a *** START OF THE PROJECT GUTENBERG EBOOK *** b \
                   *** END OF THE PROJECT GUTENBERG EBOOK *** c";
        let markers = gutenberg_markers();
        assert_eq!(clean(raw, &markers), clean(raw, &markers));
    }

    #[test]
    fn test_clean_multibyte_text_around_banners() {
        let raw = "préface *** START OF THE PROJECT GUTENBERG EBOOK ÉMILE *** \
                   Être ou ne pas être. *** END OF THE PROJECT GUTENBERG EBOOK ***";
        assert_eq!(clean(raw, &gutenberg_markers()), "Être ou ne pas être.");
    }
}
