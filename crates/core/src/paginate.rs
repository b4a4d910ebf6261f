//! Splitting wrapped lines into fixed-capacity pages.

use crate::types::{Line, Page};
use crate::{Error, Result};

/// Split `lines` into pages of at most `max_lines_per_page` lines.
///
/// When `first_page_line_offset > 0` the first page holds only
/// `max_lines_per_page - first_page_line_offset` lines (possibly none) to
/// leave room for a header. Every following page is full except possibly
/// the last.
///
/// Zero lines with no offset yields zero pages; callers that always need a
/// slide must synthesize an empty page themselves.
///
/// # Errors
///
/// Fails with [`Error::InvalidArgument`] if `max_lines_per_page` is zero.
pub fn paginate(
    lines: &[Line],
    max_lines_per_page: usize,
    first_page_line_offset: usize,
) -> Result<Vec<Page>> {
    if max_lines_per_page == 0 {
        return Err(Error::InvalidArgument(
            "max_lines_per_page must be at least 1".to_string(),
        ));
    }

    let mut pages = Vec::with_capacity(lines.len().div_ceil(max_lines_per_page) + 1);
    let mut cursor = 0;

    if first_page_line_offset > 0 {
        let first_count = max_lines_per_page
            .saturating_sub(first_page_line_offset)
            .min(lines.len());
        pages.push(Page::from_lines(lines[..first_count].to_vec()));
        cursor = first_count;
    }

    pages.extend(
        lines[cursor..]
            .chunks(max_lines_per_page)
            .map(|chunk| Page::from_lines(chunk.to_vec())),
    );

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::{wrap, MonospaceMeasurer};

    /// One line per token.
    fn lines(tokens: &str) -> Vec<Line> {
        wrap(tokens, 0.0, &MonospaceMeasurer::char_count()).unwrap()
    }

    fn page_strs(pages: &[Page]) -> Vec<Vec<&str>> {
        pages
            .iter()
            .map(|p| p.lines().iter().map(Line::as_str).collect())
            .collect()
    }

    #[test]
    fn test_paginate_five_lines_by_two() {
        let input = lines("L1 L2 L3 L4 L5");
        let pages = paginate(&input, 2, 0).unwrap();
        assert_eq!(
            page_strs(&pages),
            vec![vec!["L1", "L2"], vec!["L3", "L4"], vec!["L5"]]
        );
    }

    #[test]
    fn test_paginate_empty_without_offset() {
        let pages = paginate(&[], 9, 0).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_paginate_empty_with_offset_yields_one_empty_page() {
        let pages = paginate(&[], 9, 3).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_paginate_zero_capacity_is_invalid() {
        let err = paginate(&lines("a b"), 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_paginate_first_page_offset() {
        let input = lines("a b c d e f g");
        let pages = paginate(&input, 3, 1).unwrap();
        assert_eq!(
            page_strs(&pages),
            vec![vec!["a", "b"], vec!["c", "d", "e"], vec!["f", "g"]]
        );
    }

    #[test]
    fn test_paginate_offset_larger_than_capacity() {
        let input = lines("a b c");
        let pages = paginate(&input, 2, 5).unwrap();
        assert_eq!(page_strs(&pages), vec![vec![], vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_paginate_offset_with_fewer_lines_than_first_page() {
        let input = lines("a");
        let pages = paginate(&input, 5, 1).unwrap();
        assert_eq!(page_strs(&pages), vec![vec!["a"]]);
    }

    #[test]
    fn test_paginate_page_count_is_ceil() {
        for n in 0usize..25 {
            let text = (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
            let input = lines(&text);
            for k in 1..7 {
                let pages = paginate(&input, k, 0).unwrap();
                assert_eq!(pages.len(), n.div_ceil(k), "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn test_paginate_preserves_every_line_in_order() {
        let input = lines("a b c d e f g h i j k");
        for (k, offset) in [(1, 0), (3, 0), (4, 2), (5, 1), (11, 0), (20, 3)] {
            let pages = paginate(&input, k, offset).unwrap();
            let flat: Vec<Line> = pages.iter().flat_map(|p| p.lines().to_vec()).collect();
            assert_eq!(flat, input);
            let last = pages.len() - 1;
            for (i, page) in pages.iter().enumerate() {
                assert!(page.len() <= k);
                if i != 0 && i != last {
                    assert_eq!(page.len(), k);
                }
            }
        }
    }
}
