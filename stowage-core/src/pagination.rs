//! Page strip generation for paginated lists.

use std::fmt;

/// One slot of a pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Pages to render for `current_page` out of `total_pages`.
///
/// Up to seven pages are listed in full. Longer ranges always keep the first and
/// last page and collapse each gap into a single [`PageItem::Ellipsis`].
pub fn pagination_pages(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total_pages <= 7 {
        return (1..=total_pages).map(Page).collect();
    }
    if current_page <= 3 {
        return vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total_pages)];
    }
    if current_page >= total_pages - 2 {
        return vec![
            Page(1),
            Ellipsis,
            Page(total_pages - 3),
            Page(total_pages - 2),
            Page(total_pages - 1),
            Page(total_pages),
        ];
    }
    vec![
        Page(1),
        Ellipsis,
        Page(current_page - 1),
        Page(current_page),
        Page(current_page + 1),
        Ellipsis,
        Page(total_pages),
    ]
}

/// Number of pages needed for `total_count` rows; never less than one.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_count.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    #[test]
    fn test_small_totals_list_every_page() {
        assert_eq!(pagination_pages(1, 0), vec![]);
        assert_eq!(pagination_pages(1, 1), vec![Page(1)]);
        assert_eq!(
            pagination_pages(4, 7),
            (1..=7).map(Page).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_ten_pages() {
        assert_eq!(
            pagination_pages(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            pagination_pages(10, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            pagination_pages(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_boundaries_between_shapes() {
        assert_eq!(pagination_pages(3, 8).len(), 6);
        assert_eq!(
            pagination_pages(6, 8),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Page(8)]
        );
        assert_eq!(
            pagination_pages(4, 8),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(8)]
        );
        assert_eq!(
            pagination_pages(4, 9),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(9)]
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn test_page_item_display() {
        let strip: Vec<String> = pagination_pages(5, 10).iter().map(ToString::to_string).collect();
        assert_eq!(strip.join(" "), "1 … 4 5 6 … 10");
    }
}
