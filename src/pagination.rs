//! Fixed-size, 1-indexed page slicing over an ordered sequence.

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator { page_size: DEFAULT_PAGE_SIZE }
    }
}

impl Paginator {
    /// Page size of zero is bumped to one.
    pub fn new(page_size: usize) -> Self {
        Paginator { page_size: page_size.max(1) }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items `[(page-1)*size, page*size)`, clamped to the sequence. Pages below 1 are empty.
    pub fn slice<'a, T>(&self, items: &'a [T], page: i64) -> &'a [T] {
        if page < 1 {
            return &[];
        }
        let start = ((page - 1) as usize).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Parse the `page` query value leniently: absent or non-integer means page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nineteen_items_over_three_pages() {
        let items: Vec<u32> = (1..=19).collect();
        let p = Paginator::default();
        assert_eq!(p.slice(&items, 1), &items[0..10]);
        assert_eq!(p.slice(&items, 2), &items[10..19]);
        assert!(p.slice(&items, 3).is_empty());
    }

    #[test]
    fn page_below_one_is_empty() {
        let items = [1, 2, 3];
        let p = Paginator::default();
        assert!(p.slice(&items, 0).is_empty());
        assert!(p.slice(&items, -4).is_empty());
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(Paginator::new(10).slice(&items, i64::MAX).is_empty());
    }

    #[test]
    fn custom_page_size() {
        let items: Vec<u32> = (0..7).collect();
        let p = Paginator::new(3);
        assert_eq!(p.slice(&items, 3), &[6]);
        assert_eq!(Paginator::new(0).page_size(), 1);
    }

    #[test]
    fn lenient_page_parsing() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("4")), 4);
        assert_eq!(parse_page(Some("-2")), -2);
    }
}
