use serde::{Deserialize, Serialize};

/// Pagination envelope shared by session and message listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Slices one page out of the full (already sorted) item list.
    pub fn slice(mut items: Vec<T>, page: usize, limit: usize) -> Self {
        let total = items.len();
        let page = page.max(1);
        let start = (page - 1).saturating_mul(limit).min(total);
        let end = start.saturating_add(limit).min(total);
        let items = items.drain(start..end).collect();
        Self {
            items,
            total,
            page,
            limit,
            has_more: page * limit < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_last_page() {
        let page = Page::slice((0..15).collect::<Vec<_>>(), 2, 10);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 15);
        assert!(!page.has_more);
    }

    #[test]
    fn test_full_page_with_more() {
        let page = Page::slice((0..25).collect::<Vec<_>>(), 2, 10);
        assert_eq!(page.items.len(), 10);
        assert!(page.has_more);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = Page::slice(vec![1, 2, 3], 5, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert!(!page.has_more);
    }
}
