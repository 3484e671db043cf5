use serde::Serialize;

/// Offset-paginated response envelope.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let has_more = page * limit < total;
        Self {
            items,
            total,
            page,
            limit,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_reflects_remaining_rows() {
        let page = Page::new(vec![1, 2, 3], 7, 1, 3);
        assert!(page.has_more);

        let last = Page::new(vec![7], 7, 3, 3);
        assert!(!last.has_more);
    }

    #[test]
    fn empty_result_has_no_more() {
        let page: Page<i64> = Page::new(Vec::new(), 0, 1, 20);
        assert!(!page.has_more);
        assert_eq!(page.total, 0);
    }
}
