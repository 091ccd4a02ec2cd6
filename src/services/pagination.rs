#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Derives page counts for `total` matches and clamps `requested_page`
    /// into `1..=max(1, total_pages)`.
    pub fn compute(requested_page: i64, page_size: i64, total: i64) -> Self {
        let page_size = page_size.max(1);
        let total = total.max(0);
        let total_pages = if total == 0 {
            0
        } else {
            (total - 1) / page_size + 1
        };
        let page = requested_page.clamp(1, total_pages.max(1));

        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// True when the requested page lay beyond the last page that has rows.
    pub fn was_clamped_from(&self, requested_page: i64) -> bool {
        self.total > 0 && self.page != requested_page
    }
}
