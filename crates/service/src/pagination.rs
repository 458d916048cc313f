//! Pagination utilities for service layer
//!
//! `PageRequest` clamps caller input, `paginate` derives the page metadata returned with every
//! listing.

use serde::Serialize;

/// Largest offset or size a store can be asked for; SQL binds them as signed 64-bit.
pub const MAX_WINDOW: u64 = i64::MAX as u64;

/// Pagination parameters after clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    page: u64,
    /// items per page, at least 1
    size: u64,
}

impl PageRequest {
    /// Clamp `page` to at least 0 and `size` to at least 1.
    pub fn new(page: i64, size: i64) -> Self {
        Self { page: page.max(0).unsigned_abs(), size: size.max(1).unsigned_abs() }
    }

    pub fn page(&self) -> u64 { self.page }

    pub fn size(&self) -> u64 { self.size }

    /// Number of records preceding this page, capped at `MAX_WINDOW`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(MAX_WINDOW)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page: 0, size: 10 } }
}

/// Page metadata derived from a page request and the total number of records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Compute page metadata. `size` must be at least 1, which `PageRequest` guarantees.
pub fn paginate(page: u64, size: u64, total_elements: u64) -> PaginationInfo {
    let total_pages = total_elements.div_ceil(size.max(1));
    PaginationInfo {
        page,
        size,
        total_elements,
        total_pages,
        // page < total_pages - 1 without underflowing on an empty collection
        has_next: page.saturating_add(1) < total_pages,
        has_previous: page > 0,
    }
}

/// One page of items together with its metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_partial_page() {
        let p = paginate(0, 10, 2);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn last_page_of_three() {
        let p = paginate(2, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_next);
        assert!(p.has_previous);
    }

    #[test]
    fn empty_collection() {
        let p = paginate(0, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let p = paginate(1, 10, 25);
        assert!(p.has_next);
        assert!(p.has_previous);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(paginate(0, 5, 20).total_pages, 4);
        assert_eq!(paginate(0, 5, 21).total_pages, 5);
    }

    #[test]
    fn page_past_the_end_has_no_next() {
        let p = paginate(7, 10, 25);
        assert!(!p.has_next);
        assert!(p.has_previous);
    }

    #[test]
    fn request_clamps_out_of_range_values() {
        let r = PageRequest::new(-3, 0);
        assert_eq!(r.page(), 0);
        assert_eq!(r.size(), 1);
        assert_eq!(PageRequest::new(4, 25).offset(), 100);
    }

    #[test]
    fn offset_is_capped_at_signed_range() {
        assert_eq!(PageRequest::new(i64::MAX, i64::MAX).offset(), MAX_WINDOW);
        assert_eq!(PageRequest::new(2, i64::MAX).offset(), MAX_WINDOW);
        assert!(i64::try_from(PageRequest::new(2, i64::MAX).size()).is_ok());
    }

    #[test]
    fn default_values_are_sane() {
        let d = PageRequest::default();
        assert_eq!(d.page(), 0);
        assert_eq!(d.size(), 10);
    }
}
