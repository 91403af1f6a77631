//! Page links for list views backed by paginated backend responses.

use serde::Serialize;

use crate::api::envelope::PaginatedResponse;

pub const DEFAULT_ITEMS_PER_PAGE: usize = crate::api::query::DEFAULT_PAGE_SIZE;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
        }
    }
}

impl<T> From<PaginatedResponse<T>> for Paginated<T> {
    fn from(response: PaginatedResponse<T>) -> Self {
        Self::new(response.data, response.page, response.total_pages)
    }
}

impl<T> Paginated<T> {
    /// Slices an unpaginated list, for endpoints that return everything at once.
    pub fn from_all(items: Vec<T>, current_page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = items.len().div_ceil(per_page);
        let current_page = current_page.clamp(1, total_pages.max(1));
        let items = items
            .into_iter()
            .skip((current_page - 1) * per_page)
            .take(per_page)
            .collect();
        Self::new(items, current_page, total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_show_every_page() {
        assert_eq!(
            get_pages(3, 1, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3)]
        );
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn long_lists_collapse_into_gaps() {
        let pages = get_pages(20, 10, 2, 2, 4, 2);
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(20)));
        assert!(pages.contains(&None));
        assert!(pages.contains(&Some(10)));
    }

    #[test]
    fn backend_page_becomes_current_page() {
        let response = PaginatedResponse {
            data: vec!["a", "b"],
            total: 42,
            page: 2,
            page_size: 20,
            total_pages: 3,
        };
        let paginated = Paginated::from(response);
        assert_eq!(paginated.page, 2);
        assert_eq!(paginated.items, vec!["a", "b"]);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn unpaginated_lists_are_sliced() {
        let paginated = Paginated::from_all((1..=45).collect::<Vec<_>>(), 3, 20);
        assert_eq!(paginated.items, (41..=45).collect::<Vec<_>>());
        assert_eq!(paginated.pages.len(), 3);

        let clamped = Paginated::from_all(vec![1, 2], 9, 20);
        assert_eq!(clamped.page, 1);
    }
}
