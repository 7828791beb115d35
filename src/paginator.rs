//! Fixed-size pagination over a slice of results.

use std::fmt;

use crate::error::{HalberdError, Result};

/// One page: a consecutive run of items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Splits a slice into pages of at most `page_size` items.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<Page<'a, T>>,
    page_size: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// Fails with `InvalidArgument` when `page_size` is zero.
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(HalberdError::invalid_argument("page size must be positive"));
        }
        let pages = items
            .chunks(page_size)
            .map(|items| Page { items })
            .collect();
        Ok(Paginator { pages, page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages. Zero for an empty slice.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<&Page<'a, T>> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page<'a, T>> {
        self.pages.iter()
    }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = std::vec::IntoIter<Page<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'p, 'a, T> IntoIterator for &'p Paginator<'a, T> {
    type Item = &'p Page<'a, T>;
    type IntoIter = std::slice::Iter<'p, Page<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl<'a, T> IntoIterator for Page<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Paginate `items` into pages of `page_size`.
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_pages_are_consecutive() {
        let items = [1, 2, 3, 4, 5];
        let pages = paginate(&items, 2).unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(pages.page(0).unwrap().items(), &[1, 2]);
        assert_eq!(pages.page(1).unwrap().items(), &[3, 4]);
        assert_eq!(pages.page(2).unwrap().items(), &[5]);
        assert!(pages.page(3).is_none());
    }

    #[test]
    fn test_empty_and_oversized_pages() {
        let empty: [i32; 0] = [];
        assert!(paginate(&empty, 3).unwrap().is_empty());

        let items = [1, 2];
        let pages = paginate(&items, 10).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages.page_size(), 10);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(paginate(&[1], 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_page_display_concatenates_items() {
        let docs = [Document::new(1, 0.5, 2), Document::new(2, 0.25, 1)];
        let pages = paginate(&docs, 2).unwrap();
        assert_eq!(
            pages.page(0).unwrap().to_string(),
            "{ document_id = 1, relevance = 0.5, rating = 2 }\
             { document_id = 2, relevance = 0.25, rating = 1 }"
        );
    }

    #[test]
    fn test_iteration() {
        let items = [1, 2, 3];
        let pages = paginate(&items, 2).unwrap();
        let sizes: Vec<usize> = (&pages).into_iter().map(Page::len).collect();
        assert_eq!(sizes, vec![2, 1]);

        let flat: Vec<i32> = pages.into_iter().flat_map(|page| page.into_iter().copied()).collect();
        assert_eq!(flat, vec![1, 2, 3]);
    }
}
