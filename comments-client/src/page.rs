use std::{num::NonZeroUsize, ops::RangeInclusive};

/// Page sizes the dashboards offer
pub const PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(s) => s,
    None => unreachable!(),
};

#[derive(Debug, Eq, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],

    /// 1-based
    pub number: usize,
    pub size: NonZeroUsize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// 1-based positions of the first and last item of this page, for
    /// "showing X-Y of Z" displays
    pub fn showing(&self) -> Option<RangeInclusive<usize>> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.number - 1) * self.size.get() + 1;
        Some(first..=first + self.items.len() - 1)
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_mul(self.size.get()) < self.total_items
    }
}

/// Window `view` into pages of `size` items and return page `number`
///
/// Page numbers start at 1, 0 is read as 1. Pages past the end are empty.
pub fn paginate<T>(view: &[T], size: NonZeroUsize, number: usize) -> Page<'_, T> {
    let number = number.max(1);
    let start = (number - 1).saturating_mul(size.get()).min(view.len());
    let end = start.saturating_add(size.get()).min(view.len());
    Page {
        items: &view[start..end],
        number,
        size,
        total_items: view.len(),
        total_pages: (view.len() + size.get() - 1) / size.get(),
    }
}
