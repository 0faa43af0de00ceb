use serde::Serialize;

/// Offset/limit window into a result set of `total` items.
///
/// Every operation returns a new cursor; callers consult [`has_next`] and
/// [`has_previous`] before moving, the operations themselves only do the
/// arithmetic.
///
/// [`has_next`]: Self::has_next
/// [`has_previous`]: Self::has_previous
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

impl PageCursor {
    /// Cursor over a result set whose size is not yet known.
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            total: 0,
        }
    }

    /// Moves one window forward.
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            ..self
        }
    }

    /// Moves one window back, stopping at the first page.
    #[must_use]
    pub fn retreat(self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self
        }
    }

    /// Jumps straight to the given zero-based page index.
    #[must_use]
    pub fn jump_to(self, page_index: usize) -> Self {
        Self {
            offset: page_index * self.limit,
            ..self
        }
    }

    /// Records the total reported by a response. If the result set no
    /// longer spans more than one page while the cursor points past the
    /// first, the offset snaps back to zero.
    #[must_use]
    pub fn reconcile(self, total: usize) -> Self {
        let mut cursor = Self { total, ..self };
        if cursor.total_pages() <= 1 && cursor.offset != 0 {
            cursor.offset = 0;
        }
        cursor
    }

    /// One-based page number of the current window.
    pub fn current_page(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.limit < self.total
    }
}

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

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, cursor: &PageCursor) -> Self {
        let pages = get_pages(cursor.total_pages(), cursor.current_page(), 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: cursor.current_page(),
        }
    }
}
