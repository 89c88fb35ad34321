// Fixed-stride paging over the result list

/// Rows per page
pub const PAGE_SIZE: usize = 20;

/// How many numbered page buttons exist (1..=5)
pub const NUMBERED_PAGES: usize = 5;

/// Half-open index range `[start, end)` of the rendered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Window for 1-based page `page`
    pub const fn page(page: usize) -> Self {
        let start = page.saturating_sub(1) * PAGE_SIZE;
        Self::new(start, start + PAGE_SIZE)
    }

    pub const fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::page(1)
    }
}

/// Owns the current window and the Prev / 1-5 / Next navigation
///
/// Windows past the end of the list are allowed; `visible` just yields a
/// short or empty tail for them.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    window: PageWindow,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Replace the window as-is
    pub fn set_window(&mut self, start: usize, end: usize) {
        self.window = PageWindow::new(start, end);
    }

    /// Step back one page; no-op when already at the first page
    pub fn prev(&mut self) -> bool {
        if self.window.end <= PAGE_SIZE {
            return false;
        }
        self.set_window(
            self.window.start.saturating_sub(PAGE_SIZE),
            self.window.end - PAGE_SIZE,
        );
        true
    }

    /// Step forward one page; no-op if the next window would end past `total`
    pub fn next(&mut self, total: usize) -> bool {
        if self.window.end + PAGE_SIZE > total {
            return false;
        }
        self.set_window(self.window.start + PAGE_SIZE, self.window.end + PAGE_SIZE);
        true
    }

    /// Numbered button: jump straight to page 1..=5
    pub fn jump_to(&mut self, page: usize) -> bool {
        if !(1..=NUMBERED_PAGES).contains(&page) {
            return false;
        }
        self.window = PageWindow::page(page);
        true
    }

    /// 1-based page the window starts on
    pub fn current_page(&self) -> usize {
        self.window.start / PAGE_SIZE + 1
    }

    /// The rows inside the window, truncated to what exists
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.window.end.min(items.len());
        let start = self.window.start.min(end);
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_starts_on_first_page() {
        let pager = Paginator::new();
        assert_eq!(pager.window(), PageWindow::new(0, 20));
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn test_prev_on_first_page_is_noop() {
        let mut pager = Paginator::new();
        assert!(!pager.prev());
        assert_eq!(pager.window(), PageWindow::new(0, 20));
    }

    #[test]
    fn test_next_and_prev_keep_stride() {
        let mut pager = Paginator::new();
        let total = 100;

        while pager.next(total) {
            assert_eq!(pager.window().width(), PAGE_SIZE);
        }
        assert_eq!(pager.window(), PageWindow::new(80, 100));

        while pager.prev() {
            assert_eq!(pager.window().width(), PAGE_SIZE);
        }
        assert_eq!(pager.window(), PageWindow::new(0, 20));
    }

    #[test]
    fn test_next_guard_uses_total() {
        let mut pager = Paginator::new();
        assert!(!pager.next(39));
        assert!(pager.next(40));
        assert_eq!(pager.window(), PageWindow::new(20, 40));
    }

    #[test]
    fn test_jump_is_idempotent() {
        let mut pager = Paginator::new();
        pager.jump_to(3);
        assert!(pager.jump_to(1));
        assert!(pager.jump_to(1));
        assert_eq!(pager.window(), PageWindow::new(0, 20));
    }

    #[test]
    fn test_numbered_pages() {
        let mut pager = Paginator::new();
        for page in 1..=NUMBERED_PAGES {
            assert!(pager.jump_to(page));
            assert_eq!(pager.window(), PageWindow::new((page - 1) * 20, page * 20));
            assert_eq!(pager.current_page(), page);
        }
        assert!(!pager.jump_to(0));
        assert!(!pager.jump_to(6));
        assert_eq!(pager.window(), PageWindow::new(80, 100));
    }

    #[test]
    fn test_last_page_short_tail() {
        let items = rows(85);
        let mut pager = Paginator::new();
        pager.jump_to(5);

        assert_eq!(pager.visible(&items), &items[80..85]);
        assert!(!pager.next(items.len()));
        assert_eq!(pager.window(), PageWindow::new(80, 100));
    }

    #[test]
    fn test_window_past_end_renders_empty() {
        let items = rows(10);
        let mut pager = Paginator::new();
        pager.jump_to(4);
        assert!(pager.visible(&items).is_empty());
    }

    #[test]
    fn test_set_window_unchecked() {
        let items = rows(50);
        let mut pager = Paginator::new();
        pager.set_window(45, 30);
        assert!(pager.visible(&items).is_empty());

        pager.set_window(5, 8);
        assert_eq!(pager.visible(&items), &[5, 6, 7]);
    }
}
