//! Dataset listing pagination.

use crate::ui::PageControls;

/// Page index of the dataset listing plus the size of the last page seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    per_page: u32,
    last_page_len: Option<usize>,
}

impl Pager {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 0,
            per_page,
            last_page_len: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Move by `step` pages, saturating at page 0.
    pub fn increment(&mut self, step: i64) {
        let next = (i64::from(self.page) + step).clamp(0, i64::from(u32::MAX));
        self.page = next as u32;
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Record how many datasets the latest page returned.
    pub fn record_page_len(&mut self, len: usize) {
        self.last_page_len = Some(len);
    }

    pub fn prev_enabled(&self) -> bool {
        self.page > 0
    }

    /// A short page is taken as the last one. Before any page has been
    /// seen, next stays enabled.
    pub fn next_enabled(&self) -> bool {
        self.last_page_len
            .map_or(true, |len| len >= self.per_page as usize)
    }

    pub fn controls(&self) -> PageControls {
        PageControls {
            counter: self.page + 1,
            prev_enabled: self.prev_enabled(),
            next_enabled: self.next_enabled(),
        }
    }
}
