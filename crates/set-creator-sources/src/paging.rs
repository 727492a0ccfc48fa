/// Page arithmetic for lists that report a total count and serve a fixed
/// number of items per page
///
/// Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    total: usize,
    page_size: usize,
}

impl Paging {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// ceil(total / page_size)
    pub fn pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Items on the final page; a full page when total divides evenly
    pub fn remainder(&self) -> usize {
        match self.total % self.page_size {
            0 => self.page_size,
            r => r,
        }
    }

    pub fn is_last(&self, page: usize) -> bool {
        page == self.pages()
    }

    pub fn page_len(&self, page: usize) -> usize {
        if self.is_last(page) {
            self.remainder()
        } else {
            self.page_size
        }
    }

    /// 1-based index of the first item on `page`
    pub fn start(&self, page: usize) -> usize {
        (page.saturating_sub(1)) * self.page_size + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> {
        1..=self.pages()
    }
}
