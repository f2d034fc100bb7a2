use hyperstore_domain::ListLimit;

/// Window parameters of one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based index of the first record.
    pub offset: usize,
    /// Records to keep; the server may return one more.
    pub limit: usize,
}

impl PageRequest {
    /// `offset` query value, omitted for the first page.
    pub fn offset_param(&self) -> Option<String> {
        (self.offset > 0).then(|| self.offset.to_string())
    }
}

/// Pagination state: where the next page starts and whether it exists
#[derive(Debug, Clone)]
pub struct PageCursor {
    limit: ListLimit,
    offset: usize,
    done: bool,
}

impl PageCursor {
    pub fn new(limit: ListLimit) -> Self {
        Self { limit, offset: 0, done: false }
    }

    /// Parameters of the next request, or `None` once the last page was seen.
    pub fn next_request(&self) -> Option<PageRequest> {
        (!self.done).then_some(PageRequest { offset: self.offset, limit: self.limit.get() })
    }

    /// Consume a fetched page and return the records to keep.
    ///
    /// More than `limit` records means another page follows: the page is cut
    /// to `limit` and the offset advances by `limit`. Anything else is the
    /// final page and is kept whole.
    pub fn advance<T>(&mut self, mut page: Vec<T>) -> Vec<T> {
        if self.done {
            return Vec::new();
        }

        let limit = self.limit.get();
        if page.len() > limit {
            page.truncate(limit);
            self.offset += limit;
        } else {
            self.done = true;
        }
        page
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(limit: i64) -> PageCursor {
        PageCursor::new(ListLimit::new(limit).unwrap())
    }

    #[test]
    fn first_request_starts_at_zero_without_offset_param() {
        let cursor = cursor(100);
        let request = cursor.next_request().unwrap();

        assert_eq!(request, PageRequest { offset: 0, limit: 100 });
        assert_eq!(request.offset_param(), None);
    }

    #[test]
    fn full_page_plus_sentinel_advances() {
        let mut cursor = cursor(3);

        let kept = cursor.advance(vec![1, 2, 3, 4]);

        assert_eq!(kept, vec![1, 2, 3]);
        assert!(!cursor.is_done());
        assert_eq!(cursor.next_request().unwrap().offset_param(), Some("3".to_string()));
    }

    #[test]
    fn exactly_limit_records_is_final() {
        let mut cursor = cursor(3);

        assert_eq!(cursor.advance(vec![1, 2, 3]), vec![1, 2, 3]);
        assert!(cursor.is_done());
        assert_eq!(cursor.next_request(), None);
    }

    #[test]
    fn empty_page_terminates_without_records() {
        let mut cursor = cursor(3);
        cursor.advance(vec![1, 2, 3, 4]);

        let kept: Vec<i32> = cursor.advance(Vec::new());

        assert!(kept.is_empty());
        assert!(cursor.is_done());
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn repeated_sentinel_pages_never_terminate_early() {
        let mut cursor = cursor(2);

        for page in 0..50 {
            assert_eq!(cursor.next_request().unwrap().offset, page * 2);
            cursor.advance(vec![0; 3]);
            assert!(!cursor.is_done());
        }
    }

    #[test]
    fn advance_after_done_keeps_nothing() {
        let mut cursor = cursor(2);
        cursor.advance(vec![1]);

        assert!(cursor.advance(vec![7, 8, 9]).is_empty());
        assert!(cursor.is_done());
    }
}
