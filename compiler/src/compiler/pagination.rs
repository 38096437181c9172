use tracing::warn;

use crate::errors::{msg, Error, Result};

/// A page of results as the API addresses it. Page numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub size: u64,
    pub number: u64,
}

impl Page {
    /// Translate a row limit and offset into a page. Returns `None` when neither is set.
    ///
    /// The API cannot start a page mid-way, so an offset which is not a multiple of the limit
    /// lands on the page containing that row.
    pub fn from_limit_offset(limit: Option<u64>, offset: u64) -> Result<Option<Page>> {
        match limit {
            Some(size) if size > 0 => {
                if offset % size != 0 {
                    warn!(offset, size, "offset is not aligned to a page boundary");
                }
                let number = (offset / size).checked_add(1).ok_or_else(|| {
                    Error::invalid_pagination(msg::page_out_of_range(offset, size))
                })?;
                Ok(Some(Page { size, number }))
            }
            _ if offset > 0 => Err(Error::invalid_pagination(msg::offset_without_limit(
                offset,
            ))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_pages() {
        assert_eq!(
            Page::from_limit_offset(Some(10), 25),
            Ok(Some(Page { size: 10, number: 3 }))
        );
        assert_eq!(
            Page::from_limit_offset(Some(10), 0),
            Ok(Some(Page { size: 10, number: 1 }))
        );
        assert_eq!(
            Page::from_limit_offset(Some(10), 10),
            Ok(Some(Page { size: 10, number: 2 }))
        );
        assert_eq!(Page::from_limit_offset(None, 0), Ok(None));
        assert_eq!(Page::from_limit_offset(Some(0), 0), Ok(None));
    }

    #[test]
    fn test_offset_without_limit() {
        for limit in [None, Some(0)] {
            let error = Page::from_limit_offset(limit, 5).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidPagination);
        }
    }

    #[test]
    fn test_page_number_out_of_range() {
        let error = Page::from_limit_offset(Some(1), u64::MAX).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidPagination);
        assert_eq!(
            Page::from_limit_offset(Some(2), u64::MAX),
            Ok(Some(Page {
                size: 2,
                number: u64::MAX / 2 + 1
            }))
        );
    }
}
