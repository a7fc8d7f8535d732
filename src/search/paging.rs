//! Page-number to offset/limit conversion.

use crate::error::{HearthError, Result};

/// A backend paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of documents to skip.
    pub offset: u64,
    /// Number of documents to return.
    pub limit: u64,
}

/// Convert a 1-based page number and page size into a paging window.
///
/// Pages 0 and 1 both mean the first page; page n ≥ 2 skips
/// (n − 1) × `page_size` documents. A negative page or a non-positive
/// page size is a caller error, never clamped.
pub fn window(page: i64, page_size: i64) -> Result<PageWindow> {
    if page_size <= 0 {
        return Err(HearthError::caller_input(format!(
            "page size must be positive, got {page_size}"
        )));
    }
    if page < 0 {
        return Err(HearthError::caller_input(format!(
            "page must not be negative, got {page}"
        )));
    }

    let offset = if page <= 1 {
        0
    } else {
        (page as u64 - 1)
            .checked_mul(page_size as u64)
            .ok_or_else(|| {
                HearthError::caller_input(format!(
                    "page window overflows: page {page} with page size {page_size}"
                ))
            })?
    };

    Ok(PageWindow {
        offset,
        limit: page_size as u64,
    })
}
