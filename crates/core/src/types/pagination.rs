//! Page arithmetic for the catalog listing.
//!
//! Pages are 1-based; the remote catalog is addressed by `skip`/`limit`.

/// Page sizes offered by the listing view.
pub const PAGE_SIZES: [u32; 3] = [10, 20, 30];

/// Page size used when none is chosen.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Number of pages needed to show `total` items, `limit` at a time.
///
/// A zero `limit` yields zero pages rather than dividing by zero.
#[must_use]
pub fn page_count(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}

/// Offset of the first item on a 1-based `page`.
///
/// Page 0 is treated as page 1.
#[must_use]
pub fn skip_for_page(page: u32, limit: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(limit)
}
