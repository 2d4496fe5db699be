//! Page sizing and stop rules
//!
//! Pure functions of a few counters, kept apart from the fetch loop so they
//! can be tested without a server.

/// Page size used when the caller gives none and wants everything
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Smallest page size ever requested
pub const MIN_PAGE_SIZE: usize = 1;

/// Why an aggregation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Collected everything the server reports
    ReachedTotal,
    /// Collected as many records as the caller asked for
    ReachedDesired,
    /// The server returned an empty page
    EmptyPage,
}

/// Resolve the first page size from the caller's request.
///
/// `desired` is the number of records wanted (0 = all), `requested` the
/// caller's page size (0 = unset). Never asks for more than `desired`.
pub fn normalize_page_size(desired: usize, requested: usize) -> usize {
    if requested == 0 {
        if desired == 0 || desired > DEFAULT_PAGE_SIZE {
            DEFAULT_PAGE_SIZE
        } else {
            desired
        }
    } else if desired != 0 && requested > desired {
        desired
    } else {
        requested
    }
}

/// Shrink the next page so it does not overshoot what is still wanted, or
/// what the server still has.
pub fn adjust_page_size(desired: usize, total: usize, collected: usize, current: usize) -> usize {
    let mut next = current;

    if desired != 0 {
        let wanted = desired.saturating_sub(collected);
        if wanted > 0 && next > wanted {
            next = wanted;
        }
    }

    let remaining = total.saturating_sub(collected);
    if remaining > 0 && next > remaining {
        next = remaining;
    }

    next.max(MIN_PAGE_SIZE)
}

/// Decide whether the loop is done after appending a page.
///
/// Checked in priority order; the first matching reason wins.
pub fn stop_reason(
    accumulated: usize,
    total: usize,
    desired: usize,
    page_len: usize,
) -> Option<StopReason> {
    if accumulated >= total {
        Some(StopReason::ReachedTotal)
    } else if desired != 0 && accumulated >= desired {
        Some(StopReason::ReachedDesired)
    } else if page_len == 0 {
        Some(StopReason::EmptyPage)
    } else {
        None
    }
}
