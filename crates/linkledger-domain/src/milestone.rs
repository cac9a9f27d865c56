//! Milestone detection over pending queue length

/// Detect whether an ingestion crossed a progress milestone.
///
/// Milestones are the multiples of `interval` (10, 20, 30, ... for the
/// default interval). Returns `Some(current)` when at least one multiple
/// lies in the half-open range `(previous, current]`, else `None`.
///
/// One batch can cross several multiples at once (pasting 25 links into a
/// queue of 5 crosses both 10 and 20). The caller still gets exactly one
/// notification, carrying the post-append length rather than the multiple
/// that was crossed. That is the historical behavior of this system and
/// callers depend on it; do not change it to one notification per multiple.
///
/// # Examples
///
/// ```
/// use linkledger_domain::milestone_crossed;
///
/// assert_eq!(milestone_crossed(9, 10, 10), Some(10));
/// assert_eq!(milestone_crossed(5, 35, 10), Some(35));
/// assert_eq!(milestone_crossed(3, 7, 10), None);
/// ```
pub fn milestone_crossed(previous: usize, current: usize, interval: usize) -> Option<usize> {
    if interval == 0 || current <= previous {
        return None;
    }
    let crossed = (previous / interval) < (current / interval);
    crossed.then_some(current)
}
