use crate::model::{ResourceId, WorkSlice};

/// Splits the full ID list into contiguous, near-equal slices
///
/// Produces at most `n` slices whose in-order concatenation reproduces
/// `ids` exactly. The remainder of the integer division is distributed
/// one element at a time to the leading slices, so sizes differ by at
/// most one. Fewer than `n` slices come back when there are fewer IDs
/// than workers; no slice is ever empty.
///
/// # Arguments
///
/// * `ids` - The full system ID list, in fetch order
/// * `n` - Number of workers to partition across (must be >= 1)
pub fn partition(ids: &[ResourceId], n: usize) -> Vec<WorkSlice> {
    let n = n.max(1);

    if ids.is_empty() {
        return Vec::new();
    }

    let slice_count = n.min(ids.len());
    let base = ids.len() / slice_count;
    let remainder = ids.len() % slice_count;

    let mut slices = Vec::with_capacity(slice_count);
    let mut start = 0;
    for i in 0..slice_count {
        let len = if i < remainder { base + 1 } else { base };
        slices.push(WorkSlice::new(ids[start..start + len].to_vec()));
        start += len;
    }

    slices
}
