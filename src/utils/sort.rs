/// Create the indices that stably sort the given keys, by counting sort.
///
/// `num_keys` is an exclusive upper bound on the key values. Runs in
/// O(len + num_keys).
///
/// ```rust
/// use jmd::utils::get_sort_indices;
///
/// let keys = vec![2, 0, 1, 0];
/// let (indices, starts) = get_sort_indices(&keys, 3);
/// assert_eq!(indices, vec![1, 3, 2, 0]);
/// assert_eq!(starts, vec![0, 2, 3, 4]);
/// ```
///
/// The second return value holds, for each key, the offset of its first entry
/// in the sorted order, followed by the total length.
pub fn get_sort_indices(keys: &[usize], num_keys: usize) -> (Vec<usize>, Vec<usize>) {
    let mut starts = vec![0; num_keys + 1];
    for &k in keys {
        starts[k + 1] += 1;
    }
    for k in 1..=num_keys {
        starts[k] += starts[k - 1];
    }

    let mut cursor = starts.clone();
    let mut output = vec![0; keys.len()];
    for (i, &k) in keys.iter().enumerate() {
        output[cursor[k]] = i;
        cursor[k] += 1;
    }
    (output, starts)
}
