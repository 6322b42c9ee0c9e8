use std::collections::BTreeMap;

/// Tallies each distinct value.
pub fn counts<K: Ord>(values: impl IntoIterator<Item = K>) -> BTreeMap<K, usize> {
    let mut map = BTreeMap::new();
    for v in values {
        *map.entry(v).or_insert(0) += 1;
    }
    map
}

/// Most frequent value and its count. Ties go to the smallest key.
/// Returns `None` for empty input.
pub fn mode<K: Ord>(values: impl IntoIterator<Item = K>) -> Option<(K, usize)> {
    let mut best: Option<(K, usize)> = None;
    for (k, n) in counts(values) {
        match &best {
            Some((_, top)) if *top >= n => {}
            _ => best = Some((k, n)),
        }
    }
    best
}

/// Full frequency breakdown ordered by count descending, then key ascending.
pub fn distribution<K: Ord>(values: impl IntoIterator<Item = K>) -> Vec<(K, usize)> {
    let mut out: Vec<_> = counts(values).into_iter().collect();
    // stable sort keeps ascending key order among equal counts
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}
