use super::allocation::AllocationTracker;
use super::entry::CacheEntry;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Keys and approximate bytes removed by one sweep.
#[derive(Debug)]
pub(crate) struct Swept<K> {
    pub keys: Vec<K>,
    pub bytes: usize,
}

/// Remove every entry matching `doomed`, releasing each through
/// [`CacheEntry::free`].
pub(crate) fn remove_where<K, F>(
    map: &mut FxHashMap<K, CacheEntry>,
    tracker: &mut AllocationTracker,
    mut doomed: F,
) -> Swept<K>
where
    K: Eq + Hash + Clone,
    F: FnMut(&K, &CacheEntry) -> bool,
{
    let keys: Vec<K> = map
        .iter()
        .filter(|&(key, entry)| doomed(key, entry))
        .map(|(key, _)| key.clone())
        .collect();

    let mut bytes = 0usize;
    for key in &keys {
        let entry = map.remove(key);
        bytes = bytes.saturating_add(entry.as_ref().map_or(0, AllocationTracker::size_of));
        CacheEntry::free(entry, tracker);
    }

    Swept { keys, bytes }
}

/// Release every entry and replace `map` with a fresh one.
pub(crate) fn free_all<K>(map: &mut FxHashMap<K, CacheEntry>, tracker: &mut AllocationTracker) -> usize {
    let old = std::mem::take(map);
    let count = old.len();
    for (_, entry) in old {
        CacheEntry::free(Some(entry), tracker);
    }
    count
}
