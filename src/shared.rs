use std::hash::BuildHasherDefault;

use crate::groups::Group;

pub type HashMap<A, B> = std::collections::HashMap<A, B, BuildHasherDefault<rustc_hash::FxHasher>>;

pub fn new_hash_map<A, B>() -> HashMap<A, B> {
    rustc_hash::FxHashMap::default()
}

pub type GroupMap = HashMap<String, Group>;

/// Merge two partial group mappings. The left side is assumed to hold the
/// earlier lines of the input, so its videos stay in front.
pub fn merge_groups(mut left: GroupMap, right: GroupMap) -> GroupMap {
    // https://github.com/rust-lang/rfcs/pull/2593
    right.into_iter().for_each(|(key, group)| {
        let entry = left.entry(key).or_default();
        entry.total_views = entry.total_views.saturating_add(group.total_views);
        entry.videos.extend(group.videos);
    });
    left
}
