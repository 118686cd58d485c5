//! Top-K selection of groups.
//!
//! Hashtags rank by use count, then total views, both descending, and
//! finally by the key in ascending byte order. Sounds rank by total views
//! descending, then key ascending. Keys are unique, so both orders are
//! total and the selection is deterministic.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::config::Mode;
use crate::groups::{Group, Groups};

/// Ranking-relevant aggregate of one group. `Ord` sorts the best group
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey<'a> {
    Hashtag { uses: usize, views: u64, key: &'a str },
    Sound { views: u64, key: &'a str },
}

impl<'a> RankKey<'a> {
    pub fn new(mode: Mode, key: &'a str, group: &Group) -> Self {
        match mode {
            Mode::Hashtag => RankKey::Hashtag {
                uses: group.uses(),
                views: group.total_views,
                key,
            },
            Mode::Sound => RankKey::Sound {
                views: group.total_views,
                key,
            },
        }
    }

    pub fn key(&self) -> &'a str {
        match *self {
            RankKey::Hashtag { key, .. } | RankKey::Sound { key, .. } => key,
        }
    }
}

impl Ord for RankKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                RankKey::Hashtag { uses, views, key },
                RankKey::Hashtag {
                    uses: other_uses,
                    views: other_views,
                    key: other_key,
                },
            ) => other_uses
                .cmp(uses)
                .then_with(|| other_views.cmp(views))
                .then_with(|| key.cmp(other_key)),
            (
                RankKey::Sound { views, key },
                RankKey::Sound {
                    views: other_views,
                    key: other_key,
                },
            ) => other_views.cmp(views).then_with(|| key.cmp(other_key)),
            // Never mixed within one run; keep the order total anyway.
            (RankKey::Hashtag { .. }, RankKey::Sound { .. }) => Ordering::Less,
            (RankKey::Sound { .. }, RankKey::Hashtag { .. }) => Ordering::Greater,
        }
    }
}

impl PartialOrd for RankKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `k` best groups, best first.
pub fn select_top(groups: &Groups, k: usize) -> Vec<RankKey<'_>> {
    let mode = groups.mode();
    groups
        .iter()
        .map(|(key, group)| RankKey::new(mode, key, group))
        .k_smallest(k)
        .collect()
}
