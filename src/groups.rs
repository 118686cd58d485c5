//! Accumulation of videos into hashtag or sound groups.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::Mode;
use crate::error::TrendError;
use crate::hashtag::HashtagScanner;
use crate::shared::{merge_groups, new_hash_map, GroupMap};
use crate::video::Video;

/// All videos seen for one hashtag or sound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Sorted by view count, highest first, once the groups are finished.
    pub videos: Vec<Video>,
    pub total_views: u64,
}

impl Group {
    pub fn push(&mut self, video: Video) {
        self.total_views = self.total_views.saturating_add(video.view_count);
        self.videos.push(video);
    }

    /// Number of times the group was used, duplicates included.
    pub fn uses(&self) -> usize {
        self.videos.len()
    }

    /// The most-viewed video. Only meaningful after [`Groups::finish`].
    pub fn top_video(&self) -> Option<&Video> {
        self.videos.first()
    }
}

#[derive(Debug, Clone)]
pub struct Groups {
    mode: Mode,
    scanner: HashtagScanner,
    map: GroupMap,
}

impl Groups {
    pub fn new(mode: Mode) -> Self {
        Groups {
            mode,
            scanner: HashtagScanner::new(),
            map: new_hash_map(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Add a video to every group it belongs to. In hashtag mode a caption
    /// without tags adds nothing, and a repeated tag adds the video twice.
    pub fn add(&mut self, video: Video) {
        match self.mode {
            Mode::Sound => {
                let key = video.sound_id.clone();
                self.map.entry(key).or_default().push(video);
            }
            Mode::Hashtag => {
                for tag in self.scanner.scan(&video.caption_text) {
                    self.map.entry(tag.to_string()).or_default().push(video.clone());
                }
            }
        }
    }

    /// Append another partial result, which must cover later input lines.
    pub fn merge(mut self, other: Groups) -> Groups {
        self.map = merge_groups(self.map, other.map);
        self
    }

    /// Order each group's videos by view count, highest first. Ties keep
    /// input order.
    pub fn finish(mut self) -> Groups {
        self.map
            .values_mut()
            .for_each(|group| group.videos.sort_by(|a, b| b.view_count.cmp(&a.view_count)));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Group> {
        self.map.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.map.iter().map(|(key, group)| (key.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Counters for one pass over the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub lines: usize,
    pub records: usize,
    pub skipped: usize,
}

impl LineStats {
    fn add(self, other: LineStats) -> LineStats {
        LineStats {
            lines: self.lines + other.lines,
            records: self.records + other.records,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// Parse one numbered line into `groups`, skipping blanks and malformed
/// records.
fn fold_line(
    mut groups: Groups,
    mut stats: LineStats,
    number: usize,
    line: &str,
) -> (Groups, LineStats) {
    stats.lines += 1;
    if line.trim().is_empty() {
        debug!(line = number, "skipping blank line");
        return (groups, stats);
    }
    match Video::from_line(line) {
        Ok(video) => {
            groups.add(video);
            stats.records += 1;
        }
        Err(source) => {
            let err = TrendError::MalformedRecord {
                line: number,
                source,
            };
            warn!("{err}, skipping");
            stats.skipped += 1;
        }
    }
    (groups, stats)
}

/// Group lines in file order. Line numbers start at 1.
pub fn accumulate<I, S>(lines: I, mode: Mode) -> (Groups, LineStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (groups, stats) = lines.into_iter().enumerate().fold(
        (Groups::new(mode), LineStats::default()),
        |(groups, stats), (i, line)| fold_line(groups, stats, i + 1, line.as_ref()),
    );
    (groups.finish(), stats)
}

/// Same result as [`accumulate`], with lines split across the rayon pool and
/// the partial groups merged in input order.
pub fn accumulate_parallel<S>(lines: &[S], mode: Mode) -> (Groups, LineStats)
where
    S: AsRef<str> + Sync,
{
    let (groups, stats) = lines
        .par_iter()
        .enumerate()
        .fold(
            || (Groups::new(mode), LineStats::default()),
            |(groups, stats), (i, line)| fold_line(groups, stats, i + 1, line.as_ref()),
        )
        .reduce(
            || (Groups::new(mode), LineStats::default()),
            |(left, left_stats), (right, right_stats)| {
                (left.merge(right), left_stats.add(right_stats))
            },
        );
    (groups.finish(), stats)
}
