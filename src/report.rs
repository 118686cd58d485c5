use std::io::Write;

use serde::Serialize;

use crate::config::{Mode, ReportFormat};
use crate::error::TrendError;
use crate::groups::{Group, Groups};
use crate::ranking::RankKey;
use crate::video::Video;

const BANNER: &str = "========================";

#[derive(Serialize)]
struct JsonReport<'a> {
    mode: Mode,
    groups: Vec<JsonGroup<'a>>,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    key: &'a str,
    uses: usize,
    views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound_author: Option<&'a str>,
    videos: &'a [Video],
}

/// Write the ranked groups with up to `samples` videos each.
pub fn render<W: Write>(
    out: &mut W,
    ranked: &[RankKey<'_>],
    groups: &Groups,
    samples: usize,
    format: ReportFormat,
) -> Result<(), TrendError> {
    let entries = ranked
        .iter()
        .filter_map(|rank| groups.get(rank.key()).map(|group| (rank.key(), group)));

    match format {
        ReportFormat::Text => {
            match groups.mode() {
                Mode::Hashtag => writeln!(out, "trending hashtags:\n")?,
                Mode::Sound => writeln!(out, "trending sounds:\n")?,
            }
            for (key, group) in entries {
                write_text_block(out, groups.mode(), key, group, samples)?;
            }
        }
        ReportFormat::Json => {
            let report = JsonReport {
                mode: groups.mode(),
                groups: entries
                    .map(|(key, group)| json_group(groups.mode(), key, group, samples))
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_text_block<W: Write>(
    out: &mut W,
    mode: Mode,
    key: &str,
    group: &Group,
    samples: usize,
) -> Result<(), TrendError> {
    writeln!(out, "{}", BANNER)?;
    match mode {
        Mode::Hashtag => {
            writeln!(out, "#{}", key)?;
            writeln!(out, "used {} times", group.uses())?;
            writeln!(out, "{} views\n", group.total_views)?;
        }
        Mode::Sound => {
            let (name, author) = group
                .top_video()
                .map(|v| (v.sound_name.as_str(), v.sound_author.as_str()))
                .unwrap_or_default();
            writeln!(out, "{}", name)?;
            writeln!(out, "{} views", group.total_views)?;
            writeln!(out, "{}", author)?;
            writeln!(out, "music id: {}\n", key)?;
        }
    }
    for video in group.videos.iter().take(samples) {
        writeln!(out, "cover url: {}", video.cover_url)?;
        writeln!(out, "web video url: {}", video.web_url)?;
    }
    writeln!(out, "{}", BANNER)?;
    Ok(())
}

fn json_group<'a>(mode: Mode, key: &'a str, group: &'a Group, samples: usize) -> JsonGroup<'a> {
    let top = group.top_video().filter(|_| mode == Mode::Sound);
    JsonGroup {
        key,
        uses: group.uses(),
        views: group.total_views,
        sound_name: top.map(|v| v.sound_name.as_str()),
        sound_author: top.map(|v| v.sound_author.as_str()),
        videos: &group.videos[..samples.min(group.videos.len())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::select_top;

    fn video(id: &str, caption: &str, sound: &str, views: u64) -> Video {
        Video {
            id: id.to_string(),
            caption_text: caption.to_string(),
            cover_url: format!("c/{id}"),
            web_url: format!("w/{id}"),
            sound_name: format!("song {sound}"),
            sound_author: format!("artist {sound}"),
            sound_id: sound.to_string(),
            view_count: views,
        }
    }

    fn rendered(groups: &Groups, format: ReportFormat) -> String {
        let mut out = Vec::new();
        render(&mut out, &select_top(groups, 10), groups, 3, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn hashtag_block_layout() {
        let mut groups = Groups::new(Mode::Hashtag);
        groups.add(video("a", "#fun", "s", 100));
        groups.add(video("b", "#fun", "s", 300));
        let groups = groups.finish();

        assert_eq!(
            rendered(&groups, ReportFormat::Text),
            "trending hashtags:\n\n\
             ========================\n\
             #fun\n\
             used 2 times\n\
             400 views\n\n\
             cover url: c/b\n\
             web video url: w/b\n\
             cover url: c/a\n\
             web video url: w/a\n\
             ========================\n"
        );
    }

    #[test]
    fn sound_block_layout() {
        let mut groups = Groups::new(Mode::Sound);
        groups.add(video("a", "", "77", 12));
        let groups = groups.finish();

        assert_eq!(
            rendered(&groups, ReportFormat::Text),
            "trending sounds:\n\n\
             ========================\n\
             song 77\n\
             12 views\n\
             artist 77\n\
             music id: 77\n\n\
             cover url: c/a\n\
             web video url: w/a\n\
             ========================\n"
        );
    }

    #[test]
    fn at_most_three_samples_per_group() {
        let mut groups = Groups::new(Mode::Hashtag);
        for (i, views) in [5, 1, 9, 3, 7].into_iter().enumerate() {
            groups.add(video(&i.to_string(), "#x", "s", views));
        }
        let text = rendered(&groups.finish(), ReportFormat::Text);

        let covers: Vec<_> = text.lines().filter(|l| l.starts_with("cover url")).collect();
        assert_eq!(covers, ["cover url: c/2", "cover url: c/4", "cover url: c/0"]);
    }

    #[test]
    fn json_report_carries_sound_metadata() {
        let mut groups = Groups::new(Mode::Sound);
        groups.add(video("a", "", "s1", 3));
        groups.add(video("b", "", "s1", 8));
        let text = rendered(&groups.finish(), ReportFormat::Json);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["mode"], "sound");
        let group = &value["groups"][0];
        assert_eq!(group["key"], "s1");
        assert_eq!(group["uses"], 2);
        assert_eq!(group["views"], 11);
        assert_eq!(group["sound_name"], "song s1");
        assert_eq!(group["videos"][0]["id"], "b");
        assert_eq!(group["videos"][0]["views"], 8);
        assert!(group["videos"][0].get("caption_text").is_none());
    }

    #[test]
    fn empty_groups_render_only_the_header() {
        let groups = Groups::new(Mode::Hashtag).finish();
        assert_eq!(rendered(&groups, ReportFormat::Text), "trending hashtags:\n\n");
    }
}
