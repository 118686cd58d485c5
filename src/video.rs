//! Video records and the per-line field extractor.
//!
//! Input lines are JSON-like objects, one per line. Rather than requiring
//! well-formed JSON, the extractor looks up each key by its quoted name and
//! reads the value that follows, so extra keys, nested objects and stray
//! punctuation elsewhere on the line do not matter.

use serde::Serialize;

use crate::error::RecordError;

const ID: &str = "id";
const TEXT: &str = "text";
const COVER_URL: &str = "coverUrl";
const WEB_URL: &str = "webVideoUrl";
const SOUND_NAME: &str = "musicName";
const SOUND_AUTHOR: &str = "musicAuthor";
const SOUND_ID: &str = "musicId";
const PLAY_COUNT: &str = "playCount";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Video {
    pub id: String,
    #[serde(skip)]
    pub caption_text: String,
    pub cover_url: String,
    pub web_url: String,
    #[serde(skip)]
    pub sound_name: String,
    #[serde(skip)]
    pub sound_author: String,
    #[serde(skip)]
    pub sound_id: String,
    #[serde(rename = "views")]
    pub view_count: u64,
}

impl Video {
    /// Extract a video from a single input line.
    ///
    /// The first occurrence of every key wins. A `null` value counts as
    /// missing.
    pub fn from_line(line: &str) -> Result<Video, RecordError> {
        Ok(Video {
            id: string_field(line, ID)?,
            caption_text: string_field(line, TEXT)?,
            cover_url: string_field(line, COVER_URL)?,
            web_url: string_field(line, WEB_URL)?,
            sound_name: string_field(line, SOUND_NAME)?,
            sound_author: string_field(line, SOUND_AUTHOR)?,
            sound_id: string_field(line, SOUND_ID)?,
            view_count: count_field(line, PLAY_COUNT)?,
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum RawValue<'a> {
    /// Quoted string, quotes included and escapes untouched.
    Quoted(&'a str),
    Bare(&'a str),
}

fn string_field(line: &str, key: &'static str) -> Result<String, RecordError> {
    match find_value(line, key)? {
        RawValue::Quoted(raw) => Ok(serde_json::from_str::<String>(raw)
            .unwrap_or_else(|_| raw[1..raw.len() - 1].to_string())),
        RawValue::Bare(token) => Ok(token.to_string()),
    }
}

fn count_field(line: &str, key: &'static str) -> Result<u64, RecordError> {
    let token = match find_value(line, key)? {
        RawValue::Quoted(raw) => &raw[1..raw.len() - 1],
        RawValue::Bare(token) => token,
    };
    token
        .trim()
        .parse::<u64>()
        .map_err(|_| RecordError::InvalidCount(token.to_string()))
}

fn find_value<'a>(line: &'a str, key: &'static str) -> Result<RawValue<'a>, RecordError> {
    let needle = format!("\"{}\"", key);
    let mut from = 0;
    while let Some(offset) = line[from..].find(&needle) {
        let after = from + offset + needle.len();
        // A quoted key only counts when a colon follows it.
        if let Some(rest) = line[after..].trim_start().strip_prefix(':') {
            return read_value(rest.trim_start(), key);
        }
        from = after;
    }
    Err(RecordError::MissingField(key))
}

fn read_value<'a>(value: &'a str, key: &'static str) -> Result<RawValue<'a>, RecordError> {
    if value.starts_with('"') {
        let mut escaped = false;
        for (i, ch) in value.char_indices().skip(1) {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => return Ok(RawValue::Quoted(&value[..=i])),
                _ => {}
            }
        }
        return Err(RecordError::Unterminated(key));
    }

    let end = value
        .find(|c: char| c == ',' || c == '}' || c == ']' || c.is_whitespace())
        .unwrap_or(value.len());
    match &value[..end] {
        "" | "null" => Err(RecordError::MissingField(key)),
        token => Ok(RawValue::Bare(token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"{"id": "6807", "text": "dance #fun #fyp", "createTime": 1588, "authorMeta": {"name": "someone"}, "musicMeta": {"musicName": "original sound", "musicAuthor": "dj", "musicOriginal": true, "musicId": "9001"}, "covers": {"default": "x"}, "coverUrl": "https://cdn/c.jpg", "webVideoUrl": "https://tt/v/6807", "playCount": 12345, "shareCount": 3}"#;

    #[test]
    fn extracts_all_fields_from_nested_line() {
        let video = Video::from_line(LINE).unwrap();
        assert_eq!(
            video,
            Video {
                id: "6807".to_string(),
                caption_text: "dance #fun #fyp".to_string(),
                cover_url: "https://cdn/c.jpg".to_string(),
                web_url: "https://tt/v/6807".to_string(),
                sound_name: "original sound".to_string(),
                sound_author: "dj".to_string(),
                sound_id: "9001".to_string(),
                view_count: 12345,
            }
        );
    }

    #[test]
    fn quoted_play_count_and_escapes() {
        let line = r#"{"id":"1","text":"say \"hi\" é #x","coverUrl":"c","webVideoUrl":"w","musicName":"n","musicAuthor":"a","musicId":"s","playCount":"42"}"#;
        let video = Video::from_line(line).unwrap();
        assert_eq!(video.caption_text, "say \"hi\" é #x");
        assert_eq!(video.view_count, 42);
    }

    #[test]
    fn missing_play_count_is_reported() {
        let line = r#"{"id": "1", "text": "", "coverUrl": "c", "webVideoUrl": "w", "musicName": "n", "musicAuthor": "a", "musicId": "s"}"#;
        assert_eq!(
            Video::from_line(line),
            Err(RecordError::MissingField(PLAY_COUNT))
        );
    }

    #[test]
    fn negative_or_garbage_play_count_is_rejected() {
        let line = r#"{"id": "1", "text": "", "coverUrl": "c", "webVideoUrl": "w", "musicName": "n", "musicAuthor": "a", "musicId": "s", "playCount": -5}"#;
        assert_eq!(
            Video::from_line(line),
            Err(RecordError::InvalidCount("-5".to_string()))
        );
    }

    #[test]
    fn key_inside_a_value_is_not_a_key() {
        let line = r#"{"text": "t", "tags": ["id"], "id": "real", "coverUrl": "c", "webVideoUrl": "w", "musicName": "n", "musicAuthor": "a", "musicId": "s", "playCount": 1}"#;
        assert_eq!(Video::from_line(line).unwrap().id, "real");
    }

    #[test]
    fn null_and_unterminated_values() {
        assert_eq!(
            read_value("null, \"x\": 1", ID),
            Err(RecordError::MissingField(ID))
        );
        assert_eq!(
            read_value("\"open ended", ID),
            Err(RecordError::Unterminated(ID))
        );
        assert_eq!(read_value("17}", ID), Ok(RawValue::Bare("17")));
    }
}
