use regex::Regex;

/// Finds `#tag` tokens in caption text.
///
/// A tag is `#` followed by word characters: ASCII letters, digits and `_`,
/// plus everything outside Basic Latin. Tags come out in order of
/// occurrence, without the `#` and without dedup.
#[derive(Debug, Clone)]
pub struct HashtagScanner {
    pattern: Regex,
}

impl HashtagScanner {
    pub fn new() -> Self {
        let pattern = Regex::new(r"#([0-9A-Za-z_\x{0080}-\x{10FFFF}]+)").expect("Illegal regex");
        HashtagScanner { pattern }
    }

    pub fn scan<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.pattern
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|tag| tag.as_str())
    }
}

impl Default for HashtagScanner {
    fn default() -> Self {
        HashtagScanner::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<String> {
        HashtagScanner::new()
            .scan(text)
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(tags("#fun and #fyp then #fun"), ["fun", "fyp", "fun"]);
    }

    #[test]
    fn stops_at_ascii_punctuation() {
        assert_eq!(tags("#dance,#go! #a-b #snake_case."), ["dance", "go", "a", "snake_case"]);
    }

    #[test]
    fn accepts_non_ascii_word_characters() {
        assert_eq!(tags("#café #日本 #🔥fire"), ["café", "日本", "🔥fire"]);
    }

    #[test]
    fn latin1_supplement_characters_stay_inside_the_tag() {
        assert_eq!(
            tags("#µ #caf\u{00A0}x #ºC #a¿b #end«"),
            ["µ", "caf\u{a0}x", "ºC", "a¿b", "end«"]
        );
    }

    #[test]
    fn lone_marker_is_not_a_tag() {
        assert!(tags("# nothing here #").is_empty());
        assert_eq!(tags("##double"), ["double"]);
    }
}
