//! Tweet text normalization for the `clean_text` column.

use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    retweet_marker: Regex,
    url: Regex,
    mention: Regex,
    hashtag: Regex,
    spaces: Regex,
}

fn patterns() -> &'static Patterns {
    static P: OnceLock<Patterns> = OnceLock::new();
    P.get_or_init(|| Patterns {
        retweet_marker: Regex::new(r"^RT @\w+:?\s*").unwrap(),
        url: Regex::new(r"https?://\S+").unwrap(),
        mention: Regex::new(r"@\w+").unwrap(),
        hashtag: Regex::new(r"#(\w+)").unwrap(),
        spaces: Regex::new(r"\s+").unwrap(),
    })
}

/// Strip the `RT @user:` marker, URLs, mentions and the `#` sign of hashtags,
/// then collapse whitespace.
pub fn clean_text(text: &str) -> String {
    let p = patterns();
    let s = p.retweet_marker.replace(text.trim_start(), "");
    let s = p.url.replace_all(&s, "");
    let s = p.mention.replace_all(&s, "");
    let s = p.hashtag.replace_all(&s, "$1");
    p.spaces.replace_all(&s, " ").trim().to_string()
}
