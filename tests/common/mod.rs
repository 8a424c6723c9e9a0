#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write NDJSON lines to `path` (creating parent directories).
pub fn write_lines(path: &Path, lines: &[Value]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for l in lines {
        writeln!(&mut f, "{}", l).unwrap();
    }
}

/// Write a compressed `.zst` file containing the provided records.
pub fn write_zst_lines(path: &Path, lines: &[Value]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// A plain (non-repost) tweet with every always-present field.
pub fn plain_tweet(text: &str, favorite_count: i64) -> Value {
    json!({
        "created_at": "t1",
        "source": "web",
        "text": text,
        "favorite_count": favorite_count,
        "retweet_count": 0,
        "user": {"statuses_count": 5, "screen_name": "a", "followers_count": 10, "friends_count": 3},
        "entities": {"hashtags": [], "user_mentions": []}
    })
}

/// A repost whose original carries an extended text and its own counters.
pub fn repost_tweet() -> Value {
    json!({
        "created_at": "t2",
        "source": "<a href=\"http://twitter.com/download/android\">Twitter for Android</a>",
        "text": "RT @orig: full orig…",
        "favorite_count": 0,
        "retweet_count": 0,
        "lang": "en",
        "possibly_sensitive": false,
        "place": {"full_name": "Lagos, Nigeria", "bounding_box": {"coordinates": [[[3.1, 6.4], [3.6, 6.7]]]}},
        "retweeted_status": {
            "text": "full orig…",
            "extended_tweet": {"full_text": "full original"},
            "favorite_count": 100,
            "retweet_count": 50
        },
        "user": {"statuses_count": 900, "screen_name": "b", "followers_count": 42,
                 "friends_count": 7, "location": "Lagos"},
        "entities": {
            "hashtags": [{"text": "covid19", "indices": [10, 18]}],
            "user_mentions": [{"screen_name": "orig", "id": 1, "indices": [3, 8]}]
        }
    })
}

/// The two-record corpus: a plain post followed by a repost.
pub fn make_corpus_basic() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tweets.json");
    write_lines(&path, &[plain_tweet("hello", 1), repost_tweet()]);
    (dir, path)
}
