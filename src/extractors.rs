//! Per-column field extractors.
//!
//! Every extractor makes one pass over the whole record slice and returns
//! exactly one value per record, in record order. Optional substructure falls
//! back to its documented default; a missing always-present field aborts the
//! column with an error naming the record index.

use crate::error::{ExtractError, ExtractResult};
use crate::record::{Lookup, RecordView};
use crate::schema::Column;
use serde_json::Value;

const REPOST: &str = "retweeted_status";

/// Column extractors over an in-memory batch of raw tweet records.
#[derive(Clone, Copy)]
pub struct TweetExtractor<'a> {
    records: &'a [Value],
}

impl<'a> TweetExtractor<'a> {
    pub fn new(records: &'a [Value]) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn map_records<T>(
        &self,
        column: Column,
        f: impl Fn(RecordView<'a>) -> ExtractResult<T>,
    ) -> ExtractResult<Vec<T>> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, v)| f(RecordView::new(v, i, column.name())))
            .collect()
    }

    /// Untruncated text: the repost's `extended_tweet.full_text` when the
    /// repost carries one, otherwise the top-level `text`. The repost's own
    /// truncated `text` is never used.
    pub fn full_text(&self) -> ExtractResult<Vec<String>> {
        self.map_records(Column::OriginalText, |r| {
            let extended = r.optional_object(REPOST)?.is_some()
                && r.lookup(&[REPOST, "extended_tweet"]).non_null().is_some();
            let text = if extended {
                r.required_str(&[REPOST, "extended_tweet", "full_text"])?
            } else {
                r.required_str(&["text"])?
            };
            Ok(text.to_string())
        })
    }

    /// Engagement counter read from the repost when present: the wrapper's
    /// own copy is stale.
    fn engagement(&self, column: Column, key: &'static str) -> ExtractResult<Vec<i64>> {
        self.map_records(column, |r| {
            if r.optional_object(REPOST)?.is_some() {
                r.required_i64(&[REPOST, key])
            } else {
                r.required_i64(&[key])
            }
        })
    }

    pub fn favorite_count(&self) -> ExtractResult<Vec<i64>> {
        self.engagement(Column::FavoriteCount, "favorite_count")
    }

    pub fn retweet_count(&self) -> ExtractResult<Vec<i64>> {
        self.engagement(Column::RetweetCount, "retweet_count")
    }

    /// `possibly_sensitive`, or `None` when the key is absent.
    pub fn possibly_sensitive(&self) -> ExtractResult<Vec<Option<bool>>> {
        self.map_records(Column::PossiblySensitive, |r| r.optional_bool(&["possibly_sensitive"]))
    }

    /// `user.location`. `user` itself is required; a missing, null or
    /// mistyped location (or a `user` that is not an object) yields `""`.
    pub fn location(&self) -> ExtractResult<Vec<String>> {
        self.map_records(Column::Location, |r| {
            if r.lookup(&["user"]) == Lookup::Absent {
                return Err(r.structural(&["user"]));
            }
            let loc = r.lookup(&["user", "location"]).non_null().and_then(Value::as_str);
            Ok(loc.unwrap_or_default().to_string())
        })
    }

    fn user_count(&self, column: Column, key: &'static str) -> ExtractResult<Vec<i64>> {
        self.map_records(column, |r| r.required_i64(&["user", key]))
    }

    pub fn statuses_count(&self) -> ExtractResult<Vec<i64>> {
        self.user_count(Column::StatusesCount, "statuses_count")
    }

    pub fn followers_count(&self) -> ExtractResult<Vec<i64>> {
        self.user_count(Column::FollowersCount, "followers_count")
    }

    pub fn friends_count(&self) -> ExtractResult<Vec<i64>> {
        self.user_count(Column::FriendsCount, "friends_count")
    }

    pub fn screen_name(&self) -> ExtractResult<Vec<String>> {
        self.map_records(Column::OriginalAuthor, |r| {
            r.required_str(&["user", "screen_name"]).map(str::to_string)
        })
    }

    pub fn created_at(&self) -> ExtractResult<Vec<String>> {
        self.map_records(Column::CreatedAt, |r| r.required_str(&["created_at"]).map(str::to_string))
    }

    pub fn source(&self) -> ExtractResult<Vec<String>> {
        self.map_records(Column::Source, |r| r.required_str(&["source"]).map(str::to_string))
    }

    fn entity_list(&self, column: Column, key: &'static str) -> ExtractResult<Vec<Value>> {
        self.map_records(column, |r| {
            let v = r.required(&["entities", key])?;
            if v.is_array() {
                Ok(v.clone())
            } else {
                Err(ExtractError::TypeMismatch {
                    column: r.column,
                    index: r.index,
                    path: format!("entities.{key}"),
                    expected: "an array",
                })
            }
        })
    }

    /// `entities.hashtags`, kept structured.
    pub fn hashtags(&self) -> ExtractResult<Vec<Value>> {
        self.entity_list(Column::Hashtags, "hashtags")
    }

    /// `entities.user_mentions`, kept structured.
    pub fn mentions(&self) -> ExtractResult<Vec<Value>> {
        self.entity_list(Column::UserMentions, "user_mentions")
    }

    /// Top-level `lang`; absent, null or empty gives `None` so the CSV
    /// empty field reads back unambiguously.
    pub fn lang(&self) -> ExtractResult<Vec<Option<String>>> {
        self.map_records(Column::Lang, |r| {
            Ok(r.optional_str(&["lang"])?.filter(|s| !s.is_empty()).map(str::to_string))
        })
    }

    /// Top-level `place` passed through; absent or null gives `None`.
    pub fn place(&self) -> ExtractResult<Vec<Option<Value>>> {
        self.map_records(Column::Place, |r| Ok(r.optional(&["place"])?.cloned()))
    }

    /// `place.bounding_box.coordinates` when available.
    pub fn place_coord_boundaries(&self) -> ExtractResult<Vec<Option<Value>>> {
        self.map_records(Column::PlaceCoordBoundaries, |r| {
            Ok(r.lookup(&["place", "bounding_box", "coordinates"]).non_null().cloned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() -> Value {
        json!({
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "source": "<a href=\"http://twitter.com\">Twitter Web App</a>",
            "text": "B",
            "favorite_count": 2,
            "retweet_count": 1,
            "lang": "en",
            "user": {"statuses_count": 5, "screen_name": "a", "followers_count": 10,
                     "friends_count": 3, "location": "Nairobi"},
            "entities": {"hashtags": [{"text": "rust"}], "user_mentions": []}
        })
    }

    #[test]
    fn full_text_prefers_repost_extended_text() {
        let mut rt = plain();
        rt["retweeted_status"] = json!({
            "text": "truncated…",
            "extended_tweet": {"full_text": "A"},
            "favorite_count": 10, "retweet_count": 4
        });
        let mut short_rt = plain();
        short_rt["retweeted_status"] = json!({"text": "repost text", "favorite_count": 0, "retweet_count": 0});

        let records = vec![rt, plain(), short_rt];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.full_text().unwrap(), vec!["A", "B", "B"]);
    }

    #[test]
    fn counters_come_from_repost_when_present() {
        let mut rt = plain();
        rt["retweeted_status"] = json!({"favorite_count": 10, "retweet_count": 7});
        let records = vec![rt, plain()];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.favorite_count().unwrap(), vec![10, 2]);
        assert_eq!(ex.retweet_count().unwrap(), vec![7, 1]);
    }

    #[test]
    fn repost_without_counter_is_structural() {
        let mut rt = plain();
        rt["retweeted_status"] = json!({"retweet_count": 7});
        let records = vec![plain(), rt];
        let err = TweetExtractor::new(&records).favorite_count().unwrap_err();
        assert_eq!(
            err,
            ExtractError::Structural {
                column: "favorite_count",
                index: 1,
                path: "retweeted_status.favorite_count".into()
            }
        );
    }

    #[test]
    fn mistyped_repost_is_fatal_for_text_and_counters() {
        for bad in [json!("oops"), json!(42), json!([{"favorite_count": 10}])] {
            let mut rt = plain();
            rt["retweeted_status"] = bad;
            let records = vec![plain(), rt];
            let ex = TweetExtractor::new(&records);

            for (column, err) in [
                ("original_text", ex.full_text().unwrap_err()),
                ("favorite_count", ex.favorite_count().unwrap_err()),
                ("retweet_count", ex.retweet_count().unwrap_err()),
            ] {
                match err {
                    ExtractError::TypeMismatch { column: c, index, path, .. } => {
                        assert_eq!(c, column);
                        assert_eq!(index, 1);
                        assert_eq!(path, "retweeted_status");
                    }
                    other => panic!("unexpected error {other:?}"),
                }
            }
        }
    }

    #[test]
    fn null_repost_falls_back_to_top_level() {
        let mut rt = plain();
        rt["retweeted_status"] = Value::Null;
        let records = vec![rt];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.full_text().unwrap(), vec!["B"]);
        assert_eq!(ex.favorite_count().unwrap(), vec![2]);
    }

    #[test]
    fn missing_text_without_repost_is_structural() {
        let mut no_text = plain();
        no_text.as_object_mut().unwrap().remove("text");
        let records = vec![plain(), plain(), no_text];
        let err = TweetExtractor::new(&records).full_text().unwrap_err();
        assert_eq!(
            err,
            ExtractError::Structural { column: "original_text", index: 2, path: "text".into() }
        );
    }

    #[test]
    fn non_string_lang_is_fatal() {
        let mut odd = plain();
        odd["lang"] = json!(7);
        let records = vec![plain(), odd];
        match TweetExtractor::new(&records).lang().unwrap_err() {
            ExtractError::TypeMismatch { column, index, path, .. } => {
                assert_eq!(column, "lang");
                assert_eq!(index, 1);
                assert_eq!(path, "lang");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_lang_reads_as_absent() {
        let mut blank = plain();
        blank["lang"] = json!("");
        let records = vec![blank, plain()];
        assert_eq!(TweetExtractor::new(&records).lang().unwrap(), vec![None, Some("en".to_string())]);
    }

    #[test]
    fn possibly_sensitive_defaults_to_none() {
        let mut flagged = plain();
        flagged["possibly_sensitive"] = json!(false);
        let records = vec![plain(), flagged];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.possibly_sensitive().unwrap(), vec![None, Some(false)]);
    }

    #[test]
    fn location_defaults_to_empty_string() {
        let mut no_loc = plain();
        no_loc["user"].as_object_mut().unwrap().remove("location");
        let mut odd_user = plain();
        odd_user["user"] = json!("not-an-object");
        let mut numeric_loc = plain();
        numeric_loc["user"]["location"] = json!(42);

        let records = vec![plain(), no_loc, odd_user, numeric_loc];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.location().unwrap(), vec!["Nairobi", "", "", ""]);
    }

    #[test]
    fn location_still_requires_user() {
        let mut no_user = plain();
        no_user.as_object_mut().unwrap().remove("user");
        let records = vec![no_user];
        let err = TweetExtractor::new(&records).location().unwrap_err();
        assert!(matches!(err, ExtractError::Structural { index: 0, .. }));
    }

    #[test]
    fn user_fields_are_required() {
        let mut broken = plain();
        broken["user"].as_object_mut().unwrap().remove("followers_count");
        let records = vec![plain(), plain(), broken];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.screen_name().unwrap(), vec!["a", "a", "a"]);
        let err = ex.followers_count().unwrap_err();
        assert_eq!(err.column(), "followers_count");
        assert_eq!(err.index(), Some(2));
    }

    #[test]
    fn entities_pass_through_structurally() {
        let records = vec![plain()];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.hashtags().unwrap(), vec![json!([{"text": "rust"}])]);
        assert_eq!(ex.mentions().unwrap(), vec![json!([])]);
    }

    #[test]
    fn lang_and_place_are_optional_pass_through() {
        let mut placed = plain();
        placed.as_object_mut().unwrap().remove("lang");
        placed["place"] = json!({
            "full_name": "Addis Ababa, Ethiopia",
            "bounding_box": {"type": "Polygon", "coordinates": [[[38.6, 8.8], [38.9, 9.1]]]}
        });
        let records = vec![plain(), placed];
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.lang().unwrap(), vec![Some("en".to_string()), None]);
        let place = ex.place().unwrap();
        assert!(place[0].is_none());
        assert_eq!(place[1].as_ref().unwrap()["full_name"], "Addis Ababa, Ethiopia");
        assert_eq!(
            ex.place_coord_boundaries().unwrap(),
            vec![None, Some(json!([[[38.6, 8.8], [38.9, 9.1]]]))]
        );
    }

    #[test]
    fn every_extractor_preserves_length() {
        let records: Vec<Value> = (0..5).map(|_| plain()).collect();
        let ex = TweetExtractor::new(&records);
        assert_eq!(ex.full_text().unwrap().len(), 5);
        assert_eq!(ex.created_at().unwrap().len(), 5);
        assert_eq!(ex.source().unwrap().len(), 5);
        assert_eq!(ex.statuses_count().unwrap().len(), 5);
        assert_eq!(ex.friends_count().unwrap().len(), 5);
        assert_eq!(ex.lang().unwrap().len(), 5);
        assert_eq!(ex.place().unwrap().len(), 5);
    }
}
