//! Output column catalogue and the fixed column orders of each schema.

use std::fmt;
use std::str::FromStr;

/// One output column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    CreatedAt,
    Source,
    OriginalText,
    CleanText,
    Sentiment,
    Polarity,
    Subjectivity,
    Lang,
    FavoriteCount,
    RetweetCount,
    OriginalAuthor,
    StatusesCount,
    FollowersCount,
    FriendsCount,
    PossiblySensitive,
    Hashtags,
    UserMentions,
    Place,
    PlaceCoordBoundaries,
    Location,
}

impl Column {
    /// Header name as written by the sinks.
    pub fn name(self) -> &'static str {
        match self {
            Column::CreatedAt => "created_at",
            Column::Source => "source",
            Column::OriginalText => "original_text",
            Column::CleanText => "clean_text",
            Column::Sentiment => "sentiment",
            Column::Polarity => "polarity",
            Column::Subjectivity => "subjectivity",
            Column::Lang => "lang",
            Column::FavoriteCount => "favorite_count",
            Column::RetweetCount => "retweet_count",
            Column::OriginalAuthor => "original_author",
            Column::StatusesCount => "statuses_count",
            Column::FollowersCount => "followers_count",
            Column::FriendsCount => "friends_count",
            Column::PossiblySensitive => "possibly_sensitive",
            Column::Hashtags => "hashtags",
            Column::UserMentions => "user_mentions",
            Column::Place => "place",
            Column::PlaceCoordBoundaries => "place_coord_boundaries",
            Column::Location => "location",
        }
    }

    /// Columns whose values come from the sentiment scorer.
    pub fn needs_sentiment(self) -> bool {
        matches!(self, Column::Polarity | Column::Subjectivity | Column::Sentiment)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const STANDARD: [Column; 15] = [
    Column::CreatedAt,
    Column::Source,
    Column::OriginalText,
    Column::Polarity,
    Column::Subjectivity,
    Column::Lang,
    Column::FavoriteCount,
    Column::RetweetCount,
    Column::OriginalAuthor,
    Column::FollowersCount,
    Column::FriendsCount,
    Column::PossiblySensitive,
    Column::Hashtags,
    Column::UserMentions,
    Column::Place,
];

const EXTENDED: [Column; 20] = [
    Column::CreatedAt,
    Column::Source,
    Column::OriginalText,
    Column::CleanText,
    Column::Sentiment,
    Column::Polarity,
    Column::Subjectivity,
    Column::Lang,
    Column::FavoriteCount,
    Column::RetweetCount,
    Column::OriginalAuthor,
    Column::StatusesCount,
    Column::FollowersCount,
    Column::FriendsCount,
    Column::PossiblySensitive,
    Column::Hashtags,
    Column::UserMentions,
    Column::Place,
    Column::PlaceCoordBoundaries,
    Column::Location,
];

/// Which column layout to assemble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Schema {
    /// The 15 analysis columns.
    #[default]
    Standard,
    /// Standard columns plus cleaned text, sentiment label, author activity
    /// and location details.
    Extended,
}

impl Schema {
    pub fn columns(self) -> &'static [Column] {
        match self {
            Schema::Standard => &STANDARD,
            Schema::Extended => &EXTENDED,
        }
    }

    pub fn header(self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.name()).collect()
    }
}

impl FromStr for Schema {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Schema::Standard),
            "extended" => Ok(Schema::Extended),
            other => Err(format!("unknown schema `{other}` (expected standard|extended)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_header_order_is_fixed() {
        assert_eq!(
            Schema::Standard.header(),
            vec![
                "created_at", "source", "original_text", "polarity", "subjectivity", "lang",
                "favorite_count", "retweet_count", "original_author", "followers_count",
                "friends_count", "possibly_sensitive", "hashtags", "user_mentions", "place",
            ]
        );
    }

    #[test]
    fn extended_is_a_superset() {
        let ext = Schema::Extended.columns();
        for c in Schema::Standard.columns() {
            assert!(ext.contains(c), "{c} missing from extended schema");
        }
    }
}
