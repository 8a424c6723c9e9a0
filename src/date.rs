use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

/// Parse a Twitter `created_at` value, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub fn parse_twitter_timestamp(s: &str) -> Option<OffsetDateTime> {
    let fmt = format_description!(
        "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
    );
    OffsetDateTime::parse(s.trim(), &fmt).ok()
}

/// Convert a Twitter `created_at` value into RFC 3339. Returns `None` when the
/// input does not follow the Twitter layout.
pub fn to_rfc3339(s: &str) -> Option<String> {
    parse_twitter_timestamp(s)?.format(&Rfc3339).ok()
}
