//! Table assembly: run each column's extractor once and zip the results.

use crate::clean::clean_text;
use crate::date::to_rfc3339;
use crate::error::ExtractResult;
use crate::extractors::TweetExtractor;
use crate::schema::{Column, Schema};
use crate::sentiment::{find_sentiments, Sentiment, SentimentScorer};
use crate::table::{Cell, RowAssembler, Table};
use rayon::prelude::*;
use serde_json::Value;
use std::time::Instant;

/// Knobs for a single assembly pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssembleOptions {
    pub schema: Schema,
    /// Run column passes on the rayon pool.
    pub parallel: bool,
    /// Rewrite `created_at` as RFC 3339.
    pub human_readable_timestamps: bool,
}

/// Outputs shared by several columns, computed once up front.
struct Shared<'a> {
    ex: TweetExtractor<'a>,
    text: Vec<String>,
    polarity: Vec<f64>,
    subjectivity: Vec<f64>,
    human_ts: bool,
}

fn strings(v: Vec<String>) -> Vec<Cell> {
    v.into_iter().map(Cell::Str).collect()
}

fn ints(v: Vec<i64>) -> Vec<Cell> {
    v.into_iter().map(Cell::Int).collect()
}

fn floats(v: &[f64]) -> Vec<Cell> {
    v.iter().copied().map(Cell::Float).collect()
}

fn nested(v: Vec<Option<Value>>) -> Vec<Cell> {
    v.into_iter().map(Cell::from).collect()
}

impl Shared<'_> {
    fn cells(&self, column: Column) -> ExtractResult<Vec<Cell>> {
        let ex = &self.ex;
        Ok(match column {
            Column::CreatedAt => {
                let raw = ex.created_at()?;
                if self.human_ts {
                    raw.into_iter().map(|s| Cell::Str(humanize(s))).collect()
                } else {
                    strings(raw)
                }
            }
            Column::Source => strings(ex.source()?),
            Column::OriginalText => strings(self.text.clone()),
            Column::CleanText => self.text.iter().map(|t| Cell::Str(clean_text(t))).collect(),
            Column::Sentiment => self
                .polarity
                .iter()
                .map(|p| Cell::Str(Sentiment::label(*p).to_string()))
                .collect(),
            Column::Polarity => floats(&self.polarity),
            Column::Subjectivity => floats(&self.subjectivity),
            Column::Lang => ex
                .lang()?
                .into_iter()
                .map(|l| l.map(Cell::Str).unwrap_or(Cell::Null))
                .collect(),
            Column::FavoriteCount => ints(ex.favorite_count()?),
            Column::RetweetCount => ints(ex.retweet_count()?),
            Column::OriginalAuthor => strings(ex.screen_name()?),
            Column::StatusesCount => ints(ex.statuses_count()?),
            Column::FollowersCount => ints(ex.followers_count()?),
            Column::FriendsCount => ints(ex.friends_count()?),
            Column::PossiblySensitive => ex
                .possibly_sensitive()?
                .into_iter()
                .map(|b| b.map(Cell::Bool).unwrap_or(Cell::Null))
                .collect(),
            Column::Hashtags => ex.hashtags()?.into_iter().map(Cell::Json).collect(),
            Column::UserMentions => ex.mentions()?.into_iter().map(Cell::Json).collect(),
            Column::Place => nested(ex.place()?),
            Column::PlaceCoordBoundaries => nested(ex.place_coord_boundaries()?),
            Column::Location => strings(ex.location()?),
        })
    }
}

fn humanize(raw: String) -> String {
    match to_rfc3339(&raw) {
        Some(s) => s,
        None => {
            tracing::warn!("created_at {:?} is not a Twitter timestamp; kept verbatim", raw);
            raw
        }
    }
}

/// Build the table for `records`. All-or-nothing: the first extractor or
/// scorer failure is returned and no partial table is produced.
pub fn build_table(
    records: &[Value],
    scorer: &dyn SentimentScorer,
    opts: AssembleOptions,
) -> ExtractResult<Table> {
    let ex = TweetExtractor::new(records);
    let columns = opts.schema.columns();

    let text = ex.full_text()?;
    let (polarity, subjectivity) = if columns.iter().any(|c| c.needs_sentiment()) {
        find_sentiments(scorer, &text)?
    } else {
        (vec![0.0; text.len()], vec![0.0; text.len()])
    };
    let shared = Shared { ex, text, polarity, subjectivity, human_ts: opts.human_readable_timestamps };

    let started = Instant::now();
    let values: Vec<(Column, Vec<Cell>)> = if opts.parallel {
        columns
            .par_iter()
            .map(|&c| shared.cells(c).map(|v| (c, v)))
            .collect::<ExtractResult<_>>()?
    } else {
        columns
            .iter()
            .map(|&c| shared.cells(c).map(|v| (c, v)))
            .collect::<ExtractResult<_>>()?
    };
    tracing::debug!(
        "extracted {} columns over {} records in {:?}",
        values.len(),
        records.len(),
        started.elapsed()
    );

    let mut asm = RowAssembler::new(records.len());
    for (column, cells) in values {
        asm.push(column, cells)?;
    }
    Ok(asm.finish())
}
