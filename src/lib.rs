mod config;
mod date;
mod progress;
mod util;
mod pipeline;

mod record;
mod error;
mod extractors;
mod sentiment;
mod clean;

mod schema;
mod table;
mod assemble;

mod ndjson;
mod sink;

pub use crate::config::{ExtractOptions, DEFAULT_OUTPUT};
pub use crate::pipeline::TweetETL;

// typed record access and the error taxonomy
pub use crate::record::{lookup, has_object, Lookup};
pub use crate::error::{ExtractError, ExtractResult, ScorerError};

// per-column extractors and sentiment contract
pub use crate::extractors::TweetExtractor;
pub use crate::sentiment::{find_sentiments, LexiconScorer, Sentiment, SentimentScorer};
pub use crate::clean::clean_text;
pub use crate::date::{parse_twitter_timestamp, to_rfc3339};

// schema, table and assembly
pub use crate::schema::{Column, Schema};
pub use crate::table::{Cell, Row, RowAssembler, Table};
pub use crate::assemble::{build_table, AssembleOptions};

// loader and sinks
pub use crate::ndjson::{read_json, read_json_cfg, discover_inputs, NdjsonReader};
pub use crate::sink::{save_table, write_csv, write_jsonl, ExportFormat};

pub use crate::util::init_tracing_once;
