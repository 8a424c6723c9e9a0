use crate::assemble::{build_table, AssembleOptions};
use crate::config::ExtractOptions;
use crate::ndjson::read_json_cfg;
use crate::progress::make_record_spinner;
use crate::schema::Schema;
use crate::sentiment::{LexiconScorer, SentimentScorer};
use crate::sink::{save_table, ExportFormat};
use crate::table::Table;
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Batch transform: load raw tweets, extract the columns, score the text and
/// assemble the table, optionally saving it.
#[derive(Clone)]
pub struct TweetETL {
    pub(crate) opts: ExtractOptions,
    scorer: Arc<dyn SentimentScorer>,
}

impl Default for TweetETL {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetETL {
    pub fn new() -> Self {
        Self::from_options(ExtractOptions::default())
    }

    pub fn from_options(opts: ExtractOptions) -> Self {
        Self { opts, scorer: Arc::new(LexiconScorer::default()) }
    }

    pub fn options(&self) -> &ExtractOptions { &self.opts }

    // -------- Builder methods --------
    pub fn input(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input(path); self }
    pub fn output(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output(path); self }
    pub fn save(mut self, yes: bool) -> Self { self.opts = self.opts.with_save(yes); self }
    pub fn format(mut self, format: ExportFormat) -> Self { self.opts = self.opts.with_format(format); self }
    pub fn schema(mut self, schema: Schema) -> Self { self.opts = self.opts.with_schema(schema); self }
    pub fn parallel(mut self, yes: bool) -> Self { self.opts = self.opts.with_parallel(yes); self }
    pub fn parallelism(mut self, threads: usize) -> Self { self.opts = self.opts.with_parallelism(threads); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }
    pub fn timestamps_human_readable(mut self, yes: bool) -> Self { self.opts = self.opts.with_human_timestamps(yes); self }

    /// Replace the default lexicon scorer.
    pub fn scorer(mut self, scorer: impl SentimentScorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    // -------- Operations --------

    /// Load every record from the configured input, in file order.
    pub fn load(&self) -> Result<Vec<Value>> {
        init_tracing_once();
        let pb = if self.opts.progress {
            Some(make_record_spinner(Some(self.opts.progress_label.as_deref().unwrap_or("Loading tweets"))))
        } else {
            None
        };
        let (count, records) = read_json_cfg(&self.opts.input, self.opts.read_buffer_bytes, pb.as_ref())
            .with_context(|| format!("loading {}", self.opts.input.display()))?;
        if let Some(pb) = pb {
            pb.finish_with_message("loaded");
        }
        tracing::info!("Loaded {} records from {}", count, self.opts.input.display());
        Ok(records)
    }

    /// Build the table for an already loaded batch.
    pub fn build(&self, records: &[Value]) -> Result<Table> {
        init_tracing_once();
        if self.opts.parallel {
            if let Some(n) = self.opts.parallelism {
                if n > 0 { rayon::ThreadPoolBuilder::new().num_threads(n).build_global().ok(); }
            }
        }
        let assemble = AssembleOptions {
            schema: self.opts.schema,
            parallel: self.opts.parallel,
            human_readable_timestamps: self.opts.human_readable_timestamps,
        };
        let table = build_table(records, self.scorer.as_ref(), assemble)
            .context("building tweet table")?;
        tracing::info!("Built table: {} rows x {} columns", table.len(), table.columns().len());
        Ok(table)
    }

    /// Persist a table to the configured output.
    pub fn save_table(&self, table: &Table) -> Result<()> {
        save_table(table, &self.opts.output, self.opts.format, self.opts.write_buffer_bytes)
    }

    /// Load, build and (when `save` is set) write the table.
    pub fn run(&self) -> Result<Table> {
        let records = self.load()?;
        let table = self.build(&records)?;
        if self.opts.save {
            self.save_table(&table)?;
        }
        Ok(table)
    }
}
