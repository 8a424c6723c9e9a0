use crate::schema::Schema;
use crate::sink::ExportFormat;
use std::path::{Path, PathBuf};

/// Default destination when saving without an explicit output path.
pub const DEFAULT_OUTPUT: &str = "processed_tweet_data.csv";

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    pub input: PathBuf,               // file or directory of NDJSON / .zst files
    pub output: PathBuf,              // where the table is written when `save` is set
    pub save: bool,                   // persist the table after building it
    pub format: ExportFormat,         // csv or jsonl
    pub schema: Schema,               // standard (15 columns) or extended
    pub parallel: bool,               // extract columns on the rayon pool
    pub parallelism: Option<usize>,   // Some(N) to set rayon threads, None to use default
    pub progress: bool,               // show a record counter while loading
    pub progress_label: Option<String>,

    // IO tuning
    pub read_buffer_bytes: usize,     // BufReader capacity
    pub write_buffer_bytes: usize,    // BufWriter capacity

    // output formatting
    pub human_readable_timestamps: bool, // rewrite created_at as RFC3339
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/tweets.json"),
            output: PathBuf::from(DEFAULT_OUTPUT),
            save: false,
            format: ExportFormat::Csv,
            schema: Schema::Standard,
            parallel: false,
            parallelism: None,
            progress: false,
            progress_label: None,

            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,

            human_readable_timestamps: false,
        }
    }
}

impl ExtractOptions {
    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = path.as_ref().to_path_buf();
        self
    }
    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = path.as_ref().to_path_buf();
        self
    }
    pub fn with_save(mut self, yes: bool) -> Self {
        self.save = yes;
        self
    }
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }
    pub fn with_parallel(mut self, yes: bool) -> Self {
        self.parallel = yes;
        self
    }
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }

    // IO buffers tuning
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }

    // Output: human-readable timestamps
    pub fn with_human_timestamps(mut self, yes: bool) -> Self {
        self.human_readable_timestamps = yes;
        self
    }
}
