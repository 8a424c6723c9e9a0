//! Line-delimited JSON loading: plain or zstd-compressed files, or a directory
//! of them, into an in-memory record batch.

use anyhow::{bail, Context, Result};
use indicatif::ProgressBar;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zstd::stream::read::Decoder;

const INPUT_EXTENSIONS: [&str; 4] = ["json", "jsonl", "ndjson", "zst"];

/// Buffered NDJSON line reader. `.zst` inputs are decoded transparently.
pub struct NdjsonReader {
    rdr: Box<dyn BufRead>,
}

impl NdjsonReader {
    pub fn open(path: &Path, buf_bytes: usize) -> Result<Self> {
        let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let cap = buf_bytes.max(8 * 1024);
        let rdr: Box<dyn BufRead> = if is_zst(path) {
            let mut decoder = Decoder::new(f).with_context(|| format!("zstd init {}", path.display()))?;
            decoder.window_log_max(31)?;
            Box::new(BufReader::with_capacity(cap, decoder))
        } else {
            Box::new(BufReader::with_capacity(cap, f))
        };
        Ok(Self { rdr })
    }

    /// Read the next line into `buf`. Returns the number of bytes read (0 on EOF).
    /// Strips trailing `\r?\n`.
    pub fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        buf.clear();
        let n = self.rdr.read_line(buf)?;
        if n == 0 { return Ok(0); }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') { buf.pop(); }
        }
        Ok(n)
    }
}

fn is_zst(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("zst")
}

/// Input files for `path`: the file itself, or every NDJSON/zst file below a
/// directory in sorted path order.
pub fn discover_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        bail!("input {} does not exist", path.display());
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).min_depth(1) {
        let ent = entry.with_context(|| format!("walk {}", path.display()))?;
        if !ent.file_type().is_file() {
            continue;
        }
        let ext = ent.path().extension().and_then(|e| e.to_str()).unwrap_or("");
        if INPUT_EXTENSIONS.contains(&ext) {
            files.push(ent.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Append every record of one file to `out`. Blank lines are skipped; a
/// line that is not valid JSON fails with its 1-based line number.
pub fn load_file(
    path: &Path,
    read_buf_bytes: usize,
    out: &mut Vec<Value>,
    pb: Option<&ProgressBar>,
) -> Result<usize> {
    let mut rdr = NdjsonReader::open(path, read_buf_bytes)?;
    let mut buf = String::with_capacity(16 * 1024);
    let mut line_no = 0usize;
    let mut loaded = 0usize;
    loop {
        let n = rdr
            .read_line(&mut buf)
            .with_context(|| format!("read {} after line {}", path.display(), line_no))?;
        if n == 0 { break; }
        line_no += 1;
        if buf.trim().is_empty() { continue; }
        let v: Value = serde_json::from_str(&buf)
            .with_context(|| format!("JSON parse error in {} on line {}", path.display(), line_no))?;
        out.push(v);
        loaded += 1;
        if let Some(pb) = pb { pb.inc(1); }
    }
    tracing::debug!("loaded {} records from {}", loaded, path.display());
    Ok(loaded)
}

/// Load all records under `path` in order, returning `(count, records)`.
pub fn read_json(path: &Path) -> Result<(usize, Vec<Value>)> {
    read_json_cfg(path, 256 * 1024, None)
}

pub fn read_json_cfg(
    path: &Path,
    read_buf_bytes: usize,
    pb: Option<&ProgressBar>,
) -> Result<(usize, Vec<Value>)> {
    let files = discover_inputs(path)?;
    if files.is_empty() {
        tracing::warn!("No input files found under {}", path.display());
    }
    let mut records = Vec::new();
    for f in &files {
        load_file(f, read_buf_bytes, &mut records, pb)?;
    }
    Ok((records.len(), records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn reads_lines_and_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("tweets.json");
        fs::write(&p, "{\"text\":\"a\"}\r\n\n   \n{\"text\":\"b\"}").unwrap();
        let (n, records) = read_json(&p).unwrap();
        assert_eq!(n, 2);
        assert_eq!(records[1]["text"], "b");
    }

    #[test]
    fn bad_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("tweets.json");
        fs::write(&p, "{\"text\":\"a\"}\n{oops\n").unwrap();
        let err = read_json(&p).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "{err:#}");
    }

    #[test]
    fn directory_inputs_are_sorted_and_zst_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.jsonl"), "{\"n\":2}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let f = File::create(dir.path().join("a.zst")).unwrap();
        let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
        writeln!(&mut enc, "{{\"n\":1}}").unwrap();
        enc.finish().unwrap();

        let (n, records) = read_json(dir.path()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(records[0]["n"], 1);
        assert_eq!(records[1]["n"], 2);
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(read_json(Path::new("/definitely/not/here.json")).is_err());
    }
}
