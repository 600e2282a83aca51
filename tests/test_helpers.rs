// ==========================================
// Shared test helpers
// ==========================================
#![allow(dead_code)]

use gst_billing_core::RawRow;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Build a RawRow from header/value pairs.
pub fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Write CSV lines into `dir` under `name` and return the full path.
pub fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create csv");
    for line in lines {
        writeln!(file, "{line}").expect("write csv line");
    }
    path
}
