//! Flat text report for the export pipeline.
//!
//! One file per run: truncated once when the report is created, then opened
//! in append mode and written section by section as the pipeline collects
//! each category. The format is for human inspection only: one
//! `"<SectionName>:"` header line, one line per record, a blank line after
//! the section, with no escaping and no machine-parseable structure.

use std::io;
use std::path::{Path, PathBuf};

use futures::io::AsyncWriteExt;

/// Append-only report writer with a single-run lifecycle.
pub struct Report {
    path: PathBuf,
    file: async_fs::File,
}

impl Report {
    /// Creates (or truncates) the report file and reopens it for appending.
    pub async fn create(path: &Path) -> io::Result<Self> {
        // single explicit truncation, then append-only for the rest of the run
        async_fs::write(path, "").await?;
        let file = async_fs::OpenOptions::new().append(true).open(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Appends one named section. An empty `lines` slice still writes the
    /// section header, so an empty category shows up as present-but-empty
    /// rather than missing.
    pub async fn append_section(&mut self, name: &str, lines: &[String]) -> io::Result<()> {
        let mut buf = String::with_capacity(64 + lines.iter().map(|l| l.len() + 1).sum::<usize>());
        buf.push_str(name);
        buf.push_str(":\n");
        for line in lines {
            buf.push_str(line);
            buf.push('\n');
        }
        buf.push('\n');

        self.file.write_all(buf.as_bytes()).await?;
        self.file.flush().await
    }

    /// Appends a section holding a single scalar value.
    pub async fn append_scalar(&mut self, name: &str, value: impl ToString) -> io::Result<()> {
        self.append_section(name, &[value.to_string()]).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Renders a record as a dict-style line: `{name: Foo, artist: Bar}`.
///
/// Values go in verbatim; a record whose fields contain braces or commas
/// will render ambiguously, which is acceptable for an inspection-only file.
pub fn dict_line(fields: &[(&str, String)]) -> String {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}
