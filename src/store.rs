//! Append-only CSV log of checked domains

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScoutError};
use crate::types::{AvailabilityStatus, ResultRecord, StoreSummary, Verdicts};

/// Column names, written once when the file is created
pub const HEADERS: [&str; 5] = ["domain", "status", "prompt_category", "prompt_text", "checked_at"];

/// Timestamp format of the `checked_at` column (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Results file. Rows are only ever appended.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, err: std::io::Error) -> ScoutError {
        ScoutError::io(err.to_string(), Some(self.path.to_string_lossy().to_string()))
    }

    /// Write the header row if the file does not exist yet
    pub fn ensure_header(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(encode_row(&HEADERS).as_bytes())
            .map_err(|e| self.io_error(e))
    }

    /// Append one row per verdict and return how many were available
    pub fn append(&self, results: &Verdicts, category: &str, prompt_text: &str) -> Result<usize> {
        self.ensure_header()?;

        let checked_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let mut buf = String::new();
        for (domain, available) in results.iter() {
            let status = AvailabilityStatus::from_available(available);
            buf.push_str(&encode_row(&[
                domain.as_str(),
                status.as_record(),
                category,
                prompt_text,
                checked_at.as_str(),
            ]));
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(buf.as_bytes()).map_err(|e| self.io_error(e))?;

        let available = results.available_count();
        tracing::info!(
            path = %self.path.display(),
            written = results.len(),
            available,
            taken = results.len() - available,
            "Appended results"
        );

        Ok(available)
    }

    /// Read every persisted row (header excluded). Rows with the wrong
    /// number of columns are skipped with a warning.
    pub fn records(&self) -> Result<Vec<ResultRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let records = parse_rows(&content)
            .into_iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, row)| {
                if row.len() != HEADERS.len() {
                    tracing::warn!(
                        path = %self.path.display(),
                        row = index,
                        columns = row.len(),
                        expected = HEADERS.len(),
                        "Skipping malformed results row"
                    );
                    return None;
                }
                let mut fields = row.into_iter();
                let mut next = || fields.next().unwrap_or_default();
                let domain = next();
                let status = if next() == AvailabilityStatus::Available.as_record() {
                    AvailabilityStatus::Available
                } else {
                    AvailabilityStatus::Taken
                };
                Some(ResultRecord {
                    domain,
                    status,
                    prompt_category: next(),
                    prompt_text: next(),
                    checked_at: next(),
                })
            })
            .collect();

        Ok(records)
    }

    /// Count all rows and the available ones
    pub fn summarize(&self) -> Result<StoreSummary> {
        if !self.path.exists() {
            return Ok(StoreSummary::NoData);
        }

        let records = self.records()?;
        let available = records.iter().filter(|r| r.status.is_available()).count();
        Ok(StoreSummary::Counts {
            total: records.len(),
            available,
        })
    }
}

fn encode_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn encode_row(fields: &[&str]) -> String {
    let mut line = fields.iter().map(|f| encode_field(f)).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Split CSV text into rows, honoring quoted fields
fn parse_rows(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
