// Lenient reader for the particles block of a STAR file
//
// Only the loop under the particles section is read. Lines in the data
// region that do not split into exactly one token per header are skipped.

use crate::config::StarConfig;
use crate::error::{Error, Result};
use crate::star::table::{ClassId, Record, Table};
use std::path::Path;

/// Prefix that opens any data block
const BLOCK_PREFIX: &str = "data_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the particles section marker
    Preamble,
    /// Inside the particles section, before its loop marker
    Section,
    /// Reading header lines
    Headers,
    /// Reading data rows
    Data,
    /// Past the end of the particles loop
    Done,
}

/// Parser for STAR particle tables
#[derive(Debug, Clone, Default)]
pub struct StarParser {
    config: StarConfig,
}

impl StarParser {
    /// Create a parser using the given markers and column names
    pub fn new(config: StarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StarConfig {
        &self.config
    }

    /// Read and parse a STAR file from disk
    pub fn parse_file(&self, path: &Path) -> Result<Table> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;
        self.parse_source(&source, path)
    }

    /// Parse STAR text; `path` is only used in error messages
    pub fn parse_source(&self, source: &str, path: &Path) -> Result<Table> {
        let cfg = &self.config;
        let mut state = State::Preamble;
        let mut found_section = false;
        let mut found_loop = false;
        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<(usize, Vec<String>)> = Vec::new();

        for (line_no, raw) in source.lines().enumerate() {
            let line = raw.trim();

            match state {
                State::Preamble => {
                    if line.starts_with(&cfg.section) {
                        found_section = true;
                        state = State::Section;
                    }
                }
                State::Section => {
                    if line.starts_with(&cfg.loop_marker) {
                        found_loop = true;
                        state = State::Headers;
                    } else if line.starts_with(BLOCK_PREFIX) {
                        // particles block without a loop; keep looking
                        state = State::Preamble;
                    }
                }
                State::Headers => {
                    if line.is_empty() || line.starts_with(&cfg.comment_prefix) {
                        continue;
                    }
                    if line.starts_with(&cfg.header_prefix) {
                        columns.push(self.header_name(line));
                        continue;
                    }
                    if line.starts_with(BLOCK_PREFIX) {
                        state = State::Done;
                        continue;
                    }
                    state = State::Data;
                    self.accept_row(line, line_no + 1, columns.len(), &mut rows);
                }
                State::Data => {
                    if line.starts_with(BLOCK_PREFIX) || line.starts_with(&cfg.header_prefix) {
                        state = State::Done;
                        continue;
                    }
                    self.accept_row(line, line_no + 1, columns.len(), &mut rows);
                }
                State::Done => break,
            }
        }

        if !found_section {
            return Err(Error::parse(
                path,
                format!("missing section marker '{}'", cfg.section),
            ));
        }
        if !found_loop {
            return Err(Error::parse(
                path,
                format!("missing loop marker '{}' after '{}'", cfg.loop_marker, cfg.section),
            ));
        }
        if columns.is_empty() {
            return Err(Error::parse(path, "no column headers in particles loop"));
        }
        if rows.is_empty() {
            return Err(Error::parse(
                path,
                format!("no data rows with {} fields", columns.len()),
            ));
        }

        let particle_index = self.column_index(&columns, &cfg.particle_column, path)?;
        let class_index = self.column_index(&columns, &cfg.class_column, path)?;

        let mut records = Vec::with_capacity(rows.len());
        for (line_no, fields) in rows {
            let value = &fields[class_index];
            let class_id: ClassId = value.parse().map_err(|_| {
                Error::parse(
                    path,
                    format!(
                        "line {}: class value '{}' in column '{}' is not an integer",
                        line_no, value, cfg.class_column
                    ),
                )
            })?;
            records.push(Record::new(fields, class_id));
        }

        log::debug!(
            "Parsed {}: {} columns, {} records",
            path.display(),
            columns.len(),
            records.len()
        );

        Ok(Table::new(columns, records, particle_index, class_index))
    }

    /// Column name from a header line: first token, prefix stripped
    fn header_name(&self, line: &str) -> String {
        let token = line.split_whitespace().next().unwrap_or(line);
        token
            .strip_prefix(self.config.header_prefix.as_str())
            .unwrap_or(token)
            .to_string()
    }

    /// Keep a data line only when it has one token per column
    fn accept_row(
        &self,
        line: &str,
        line_no: usize,
        width: usize,
        rows: &mut Vec<(usize, Vec<String>)>,
    ) {
        if line.is_empty() || line.starts_with(&self.config.comment_prefix) {
            return;
        }
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if tokens.len() == width {
            rows.push((line_no, tokens));
        } else {
            log::trace!(
                "Skipping line {}: {} fields, expected {}",
                line_no,
                tokens.len(),
                width
            );
        }
    }

    fn column_index(&self, columns: &[String], name: &str, path: &Path) -> Result<usize> {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::parse(path, format!("column '{}' missing", name)))
    }
}
