//! CSV files as an alternate source of ports (`port` + optional `slot`
//! columns) and IMEIs (`imei` column).
//!
//! Whether a string names a CSV file is a heuristic: a `.csv` suffix always
//! counts, otherwise an existing regular file counts when its first line looks
//! like a port header. [`looks_like_csv`] holds the decision itself and
//! performs no I/O.

use crate::core::normalize::normalize_port;
use crate::domain::model::{ImeiList, PortList};
use crate::utils::error::{PortSpecError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Decides whether `spec` refers to a CSV file, given the first line of the
/// file at that path if one could be read.
pub fn looks_like_csv(spec: &str, first_line: Option<&str>) -> bool {
    let spec = spec.trim();
    if spec.is_empty() {
        return false;
    }

    if spec.to_ascii_lowercase().ends_with(".csv") {
        return true;
    }

    match first_line {
        Some(line) => {
            let line = line.trim();
            line.to_lowercase().contains("port")
                && (line.contains(',') || line.split_whitespace().count() <= 3)
        }
        None => false,
    }
}

/// First line of `path` if it is an existing, readable regular file.
fn peek_first_line(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }

    let file = File::open(path).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    Some(line)
}

/// Applies [`looks_like_csv`] to the file system.
pub fn is_csv_reference(spec: &str) -> bool {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return false;
    }
    let first_line = peek_first_line(Path::new(trimmed));
    let detected = looks_like_csv(trimmed, first_line.as_deref());
    tracing::debug!(spec = trimmed, detected, "CSV detection");
    detected
}

struct CsvTable {
    reader: csv::Reader<File>,
    headers: csv::StringRecord,
    path: String,
}

impl CsvTable {
    fn open(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(PortSpecError::CsvFileNotFound { path: display });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| PortSpecError::csv_format(&display, format!("CSV reading error: {}", e)))?;

        let headers = reader
            .headers()
            .map_err(|e| PortSpecError::csv_format(&display, format!("CSV parsing error: {}", e)))?
            .clone();

        if headers.iter().all(|h| h.trim_start_matches('\u{feff}').is_empty()) {
            return Err(PortSpecError::csv_format(
                &display,
                "CSV file is empty or has no headers",
            ));
        }

        Ok(Self {
            reader,
            headers,
            path: display,
        })
    }

    /// Case-insensitive header lookup.
    fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
    }

    fn require_column(&self, name: &str, article: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| {
            PortSpecError::csv_format(
                &self.path,
                format!("CSV file must contain {} '{}' column", article, name),
            )
        })
    }

    /// Data rows paired with the file line they start on (the header is
    /// line 1). Blank lines are skipped by the reader but still counted.
    fn rows(&mut self) -> impl Iterator<Item = Result<(u64, csv::StringRecord)>> + '_ {
        let path = self.path.clone();
        self.reader.records().map(move |record| {
            record
                .map(|r| (record_line(&r), r))
                .map_err(|e| PortSpecError::csv_format(&path, format!("CSV parsing error: {}", e)))
        })
    }
}

/// 1-based line in the source file where `record` starts.
pub(crate) fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}

fn cell(record: &csv::StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Joins a port cell and a slot cell into one port token.
///
/// Numeric slots give decimal form (`3` + `1` -> `3.01`), a single letter
/// gives alpha form (`1` + `a` -> `1A`); anything else is appended as-is and
/// left for the normalizer to accept or reject.
pub fn combine_port_and_slot(port: &str, slot: &str) -> String {
    let port = port.trim();
    let slot = slot.trim().to_ascii_uppercase();

    if !slot.is_empty() && slot.chars().all(|c| c.is_ascii_digit()) {
        return match slot.parse::<u32>() {
            Ok(number) => format!("{}.{:02}", port, number),
            Err(_) => format!("{}.{}", port, slot),
        };
    }

    format!("{}{}", port, slot)
}

/// One data row of a port CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPortRow {
    pub port: String,
    pub slot: Option<String>,
}

impl CsvPortRow {
    /// Port token for the normalizer; a bare board without slot keeps its
    /// slot-A default there.
    pub fn token(&self) -> String {
        match &self.slot {
            Some(slot) => combine_port_and_slot(&self.port, slot),
            None => self.port.clone(),
        }
    }
}

/// Reads ports from a CSV file with a `port` column and an optional `slot`
/// column. Rows with an empty port cell are skipped.
pub fn load_ports_from_csv(path: &Path) -> Result<PortList> {
    let mut table = CsvTable::open(path)?;
    let port_column = table.require_column("port", "a")?;
    let slot_column = table.column("slot");
    let file = table.path.clone();

    let mut ports = PortList::new();
    let mut skipped = 0usize;

    for row in table.rows() {
        let (line, record) = row?;

        let Some(port_value) = cell(&record, Some(port_column)) else {
            skipped += 1;
            tracing::warn!(file = %file, line, "skipping CSV row without a port value");
            continue;
        };

        let row = CsvPortRow {
            port: port_value.to_string(),
            slot: cell(&record, slot_column).map(str::to_string),
        };

        let port = normalize_port(&row.token()).map_err(|e| {
            PortSpecError::csv_format(&file, format!("invalid data in row {}: {}", line, e))
        })?;
        ports.push(port);
    }

    if ports.is_empty() {
        return Err(PortSpecError::csv_format(&file, "no valid ports found in CSV file"));
    }

    tracing::info!(file = %file, ports = ports.len(), skipped, "📄 loaded ports from CSV");
    Ok(ports)
}

/// Reads IMEIs from the `imei` column in file order, duplicates included.
pub fn load_imeis_from_csv(path: &Path) -> Result<ImeiList> {
    let mut table = CsvTable::open(path)?;
    let imei_column = table.require_column("imei", "an")?;
    let file = table.path.clone();

    let mut imeis = Vec::new();
    for row in table.rows() {
        let (_, record) = row?;
        if let Some(imei) = cell(&record, Some(imei_column)) {
            imeis.push(imei.to_string());
        }
    }

    if imeis.is_empty() {
        return Err(PortSpecError::csv_format(&file, "no valid IMEIs found in CSV file"));
    }

    tracing::info!(file = %file, imeis = imeis.len(), "📄 loaded IMEIs from CSV");
    Ok(ImeiList::from(imeis))
}

/// Loads ports when `spec` names a CSV file; `Ok(None)` means the caller
/// should parse `spec` as a literal specification.
pub fn expand_ports_if_csv(spec: &str) -> Result<Option<PortList>> {
    if !is_csv_reference(spec) {
        return Ok(None);
    }
    load_ports_from_csv(Path::new(spec.trim())).map(Some)
}

/// IMEI counterpart of [`expand_ports_if_csv`].
pub fn expand_imeis_if_csv(spec: &str) -> Result<Option<ImeiList>> {
    if !is_csv_reference(spec) {
        return Ok(None);
    }
    load_imeis_from_csv(Path::new(spec.trim())).map(Some)
}
