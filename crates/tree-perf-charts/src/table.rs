// File: crates/tree-perf-charts/src/table.rs
// Summary: Measurement table model and CSV loading; sentinel timings become `None` here.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

/// Header of the required input-size column.
pub const SIZE_COLUMN: &str = "size";

/// Optional measurement columns, recognised by header name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    BinaryInsert,
    AvlInsert,
    BinarySearch,
    AvlSearch,
    Ratio,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::BinaryInsert,
        Column::AvlInsert,
        Column::BinarySearch,
        Column::AvlSearch,
        Column::Ratio,
    ];

    pub const fn header(self) -> &'static str {
        match self {
            Column::BinaryInsert => "binarytree_insert",
            Column::AvlInsert => "avltree_insert",
            Column::BinarySearch => "binarytree_search",
            Column::AvlSearch => "avltree_search",
            Column::Ratio => "ratio",
        }
    }

    pub fn from_header(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.header().eq_ignore_ascii_case(name))
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Convert a raw cell value into a measurement. Non-positive and non-finite
/// values mark a skipped measurement.
pub fn measurement(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub size: u64,
    values: [Option<f64>; Column::ALL.len()],
}

impl Row {
    pub fn new(size: u64) -> Self {
        Self { size, values: [None; Column::ALL.len()] }
    }

    /// Set `column` from a raw value, applying the sentinel rule.
    pub fn with(mut self, column: Column, raw: f64) -> Self {
        self.values[column.slot()] = measurement(raw);
        self
    }

    pub fn get(&self, column: Column) -> Option<f64> {
        self.values[column.slot()]
    }

    /// Whether every column in `columns` holds a valid measurement.
    pub fn has_all(&self, columns: &[Column]) -> bool {
        columns.iter().all(|&c| self.get(c).is_some())
    }
}

/// Rows in file order plus the set of optional columns the header declared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl MeasurementTable {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        let mut cols: Vec<Column> = Vec::new();
        for c in columns {
            if !cols.contains(&c) {
                cols.push(c);
            }
        }
        Self { columns: cols, rows: Vec::new() }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.rows.iter().map(|r| r.size)
    }

    /// `(size, value)` for every row holding a valid measurement in `column`, in table order.
    pub fn points(&self, column: Column) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.get(column).map(|v| (r.size as f64, v)))
            .collect()
    }

    /// Parse CSV text with a header row. Unknown columns are ignored; empty
    /// cells count as skipped measurements.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let i_size = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(SIZE_COLUMN))
            .ok_or(LoadError::MissingSize)?;

        // first occurrence of each recognised column wins
        let mut indexed: Vec<(usize, Column)> = Vec::new();
        for (i, h) in headers.iter().enumerate() {
            if let Some(c) = Column::from_header(h) {
                if !indexed.iter().any(|&(_, seen)| seen == c) {
                    indexed.push((i, c));
                }
            }
        }
        debug!(columns = ?indexed.iter().map(|&(_, c)| c.header()).collect::<Vec<_>>(), "recognised columns");

        let mut table = Self::new(indexed.iter().map(|&(_, c)| c));
        for rec in rdr.records() {
            let rec = rec?;
            let line = rec.position().map_or(0, |p| p.line());
            let size = parse_size(rec.get(i_size).unwrap_or_default(), line)?;
            let mut row = Row::new(size);
            for &(i, column) in &indexed {
                let cell = rec.get(i).unwrap_or_default();
                if cell.is_empty() {
                    continue;
                }
                let raw: f64 = cell.parse().map_err(|_| LoadError::InvalidNumber {
                    line,
                    column: column.header(),
                    value: cell.to_string(),
                })?;
                row = row.with(column, raw);
            }
            table.push(row);
        }
        Ok(table)
    }
}

fn parse_size(cell: &str, line: u64) -> Result<u64, LoadError> {
    let invalid = || LoadError::InvalidSize { line, value: cell.to_string() };
    if let Ok(n) = cell.parse::<u64>() {
        return Ok(n);
    }
    // writers sometimes emit integral sizes as floats ("1000.0")
    let f: f64 = cell.parse().map_err(|_| invalid())?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Ok(f as u64)
    } else {
        Err(invalid())
    }
}

/// Read the CSV at `path` into a table.
pub fn load(path: impl AsRef<Path>) -> Result<MeasurementTable, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path).map_err(|e| LoadError::Csv(e.into()))?;
    let table = MeasurementTable::from_reader(file)?;
    debug!(path = %path.display(), rows = table.len(), "loaded table");
    Ok(table)
}

/// Rows where every named column holds a valid (positive) measurement, order kept.
pub fn filter_valid(table: &MeasurementTable, columns: &[Column]) -> MeasurementTable {
    MeasurementTable {
        columns: table.columns.clone(),
        rows: table.rows.iter().filter(|r| r.has_all(columns)).cloned().collect(),
    }
}
