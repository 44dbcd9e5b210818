// File: crates/tree-perf-charts/src/batch.rs
// Summary: Fixed input list, output naming and the per-file batch driver producing a report.

use std::path::{Path, PathBuf};

use chart_core::RenderOptions;
use tracing::debug;

use crate::error::ProcessingError;
use crate::render::{render, ChartKind, RenderOutcome};
use crate::schema::{detect_schema, SchemaKind};
use crate::table::load;

/// Inputs whose name starts with this also get the AVL trend chart.
pub const LARGE_PREFIX: &str = "large_";

/// One known input file and the title its charts carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSpec {
    pub file_name: &'static str,
    pub title: &'static str,
}

impl InputSpec {
    pub const fn new(file_name: &'static str, title: &'static str) -> Self {
        Self { file_name, title }
    }
}

/// Every input the batch looks for. Each is optional.
pub const INPUTS: &[InputSpec] = &[
    InputSpec::new("performance_insert_improved.csv", "Insert Performance: BinaryTree vs AVLTree"),
    InputSpec::new("performance_search.csv", "Search Performance: BinaryTree vs AVLTree"),
    InputSpec::new("performance_sorted_insert.csv", "Sorted Insert Performance"),
    InputSpec::new("large_sorted_performance.csv", "Large Sorted Input Performance"),
    InputSpec::new("medium_sorted_performance.csv", "Medium Sorted Input Performance"),
    InputSpec::new("small_sorted_comparison.csv", "Small Sorted Input Comparison"),
    InputSpec::new("large_reverse_sorted_performance.csv", "Large Reverse-Sorted Input Performance"),
    InputSpec::new("performance_granular.csv", "Granular Performance Test"),
    InputSpec::new("performance_very_large.csv", "Very Large Performance Test"),
];

/// Chart kinds produced for an input file name, in render order.
pub fn chart_kinds_for(file_name: &str) -> Vec<ChartKind> {
    let mut kinds = vec![ChartKind::Comparison, ChartKind::Ratio, ChartKind::LogScale];
    if file_name.starts_with(LARGE_PREFIX) {
        kinds.push(ChartKind::AvlOnly);
    }
    kinds
}

/// `<out_dir>/<input stem><suffix>`.
pub fn output_path(out_dir: &Path, input: &Path, kind: ChartKind) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    out_dir.join(format!("{stem}{}", kind.suffix()))
}

#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Directory the input CSVs are looked up in.
    pub data_dir: PathBuf,
    /// Directory charts are written to; created on demand.
    pub out_dir: PathBuf,
    pub render: RenderOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("."), out_dir: PathBuf::from("."), render: RenderOptions::default() }
    }
}

impl BatchConfig {
    /// Positional `[data_dir] [out_dir]`; the output directory defaults to the data directory.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let data_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| data_dir.clone());
        Self { data_dir, out_dir, ..Self::default() }
    }
}

#[derive(Debug)]
pub struct ChartReport {
    pub kind: ChartKind,
    pub result: Result<RenderOutcome, ProcessingError>,
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub schema: Option<SchemaKind>,
    pub rows: usize,
    /// `Err` when the file could not be loaded; otherwise one entry per chart kind.
    pub charts: Result<Vec<ChartReport>, ProcessingError>,
}

impl FileReport {
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.chart_reports().filter_map(|c| match &c.result {
            Ok(RenderOutcome::Written(p)) => Some(p.as_path()),
            _ => None,
        })
    }

    pub fn chart_reports(&self) -> impl Iterator<Item = &ChartReport> {
        self.charts.iter().flatten()
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.files.iter().map(|f| f.written().count()).sum()
    }

    pub fn skipped(&self) -> usize {
        self.charts().filter(|c| matches!(c.result, Ok(RenderOutcome::Skipped(_)))).count()
    }

    /// Files that failed to load plus individual charts that failed to render.
    /// Missing inputs are not failures.
    pub fn failed(&self) -> usize {
        let files = self
            .files
            .iter()
            .filter(|f| matches!(&f.charts, Err(e) if !e.is_file_not_found()))
            .count();
        files + self.charts().filter(|c| c.result.is_err()).count()
    }

    pub fn missing(&self) -> usize {
        self.files.iter().filter(|f| matches!(&f.charts, Err(e) if e.is_file_not_found())).count()
    }

    fn charts(&self) -> impl Iterator<Item = &ChartReport> {
        self.files.iter().flat_map(|f| f.chart_reports())
    }
}

/// Load one file and render each chart kind independently; a failing chart
/// does not prevent the others.
pub fn process_path(config: &BatchConfig, input: &Path, title: &str) -> FileReport {
    let table = match load(input) {
        Ok(t) => t,
        Err(e) => {
            return FileReport {
                input: input.to_path_buf(),
                schema: None,
                rows: 0,
                charts: Err(ProcessingError::load(input, e)),
            };
        }
    };
    let schema = detect_schema(&table);
    debug!(input = %input.display(), rows = table.len(), %schema, "classified table");

    let file_name = input.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    let charts = chart_kinds_for(file_name)
        .into_iter()
        .map(|kind| {
            let out = output_path(&config.out_dir, input, kind);
            let result = render(kind, &table, schema, title, &out, &config.render).map_err(|source| {
                ProcessingError::Render { path: input.to_path_buf(), kind, source }
            });
            ChartReport { kind, result }
        })
        .collect();

    FileReport { input: input.to_path_buf(), schema: Some(schema), rows: table.len(), charts: Ok(charts) }
}

pub fn process_file(config: &BatchConfig, spec: &InputSpec) -> FileReport {
    process_path(config, &config.data_dir.join(spec.file_name), spec.title)
}

/// Process every input in order; always runs to the end.
pub fn run_batch(config: &BatchConfig, inputs: &[InputSpec]) -> BatchReport {
    BatchReport { files: inputs.iter().map(|spec| process_file(config, spec)).collect() }
}
