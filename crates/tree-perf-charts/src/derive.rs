// File: crates/tree-perf-charts/src/derive.rs
// Summary: Derived columns: BinaryTree/AVLTree ratio and the logarithmic trend fit.

use chart_core::LogFit;

use crate::schema::SchemaKind;
use crate::table::{filter_valid, Column, MeasurementTable};

/// `(size, binary / avl)` per row. A precomputed `ratio` column is read as-is;
/// otherwise the ratio is derived from rows where both timings are valid.
pub fn ratio_points(table: &MeasurementTable, kind: SchemaKind) -> Vec<(f64, f64)> {
    match kind {
        SchemaKind::RatioPrecomputed { .. } => table.points(Column::Ratio),
        other => match other.pair() {
            Some(op) => {
                let [binary, avl] = op.pair();
                filter_valid(table, &op.pair())
                    .rows()
                    .iter()
                    .filter_map(|r| Some((r.size as f64, r.get(binary)? / r.get(avl)?)))
                    .collect()
            }
            None => Vec::new(),
        },
    }
}

/// AVL timings for the schema's operation and their `a·ln(size) + b` fit.
/// `None` when there is no AVL column or too few usable rows to fit.
pub fn avl_trend(table: &MeasurementTable, kind: SchemaKind) -> Option<(Vec<(f64, f64)>, LogFit)> {
    let op = kind.avl_operation()?;
    let points = table.points(op.avl_column());
    let fit = LogFit::fit(&points)?;
    Some((points, fit))
}
