// File: crates/tree-perf-charts/src/schema.rs
// Summary: Classifies a table's column set into one closed schema kind.

use std::fmt;

use crate::table::{Column, MeasurementTable};

/// Benchmarked tree operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Search,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Insert, Operation::Search];

    pub const fn binary_column(self) -> Column {
        match self {
            Operation::Insert => Column::BinaryInsert,
            Operation::Search => Column::BinarySearch,
        }
    }

    pub const fn avl_column(self) -> Column {
        match self {
            Operation::Insert => Column::AvlInsert,
            Operation::Search => Column::AvlSearch,
        }
    }

    /// `[binary, avl]` timing columns.
    pub const fn pair(self) -> [Column; 2] {
        [self.binary_column(), self.avl_column()]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::Insert => "Insert",
            Operation::Search => "Search",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which series a table can feed, decided once from its header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    /// Both insert timing columns.
    InsertPair,
    /// Both search timing columns (and not both insert columns).
    SearchPair,
    /// An explicit `ratio` column. `timings` names the operation whose
    /// binary/AVL pair accompanies it; `avl` the operation whose AVL column
    /// does (equal to `timings` when the pair is present).
    RatioPrecomputed { timings: Option<Operation>, avl: Option<Operation> },
    /// An AVL timing column without its binary counterpart.
    AvlOnly(Operation),
    Unknown,
}

impl SchemaKind {
    /// Operation with both tree columns available.
    pub fn pair(self) -> Option<Operation> {
        match self {
            SchemaKind::InsertPair => Some(Operation::Insert),
            SchemaKind::SearchPair => Some(Operation::Search),
            SchemaKind::RatioPrecomputed { timings, .. } => timings,
            SchemaKind::AvlOnly(_) | SchemaKind::Unknown => None,
        }
    }

    /// Operation whose AVL column is available.
    pub fn avl_operation(self) -> Option<Operation> {
        match self {
            SchemaKind::AvlOnly(op) => Some(op),
            SchemaKind::RatioPrecomputed { avl, .. } => avl,
            other => other.pair(),
        }
    }

    /// Timing columns a comparison chart draws, binary first.
    pub fn comparison_columns(self) -> Vec<Column> {
        match (self.pair(), self.avl_operation()) {
            (Some(op), _) => op.pair().to_vec(),
            (None, Some(op)) => vec![op.avl_column()],
            (None, None) => Vec::new(),
        }
    }

    /// Whether a ratio series can be read or derived.
    pub fn has_ratio(self) -> bool {
        matches!(self, SchemaKind::RatioPrecomputed { .. }) || self.pair().is_some()
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::InsertPair => f.write_str("insert_pair"),
            SchemaKind::SearchPair => f.write_str("search_pair"),
            SchemaKind::RatioPrecomputed { .. } => f.write_str("ratio_precomputed"),
            SchemaKind::AvlOnly(_) => f.write_str("avl_only"),
            SchemaKind::Unknown => f.write_str("unknown"),
        }
    }
}

/// Classify by column presence. Precedence: `ratio` column, then insert pair,
/// then search pair, then a lone AVL column.
pub fn detect_schema(table: &MeasurementTable) -> SchemaKind {
    let both = |op: Operation| op.pair().iter().all(|&c| table.has_column(c));
    let timings = Operation::ALL.into_iter().find(|&op| both(op));
    let avl = timings.or_else(|| Operation::ALL.into_iter().find(|&op| table.has_column(op.avl_column())));

    if table.has_column(Column::Ratio) {
        return SchemaKind::RatioPrecomputed { timings, avl };
    }
    match (timings, avl) {
        (Some(Operation::Insert), _) => SchemaKind::InsertPair,
        (Some(Operation::Search), _) => SchemaKind::SearchPair,
        (None, Some(op)) => SchemaKind::AvlOnly(op),
        (None, None) => SchemaKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(columns: &[Column]) -> SchemaKind {
        detect_schema(&MeasurementTable::new(columns.iter().copied()))
    }

    #[test]
    fn insert_pair() {
        assert_eq!(kind(&[Column::AvlInsert, Column::BinaryInsert]), SchemaKind::InsertPair);
    }

    #[test]
    fn insert_wins_over_search() {
        let all = [Column::BinaryInsert, Column::AvlInsert, Column::BinarySearch, Column::AvlSearch];
        assert_eq!(kind(&all), SchemaKind::InsertPair);
        assert_eq!(kind(&[Column::BinarySearch, Column::AvlSearch]), SchemaKind::SearchPair);
    }

    #[test]
    fn ratio_column_wins() {
        assert_eq!(
            kind(&[Column::AvlInsert, Column::BinaryInsert, Column::Ratio]),
            SchemaKind::RatioPrecomputed { timings: Some(Operation::Insert), avl: Some(Operation::Insert) }
        );
        assert_eq!(kind(&[Column::Ratio]), SchemaKind::RatioPrecomputed { timings: None, avl: None });
    }

    #[test]
    fn ratio_keeps_lone_avl_column() {
        let k = kind(&[Column::AvlInsert, Column::Ratio]);
        assert_eq!(k, SchemaKind::RatioPrecomputed { timings: None, avl: Some(Operation::Insert) });
        assert_eq!(k.pair(), None);
        assert_eq!(k.avl_operation(), Some(Operation::Insert));
        assert_eq!(k.comparison_columns(), vec![Column::AvlInsert]);
        assert!(k.has_ratio());
    }

    #[test]
    fn avl_only_and_unknown() {
        assert_eq!(kind(&[Column::AvlInsert]), SchemaKind::AvlOnly(Operation::Insert));
        assert_eq!(kind(&[Column::AvlSearch, Column::BinaryInsert]), SchemaKind::AvlOnly(Operation::Search));
        assert_eq!(kind(&[Column::BinaryInsert]), SchemaKind::Unknown);
        assert_eq!(kind(&[]), SchemaKind::Unknown);
    }

    #[test]
    fn comparison_columns_follow_kind() {
        assert_eq!(SchemaKind::InsertPair.comparison_columns(), vec![Column::BinaryInsert, Column::AvlInsert]);
        assert_eq!(SchemaKind::AvlOnly(Operation::Search).comparison_columns(), vec![Column::AvlSearch]);
        assert!(SchemaKind::Unknown.comparison_columns().is_empty());
        assert!(!SchemaKind::AvlOnly(Operation::Insert).has_ratio());
        assert!(SchemaKind::RatioPrecomputed { timings: None, avl: None }.has_ratio());
    }
}
