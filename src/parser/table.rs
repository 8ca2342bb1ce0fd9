//! Table detection from text alignment.
//!
//! Works on lines rather than ruling graphics: a run of consecutive lines
//! that split into the same number of widely spaced cells, with the cells'
//! edges aligned from row to row, is reported as a table.

use crate::model::ContentItem;

use super::layout::{is_bullet_marker, is_number_marker, join_spans, TextLine, TextSpan};

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Minimum horizontal gap separating two cells (points)
    pub min_column_gap: f64,
    /// Tolerance when matching cell edges between rows (points)
    pub alignment_tolerance: f64,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 8,
            min_column_gap: 15.0,
            alignment_tolerance: 6.0,
        }
    }
}

/// A detected table region with its cell text.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedTable {
    /// Cell text, row by row
    pub rows: Vec<Vec<String>>,
    /// Bounding box `[x0, y0, x1, y1]`
    pub bbox: [f64; 4],
}

impl DetectedTable {
    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Top edge, for reading-order placement.
    pub fn top(&self) -> f64 {
        self.bbox[3]
    }

    /// Convert to a content item.
    pub fn to_content_item(&self) -> ContentItem {
        ContentItem::table(self.rows.clone()).with_bbox(self.bbox)
    }
}

/// One cell of a candidate row.
#[derive(Debug, Clone)]
struct Cell {
    left: f64,
    right: f64,
    text: String,
}

/// Detects tables in a page's lines.
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self {
            config: TableDetectorConfig::default(),
        }
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables in lines ordered top to bottom.
    ///
    /// Returns detected tables and the lines that were NOT part of tables,
    /// in their original order.
    pub fn detect(&self, lines: Vec<TextLine>) -> (Vec<DetectedTable>, Vec<TextLine>) {
        let cells: Vec<Option<Vec<Cell>>> = lines.iter().map(|l| self.split_cells(l)).collect();

        let mut in_table = vec![false; lines.len()];
        let mut tables = Vec::new();
        let mut start = 0;

        while start < lines.len() {
            let Some(first) = &cells[start] else {
                start += 1;
                continue;
            };

            let mut end = start + 1;
            while end < lines.len() {
                match &cells[end] {
                    Some(row) if self.rows_align(&cells[end - 1], row, first.len()) => end += 1,
                    _ => break,
                }
            }

            let rows: Vec<&Vec<Cell>> = cells[start..end].iter().flatten().collect();
            if rows.len() >= self.config.min_rows && !self.is_list_pattern(&rows) {
                log::debug!(
                    "TableDetector: {} rows x {} columns at lines {}..{}",
                    rows.len(),
                    first.len(),
                    start,
                    end
                );
                tables.push(build_table(&lines[start..end], &rows));
                in_table[start..end].iter_mut().for_each(|flag| *flag = true);
                start = end;
            } else {
                start += 1;
            }
        }

        let remaining = lines
            .into_iter()
            .zip(in_table)
            .filter(|(_, used)| !used)
            .map(|(line, _)| line)
            .collect();

        (tables, remaining)
    }

    /// Split a line into cells at wide gaps; `None` if it cannot be a table row.
    fn split_cells(&self, line: &TextLine) -> Option<Vec<Cell>> {
        let mut groups: Vec<Vec<TextSpan>> = Vec::new();
        for span in &line.spans {
            let gap_ok = groups
                .last()
                .and_then(|g| g.last())
                .map(|prev| span.x - prev.right() >= self.config.min_column_gap)
                .unwrap_or(true);
            if gap_ok {
                groups.push(vec![span.clone()]);
            } else if let Some(group) = groups.last_mut() {
                group.push(span.clone());
            }
        }

        let count = groups.len();
        if count < self.config.min_columns || count > self.config.max_columns {
            return None;
        }

        Some(
            groups
                .iter()
                .map(|g| Cell {
                    left: g.first().map(|s| s.x).unwrap_or(0.0),
                    right: g.iter().map(TextSpan::right).fold(f64::NEG_INFINITY, f64::max),
                    text: join_spans(g).trim().to_string(),
                })
                .collect(),
        )
    }

    /// Whether `row` continues a table whose previous row is `prev`.
    fn rows_align(&self, prev: &Option<Vec<Cell>>, row: &[Cell], columns: usize) -> bool {
        let Some(prev) = prev else {
            return false;
        };
        if row.len() != columns || prev.len() != columns {
            return false;
        }

        let tol = self.config.alignment_tolerance;
        prev.iter().zip(row).all(|(a, b)| {
            // Left-aligned text or right-aligned numbers
            (a.left - b.left).abs() <= tol || (a.right - b.right).abs() <= tol
        })
    }

    /// Check if the rows are really a bulleted or numbered list.
    fn is_list_pattern(&self, rows: &[&Vec<Cell>]) -> bool {
        let markers = rows
            .iter()
            .filter(|r| {
                r.first()
                    .is_some_and(|c| is_bullet_marker(&c.text) || is_number_marker(&c.text))
            })
            .count();
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);

        columns == 2 && markers * 2 >= rows.len()
    }
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn build_table(lines: &[TextLine], rows: &[&Vec<Cell>]) -> DetectedTable {
    let spans = || lines.iter().flat_map(|l| l.spans.iter());
    let bbox = [
        spans().map(|s| s.x).fold(f64::INFINITY, f64::min),
        spans().map(TextSpan::bottom).fold(f64::INFINITY, f64::min),
        spans().map(TextSpan::right).fold(f64::NEG_INFINITY, f64::max),
        spans().map(TextSpan::top).fold(f64::NEG_INFINITY, f64::max),
    ];

    DetectedTable {
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| c.text.clone()).collect())
            .collect(),
        bbox,
    }
}
