//! FILENAME: core/report-engine/src/group.rs
//! PURPOSE: Group dividers and alternating group highlight colors.
//! CONTEXT: Rows that share the group-by column values are kept together and
//! separated from the next group by a divider (`None` row). The group-by
//! cells of each group get a background color that alternates between two
//! colors so adjacent groups are easy to tell apart.

use engine::table::{self, Table};
use engine::Row;

use crate::settings::HighlightColors;

// ============================================================================
// DIVIDERS
// ============================================================================

/// Stable group-by on `group_columns` with a divider between groups.
/// Existing dividers are dropped first.
pub fn add_null_divider_between_groups(rows: &[Option<Row>], group_columns: &[String]) -> Table {
    let groups = table::split_rows_by_group(table::clone_table(rows), group_columns);
    table::concat_by_null(groups)
}

pub fn add_null_divider_between_each_collection(collections: Vec<Vec<Row>>) -> Table {
    table::concat_by_null(collections)
}

// ============================================================================
// HIGHLIGHTING
// ============================================================================

/// Alternates between two colors, one collection at a time.
/// The first collection gets `color1`.
#[derive(Debug, Clone)]
pub struct Highlighter {
    colors: HighlightColors,
    use_second: bool,
}

impl Highlighter {
    pub fn new(colors: HighlightColors) -> Self {
        Highlighter {
            colors,
            use_second: false,
        }
    }

    /// Color the next collection will receive.
    pub fn current_color(&self) -> &str {
        if self.use_second {
            &self.colors.color2
        } else {
            &self.colors.color1
        }
    }

    /// Paints `columns` of every row of one collection, then flips.
    pub fn highlight_collection(&mut self, rows: &mut [Row], columns: &[String]) {
        let color = self.current_color().to_string();
        for row in rows.iter_mut() {
            for column in columns {
                row.set_background_color(column, color.as_str());
            }
        }
        self.use_second = !self.use_second;
    }

    pub fn highlight_each_collection(
        &mut self,
        mut collections: Vec<Vec<Row>>,
        columns: &[String],
    ) -> Vec<Vec<Row>> {
        for collection in collections.iter_mut() {
            self.highlight_collection(collection, columns);
        }
        collections
    }
}

/// Highlights each collection with a fresh toggle starting at `color1`.
pub fn highlight_columns_of_each_collection(
    collections: &[Vec<Row>],
    columns: &[String],
    colors: &HighlightColors,
) -> Vec<Vec<Row>> {
    let cloned = collections
        .iter()
        .map(|rows| rows.iter().map(Row::clone_with_meta).collect())
        .collect();
    Highlighter::new(colors.clone()).highlight_each_collection(cloned, columns)
}

/// Treats every divider-delimited segment as one group.
pub fn split_by_null_and_highlight_columns(
    rows: &[Option<Row>],
    columns: &[String],
    colors: &HighlightColors,
) -> Table {
    let segments = table::split_by_null(table::clone_table(rows));
    let highlighted = Highlighter::new(colors.clone()).highlight_each_collection(segments, columns);
    table::concat_by_null(highlighted)
}

/// Groups by `columns` and highlights each group. Dividers separate the
/// groups in the output only if the input had any.
pub fn split_by_group_and_highlight_columns(
    rows: &[Option<Row>],
    columns: &[String],
    colors: &HighlightColors,
) -> Table {
    let had_dividers = table::has_null_divider(rows);
    let groups = table::split_rows_by_group(table::clone_table(rows), columns);
    let highlighted = Highlighter::new(colors.clone()).highlight_each_collection(groups, columns);

    if had_dividers {
        table::concat_by_null(highlighted)
    } else {
        highlighted.into_iter().flatten().map(Some).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(job: &str, mean: &str) -> Option<Row> {
        Some(Row::from_pairs([("Job", job), ("Mean", mean)]))
    }

    fn job() -> Vec<String> {
        vec!["Job".to_string()]
    }

    fn colors() -> HighlightColors {
        HighlightColors::new("#111111", "#222222")
    }

    fn background(table: &Table, index: usize) -> Option<String> {
        table[index]
            .as_ref()
            .and_then(|r| r.background_color("Job").map(str::to_string))
    }

    #[test]
    fn test_dividers_between_groups() {
        let rows = vec![row("A", "1"), row("B", "2"), row("A", "3"), row("C", "4")];
        let table = add_null_divider_between_groups(&rows, &job());
        // 3 groups -> 2 dividers
        assert_eq!(table.iter().filter(|r| r.is_none()).count(), 2);
        assert_eq!(table.len(), 6);
        assert_eq!(table[1].as_ref().unwrap().get_text("Mean").as_deref(), Some("3"));
    }

    #[test]
    fn test_single_group_has_no_divider() {
        let rows = vec![row("A", "1"), row("A", "2")];
        let table = add_null_divider_between_groups(&rows, &job());
        assert!(!table::has_null_divider(&table));
    }

    #[test]
    fn test_highlight_alternates_starting_with_color1() {
        let rows = vec![row("A", "1"), None, row("B", "2"), row("B", "3"), None, row("C", "4")];
        let table = split_by_null_and_highlight_columns(&rows, &job(), &colors());

        assert_eq!(background(&table, 0).as_deref(), Some("#111111"));
        assert_eq!(background(&table, 2).as_deref(), Some("#222222"));
        assert_eq!(background(&table, 3).as_deref(), Some("#222222"));
        assert_eq!(background(&table, 5).as_deref(), Some("#111111"));
        // Input untouched
        assert!(rows[0].as_ref().unwrap().background_color("Job").is_none());
    }

    #[test]
    fn test_split_by_group_keeps_divider_style_of_input() {
        let flat = vec![row("A", "1"), row("B", "2"), row("A", "3")];
        let table = split_by_group_and_highlight_columns(&flat, &job(), &colors());
        assert_eq!(table.len(), 3);
        assert!(!table::has_null_divider(&table));
        assert_eq!(background(&table, 1).as_deref(), Some("#111111"));
        assert_eq!(background(&table, 2).as_deref(), Some("#222222"));

        let divided = vec![row("A", "1"), None, row("B", "2")];
        let table = split_by_group_and_highlight_columns(&divided, &job(), &colors());
        assert_eq!(table.len(), 3);
        assert!(table[1].is_none());
    }

    #[test]
    fn test_highlighter_state_continues_across_calls() {
        let mut highlighter = Highlighter::new(colors());
        let mut first = vec![Row::from_pairs([("Job", "A")])];
        let mut second = vec![Row::from_pairs([("Job", "B")])];

        highlighter.highlight_collection(&mut first, &job());
        highlighter.highlight_collection(&mut second, &job());

        assert_eq!(first[0].background_color("Job"), Some("#111111"));
        assert_eq!(second[0].background_color("Job"), Some("#222222"));
        assert_eq!(highlighter.current_color(), "#111111");
    }

    #[test]
    fn test_highlight_columns_of_each_collection() {
        let collections = vec![
            vec![Row::from_pairs([("Job", "A")])],
            vec![Row::from_pairs([("Job", "B")])],
        ];
        let out = highlight_columns_of_each_collection(&collections, &job(), &colors());
        assert_eq!(out[1][0].background_color("Job"), Some("#222222"));
        assert!(collections[0][0].background_color("Job").is_none());

        let table = add_null_divider_between_each_collection(out);
        assert_eq!(table.len(), 3);
    }
}
