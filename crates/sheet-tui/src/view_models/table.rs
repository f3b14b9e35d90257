use crate::{
    state::{InputMode, LoadStatus, TableViewState},
    theme::ThemeMode,
};

pub const COLUMN_HEADERS: [&str; 3] = ["Name", "Use Case", "Syntax"];
const COLUMN_FIELDS: [&str; 3] = ["name", "usecase", "syntax"];

const SEARCH_PLACEHOLDER: &str = "Search...";
const EMPTY_MESSAGE: &str = "No results found";

/// View model for the record table - all presentation data pre-computed
#[derive(Debug, Clone)]
pub struct TableViewModel {
    pub status: LoadStatus,
    /// Text for the search box: the query, or the placeholder when empty
    pub search_text: String,
    pub search_is_placeholder: bool,
    pub search_focused: bool,
    /// "☾ Dark Mode" / "☀ Light Mode", naming the mode `t` switches to
    pub theme_label: &'static str,
    pub rows: Vec<RowViewModel>,
    /// Set when the filtered set is empty
    pub empty_message: Option<&'static str>,
    /// "Showing {n} results"
    pub count_label: String,
}

/// One table row, cells in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViewModel {
    pub cells: [String; 3],
}

impl TableViewModel {
    pub fn from_state(table: &TableViewState, input_mode: InputMode, theme_mode: ThemeMode) -> Self {
        let rows: Vec<RowViewModel> = table
            .filtered()
            .iter()
            .map(|record| RowViewModel {
                cells: COLUMN_FIELDS.map(|field| record.text(field)),
            })
            .collect();

        let (search_text, search_is_placeholder) = if table.query.is_empty() {
            (SEARCH_PLACEHOLDER.to_string(), true)
        } else {
            (table.query.clone(), false)
        };

        Self {
            status: table.load_status.clone(),
            search_text,
            search_is_placeholder,
            search_focused: input_mode == InputMode::Search,
            theme_label: theme_mode.toggle_label(),
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            count_label: format!("Showing {} results", rows.len()),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sheet_records::Record;

    fn table_with(records: Vec<serde_json::Value>, query: &str) -> TableViewState {
        let mut table = TableViewState::default();
        table.set_records(
            records
                .into_iter()
                .map(|value| serde_json::from_value::<Record>(value).unwrap())
                .collect(),
        );
        table.set_query(query.to_string());
        table.load_status = LoadStatus::Ready;
        table
    }

    #[test]
    fn test_rows_follow_column_order() {
        let table = table_with(
            vec![json!({"id": 1, "name": "VLOOKUP", "usecase": "lookup", "syntax": "=VLOOKUP()"})],
            "",
        );
        let vm = TableViewModel::from_state(&table, InputMode::Normal, ThemeMode::Light);

        assert_eq!(
            vm.rows,
            vec![RowViewModel {
                cells: ["VLOOKUP".into(), "lookup".into(), "=VLOOKUP()".into()],
            }]
        );
        assert_eq!(vm.count_label, "Showing 1 results");
        assert_eq!(vm.empty_message, None);
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let table = table_with(vec![json!({"id": "a", "name": null})], "");
        let vm = TableViewModel::from_state(&table, InputMode::Normal, ThemeMode::Light);

        assert_eq!(vm.rows[0].cells, [String::new(), String::new(), String::new()]);
    }

    #[test]
    fn test_no_match_shows_empty_message() {
        let table = table_with(
            vec![
                json!({"id": 1, "name": "VLOOKUP", "usecase": "lookup"}),
                json!({"id": 2, "name": "SUM", "usecase": "add"}),
            ],
            "zzz",
        );
        let vm = TableViewModel::from_state(&table, InputMode::Search, ThemeMode::Light);

        assert!(vm.rows.is_empty());
        assert_eq!(vm.empty_message, Some("No results found"));
        assert_eq!(vm.count_label, "Showing 0 results");
        assert_eq!(vm.search_text, "zzz");
        assert!(!vm.search_is_placeholder);
        assert!(vm.search_focused);
    }

    #[test]
    fn test_large_set_count_label() {
        let records = (0..150).map(|i| json!({"id": i, "name": format!("FN{i}")})).collect();
        let table = table_with(records, "");
        let vm = TableViewModel::from_state(&table, InputMode::Normal, ThemeMode::Light);

        assert_eq!(vm.rows.len(), 150);
        assert_eq!(vm.count_label, "Showing 150 results");
    }

    #[test]
    fn test_placeholder_and_theme_label() {
        let table = TableViewState::default();

        let vm = TableViewModel::from_state(&table, InputMode::Normal, ThemeMode::Light);
        assert_eq!(vm.search_text, "Search...");
        assert!(vm.search_is_placeholder);
        assert_eq!(vm.theme_label, "☾ Dark Mode");
        assert_eq!(vm.status, LoadStatus::Pending);

        let vm = TableViewModel::from_state(&table, InputMode::Normal, ThemeMode::Dark);
        assert_eq!(vm.theme_label, "☀ Light Mode");
    }
}
