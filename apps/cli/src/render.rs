//! Plain-text rendering of tables and view states

use std::fmt::Write as _;

use rxboard_client::{ViewPhase, ViewState};
use rxboard_models::Page;

/// Column-aligned text table
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Missing cells render empty; extra cells are dropped
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(self.headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Section heading followed by the view's placeholder, error or content.
///
/// A failed view renders one inline error line so the rest of a screen
/// still draws.
pub fn render_view<T>(title: &str, view: &ViewState<T>, content: impl FnOnce(&T) -> String) -> String {
    let body = match view.phase() {
        ViewPhase::Idle => "No data.\n".to_string(),
        ViewPhase::Loading => "Loading...\n".to_string(),
        ViewPhase::Failed(error) => format!("Error: {error}\n"),
        ViewPhase::Ready(data) => content(data),
    };
    format!("== {title} ==\n{body}")
}

/// Paging footer, e.g. `Page 2 of 5 (93 total)`
pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "Page {} of {} ({} total)",
        page.current_page, page.pages, page.total
    )
}

pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxboard_client::Error;
    use std::sync::Arc;

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(["ID", "Name"]);
        table.row(["1", "Ada Lovelace"]).row(["22", "Al"]);

        assert_eq!(
            table.render(),
            "ID  Name\n--  ------------\n1   Ada Lovelace\n22  Al\n"
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B"]);
        table.row(["x"]);
        assert_eq!(table.render(), "A  B\n-  -\nx\n");
    }

    #[test]
    fn test_view_phases() {
        let mut view: ViewState<u32> = ViewState::new();
        assert_eq!(render_view("Count", &view, |n| format!("{n}\n")), "== Count ==\nNo data.\n");

        let ticket = view.begin();
        assert!(render_view("Count", &view, |n| format!("{n}\n")).ends_with("Loading...\n"));

        view.apply(ticket, Ok(Arc::new(7)));
        assert_eq!(render_view("Count", &view, |n| format!("{n}\n")), "== Count ==\n7\n");

        let ticket = view.begin();
        view.apply(ticket, Err(Error::Network("connection refused".into())));
        assert_eq!(
            render_view("Count", &view, |n| format!("{n}\n")),
            "== Count ==\nError: Network error: connection refused\n"
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("CVS")), "CVS");
        assert_eq!(yes_no(true), "yes");

        let page: Page<u8> = Page {
            items: vec![1],
            total: 93,
            pages: 5,
            current_page: 2,
        };
        assert_eq!(page_footer(&page), "Page 2 of 5 (93 total)");
    }
}
