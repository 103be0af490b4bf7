use crate::analytics::AnalyticsReport;
use crate::models::Reservation;

/// Table of reservations with a cursor and a multi-row selection. Used for
/// both the full travel history and search results.
pub(crate) struct HistoryScreen {
    pub(crate) title: String,
    pub(crate) records: Vec<Reservation>,
    pub(crate) selected: usize,
    /// Ticket ids marked for export, in the order they were marked.
    pub(crate) marked: Vec<i64>,
    /// When set, refreshing re-runs this search instead of loading everything.
    pub(crate) query: Option<String>,
}

impl HistoryScreen {
    pub(crate) fn new(title: impl Into<String>, records: Vec<Reservation>) -> Self {
        Self {
            title: title.into(),
            records,
            selected: 0,
            marked: Vec::new(),
            query: None,
        }
    }

    pub(crate) fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub(crate) fn current(&self) -> Option<&Reservation> {
        self.records.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.records.is_empty() {
            return;
        }
        let len = self.records.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.records.len().saturating_sub(1);
    }

    /// Toggle the export mark on the row under the cursor. Returns whether
    /// the row is now marked.
    pub(crate) fn toggle_mark(&mut self) -> bool {
        let Some(id) = self.current().map(|record| record.id) else {
            return false;
        };
        if let Some(pos) = self.marked.iter().position(|marked| *marked == id) {
            self.marked.remove(pos);
            false
        } else {
            self.marked.push(id);
            true
        }
    }

    pub(crate) fn is_marked(&self, id: i64) -> bool {
        self.marked.contains(&id)
    }

    /// Marked rows in marking order. Falls back to the row under the cursor
    /// when nothing is marked.
    pub(crate) fn selection(&self) -> Vec<Reservation> {
        if self.marked.is_empty() {
            return self.current().cloned().into_iter().collect();
        }
        self.marked
            .iter()
            .filter_map(|id| self.records.iter().find(|record| record.id == *id))
            .cloned()
            .collect()
    }

    /// Swap in fresh rows, dropping marks for tickets that no longer exist.
    pub(crate) fn set_records(&mut self, records: Vec<Reservation>) {
        self.records = records;
        let records = &self.records;
        self.marked
            .retain(|id| records.iter().any(|record| record.id == *id));
        self.ensure_in_bounds();
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.records.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.records.len() {
            self.selected = self.records.len() - 1;
        }
    }
}

/// Analytics computed when the screen was opened.
pub(crate) struct AnalyticsScreen {
    pub(crate) report: AnalyticsReport,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::Gender;

    fn record(id: i64) -> Reservation {
        Reservation {
            id,
            passenger_name: format!("P{id}"),
            age: 20,
            gender: Gender::Female,
            source: "Delhi".into(),
            destination: "Hassan".into(),
            journey_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            fare: 10.0,
        }
    }

    #[test]
    fn selection_keeps_marking_order() {
        let mut screen = HistoryScreen::new("History", vec![record(1), record(2), record(3)]);
        screen.select_last();
        screen.toggle_mark();
        screen.select_first();
        screen.toggle_mark();

        let ids: Vec<i64> = screen.selection().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn selection_falls_back_to_cursor_row() {
        let mut screen = HistoryScreen::new("History", vec![record(1), record(2)]);
        screen.move_selection(1);
        let ids: Vec<i64> = screen.selection().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn refresh_drops_marks_for_cancelled_tickets() {
        let mut screen = HistoryScreen::new("History", vec![record(1), record(2)]);
        screen.toggle_mark();
        screen.move_selection(1);
        screen.toggle_mark();
        screen.set_records(vec![record(2)]);
        assert_eq!(screen.marked, vec![2]);
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn empty_table_has_no_selection() {
        let mut screen = HistoryScreen::new("History", Vec::new());
        assert!(!screen.toggle_mark());
        assert!(screen.selection().is_empty());
    }
}
