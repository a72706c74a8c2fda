//! Query methods for DaylogData
//!
//! Read-only filtering and per-date lookups, separated from the main
//! daylog_data.rs to keep mutation and querying apart.

use chrono::NaiveDate;

use super::daylog_data::DaylogData;
use super::item::{ExpenseEntry, Item, ItemStatus, MoodEntry};

impl DaylogData {
    /// Items of one status, or every status, in display order
    ///
    /// Without a filter, lists are concatenated active, parked, done,
    /// archived, each in its own rank order.
    pub fn list_items(&self, status_filter: Option<ItemStatus>) -> Vec<Item> {
        match status_filter {
            Some(status) => self
                .ordered_items(&status)
                .into_iter()
                .cloned()
                .collect(),
            None => [
                ItemStatus::active,
                ItemStatus::parked,
                ItemStatus::done,
                ItemStatus::archived,
            ]
            .iter()
            .flat_map(|s| self.ordered_items(s))
            .cloned()
            .collect(),
        }
    }

    /// The mood logged for a date, if any
    pub fn mood_on(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.moods.iter().find(|m| m.date == date)
    }

    /// Expenses logged on a date, in log order
    pub fn expenses_on(&self, date: NaiveDate) -> Vec<&ExpenseEntry> {
        self.expenses.iter().filter(|e| e.date == date).collect()
    }

    /// Total spend on a date, in cents
    pub fn expense_total_on(&self, date: NaiveDate) -> i64 {
        self.expenses
            .iter()
            .filter(|e| e.date == date)
            .map(|e| e.amount_cents)
            .sum()
    }

    /// Items due on or before a date, across the active and parked lists
    pub fn due_by(&self, date: NaiveDate) -> Vec<&Item> {
        [ItemStatus::active, ItemStatus::parked]
            .iter()
            .flat_map(|s| self.ordered_items(s))
            .filter(|i| i.is_due_by(date))
            .collect()
    }
}
