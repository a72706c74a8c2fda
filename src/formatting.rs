//! Formatting helper functions for the daylog MCP server
//!
//! Display formatting and in-memory list filtering, shared by the list and
//! summary tools.

use chrono::NaiveDate;

use crate::daylog::{ExpenseEntry, Item, MoodEntry};

/// Keep only items due on or before the given date
pub fn apply_due_filter(items: &mut Vec<Item>, filter_date: NaiveDate) {
    items.retain(|item| item.is_due_by(filter_date));
}

/// Keep only items matching the keyword (case-insensitive, searches id,
/// title, and notes)
pub fn apply_keyword_filter(items: &mut Vec<Item>, keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    items.retain(|item| {
        let id_matches = item.id.to_lowercase().contains(&keyword_lower);
        let title_matches = item.title.to_lowercase().contains(&keyword_lower);
        let notes_matches = item
            .notes
            .as_ref()
            .map(|n| n.to_lowercase().contains(&keyword_lower))
            .unwrap_or(false);

        id_matches || title_matches || notes_matches
    });
}

/// Render cents as a decimal currency string, e.g. 1234 -> "12.34"
pub fn format_money(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

/// Format items into a display string, in the order given
///
/// The rank field is deliberately absent from the output: it orders the
/// list and means nothing else.
pub fn format_items(items: Vec<Item>, exclude_notes: bool) -> String {
    if items.is_empty() {
        return "No items found".to_string();
    }

    let mut result = format!("Found {} item(s):\n\n", items.len());
    for item in items {
        result.push_str(&format!(
            "- [{}] {} (status: {:?})\n",
            item.id, item.title, item.status
        ));

        if !exclude_notes
            && let Some(ref n) = item.notes
        {
            result.push_str(&format!("  Notes: {}\n", n));
        }
        if let Some(ref date) = item.due_date {
            result.push_str(&format!("  Due: {}\n", date));
        }
        result.push_str(&format!("  Created: {}\n", item.created_at));
        result.push_str(&format!("  Updated: {}\n", item.updated_at));
    }

    result
}

/// Format a single mood entry for display
pub fn format_mood(mood: &MoodEntry) -> String {
    match &mood.note {
        Some(note) => format!("Mood {}/5 ({})", mood.score, note),
        None => format!("Mood {}/5", mood.score),
    }
}

/// Format an expense entry line for display
pub fn format_expense(expense: &ExpenseEntry) -> String {
    match &expense.note {
        Some(note) => format!(
            "{} {} ({})",
            format_money(expense.amount_cents),
            expense.category,
            note
        ),
        None => format!(
            "{} {}",
            format_money(expense.amount_cents),
            expense.category
        ),
    }
}
