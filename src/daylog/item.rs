use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::rank::Ranked;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Which logical list an item belongs to
///
/// A closed set of classifications; every item is in exactly one list at a
/// time and its rank is meaningful only within that list.
/// Uses snake_case naming to match TOML serialization format.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// The working list shown by default
    active,
    /// Deferred items, kept out of the working list
    parked,
    /// Completed items
    done,
    /// Items removed from view, pending purge
    archived,
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ItemStatus::active),
            "parked" => Ok(ItemStatus::parked),
            "done" => Ok(ItemStatus::done),
            "archived" => Ok(ItemStatus::archived),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: active, parked, done, archived",
                s
            )),
        }
    }
}

/// A tracked item (task)
///
/// The `status` field decides which list the item is on; the `rank` field
/// decides where on that list it sits. Ranks carry no meaning beyond
/// ordering comparisons and are never shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Unique identifier chosen by the client (e.g., "buy-groceries")
    pub id: String,
    /// Title describing the item
    pub title: String,
    /// Current classification (active, parked, done, archived)
    pub status: ItemStatus,
    /// Sort key within the status list; mutated only by reorder and
    /// status-change operations
    pub rank: f64,
    /// Optional additional notes in Markdown format
    pub notes: Option<String>,
    /// Optional due date (format: YYYY-MM-DD)
    pub due_date: Option<NaiveDate>,
    /// Date when the item was created
    pub created_at: NaiveDate,
    /// Date when the item was last updated
    pub updated_at: NaiveDate,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            status: ItemStatus::active,
            rank: 0.0,
            notes: None,
            due_date: None,
            created_at: local_date_today(),
            updated_at: local_date_today(),
        }
    }
}

impl Ranked for Item {
    fn rank_id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> f64 {
        self.rank
    }
}

impl Item {
    /// Check if this item is due on or before the given date
    pub fn is_due_by(&self, date: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due <= date)
    }
}

/// A mood log entry, at most one per date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Date the mood applies to
    pub date: NaiveDate,
    /// Mood score, 1 (worst) to 5 (best)
    pub score: u8,
    /// Optional free-form note
    pub note: Option<String>,
}

/// An expense log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Date the expense occurred
    pub date: NaiveDate,
    /// Amount in cents; integer to avoid currency rounding drift
    pub amount_cents: i64,
    /// Spending category (e.g., "food", "transport")
    pub category: String,
    /// Optional free-form note
    pub note: Option<String>,
}
