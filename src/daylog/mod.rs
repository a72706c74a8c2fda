//! Tracker domain models and business logic
//!
//! Core data structures for the daylog tracker, split into submodules:
//! - `item`: tracked items (tasks), mood and expense entries
//! - `daylog_data`: main data container with all tracker operations
//! - `queries`: query methods for filtering and per-date lookups
//! - `serde_impl`: serialization/deserialization implementations

mod daylog_data;
mod item;
mod queries;
mod serde_impl;

pub use daylog_data::DaylogData;
pub use item::{ExpenseEntry, Item, ItemStatus, MoodEntry, local_date_today};
