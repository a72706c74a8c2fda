//! Serialization and deserialization implementations for DaylogData
//!
//! The TOML file groups items into one array per status so that diffs stay
//! local to the list that changed. The id index is never written; it is
//! rebuilt here on load. Files written before items carried a rank get
//! evenly spaced ranks assigned in file order.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

use super::daylog_data::DaylogData;
use super::item::{ExpenseEntry, Item, ItemStatus, MoodEntry};
use crate::rank::RANK_GAP;

#[derive(Deserialize)]
#[serde(default)]
struct DaylogFileHelper {
    format_version: u32,
    active: Vec<Item>,
    parked: Vec<Item>,
    done: Vec<Item>,
    archived: Vec<Item>,
    mood: Vec<MoodEntry>,
    expense: Vec<ExpenseEntry>,
}

impl Default for DaylogFileHelper {
    fn default() -> Self {
        Self {
            format_version: 1,
            active: Vec::new(),
            parked: Vec::new(),
            done: Vec::new(),
            archived: Vec::new(),
            mood: Vec::new(),
            expense: Vec::new(),
        }
    }
}

/// Repair a status bucket whose ranks collide.
///
/// Pre-rank files deserialize every item with rank 0; at-rest collisions are
/// also invalid in current files. Either way the file order is the intended
/// order, so renumber the whole bucket with even spacing.
fn backfill_ranks(bucket: &mut [Item]) {
    let mut seen = Vec::with_capacity(bucket.len());
    let collides = bucket.iter().any(|item| {
        if seen.contains(&item.rank.to_bits()) {
            true
        } else {
            seen.push(item.rank.to_bits());
            false
        }
    });
    if collides {
        for (i, item) in bucket.iter_mut().enumerate() {
            item.rank = i as f64 * RANK_GAP;
        }
    }
}

impl<'de> Deserialize<'de> for DaylogData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = DaylogFileHelper::deserialize(deserializer)?;

        let buckets = [
            (helper.active, ItemStatus::active),
            (helper.parked, ItemStatus::parked),
            (helper.done, ItemStatus::done),
            (helper.archived, ItemStatus::archived),
        ];

        let mut items = Vec::new();
        for (mut bucket, status) in buckets {
            // The containing array decides the status, whatever the row says
            for item in &mut bucket {
                item.status = status.clone();
            }
            backfill_ranks(&mut bucket);
            items.extend(bucket);
        }

        let mut item_map = HashMap::new();
        for item in &items {
            item_map.insert(item.id.clone(), item.status.clone());
        }

        Ok(DaylogData {
            format_version: helper.format_version,
            items,
            item_map,
            moods: helper.mood,
            expenses: helper.expense,
        })
    }
}

impl Serialize for DaylogData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DaylogData", 7)?;
        state.serialize_field("format_version", &self.format_version)?;

        // One array per status, items in Vec (insertion) order
        let mut status_map: HashMap<ItemStatus, Vec<&Item>> = HashMap::new();
        for item in &self.items {
            status_map
                .entry(item.status.clone())
                .or_default()
                .push(item);
        }

        if let Some(active) = status_map.get(&ItemStatus::active) {
            state.serialize_field("active", active)?;
        }
        if let Some(parked) = status_map.get(&ItemStatus::parked) {
            state.serialize_field("parked", parked)?;
        }
        if let Some(done) = status_map.get(&ItemStatus::done) {
            state.serialize_field("done", done)?;
        }
        if let Some(archived) = status_map.get(&ItemStatus::archived) {
            state.serialize_field("archived", archived)?;
        }

        if !self.moods.is_empty() {
            state.serialize_field("mood", &self.moods)?;
        }
        if !self.expenses.is_empty() {
            state.serialize_field("expense", &self.expenses)?;
        }

        state.end()
    }
}
