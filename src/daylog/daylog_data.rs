use anyhow::{Context, Result, bail};
use std::collections::HashMap;

use crate::daylog::item::{ExpenseEntry, Item, ItemStatus, MoodEntry, local_date_today};
use crate::rank::{MoveTarget, RANK_GAP, RankOutcome, compute_rank_for_move};

pub struct DaylogData {
    /// Format version for the TOML file (current: 1)
    pub format_version: u32,

    /// All tracked items stored in a Vec
    ///
    /// Vec is the primary storage: it keeps insertion order for stable TOML
    /// serialization and git-friendly diffs. Display order comes from the
    /// rank field, not from Vec position.
    pub(crate) items: Vec<Item>,

    /// HashMap index, id -> status, for O(1) duplicate detection and status
    /// lookup. Kept in sync with the Vec on every mutation; never
    /// serialized, rebuilt during deserialization.
    pub(crate) item_map: HashMap<String, ItemStatus>,

    /// Mood log, at most one entry per date
    pub(crate) moods: Vec<MoodEntry>,

    /// Expense log, append-only
    pub(crate) expenses: Vec<ExpenseEntry>,
}

impl Default for DaylogData {
    fn default() -> Self {
        Self {
            format_version: 1,
            items: Vec::new(),
            item_map: HashMap::new(),
            moods: Vec::new(),
            expenses: Vec::new(),
        }
    }
}

// Serialize/Deserialize implementations are in serde_impl.rs

impl DaylogData {
    /// Create a new empty DaylogData instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Count tracked items across all statuses
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Find an item by its ID
    pub fn find_item_by_id(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Find an item by its ID and return a mutable reference
    pub(crate) fn find_item_by_id_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Check whether an item ID is already taken
    pub fn contains_item(&self, id: &str) -> bool {
        self.item_map.contains_key(id)
    }

    /// Status of an item, if it exists
    pub fn status_of(&self, id: &str) -> Option<ItemStatus> {
        self.item_map.get(id).cloned()
    }

    /// Add an item to the collection
    ///
    /// The caller is responsible for checking `contains_item` first; adding
    /// a duplicate ID leaves two rows and last-write-wins in the index.
    pub fn add_item(&mut self, item: Item) {
        self.item_map.insert(item.id.clone(), item.status.clone());
        self.items.push(item);
    }

    /// Remove an item from the collection and return it
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let item = self.items.remove(pos);
        self.item_map.remove(id);
        Some(item)
    }

    /// Replace an item by its ID, returning the old one
    pub fn update_item(&mut self, id: &str, item: Item) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let old = self.items.remove(pos);
        self.item_map.insert(item.id.clone(), item.status.clone());
        self.items.push(item);
        Some(old)
    }

    /// Rank that places a new arrival at the head of a status list
    ///
    /// Newest-first: strictly below the list's current minimum, with a full
    /// gap left for later insertions above it. An empty list starts at 0.
    pub fn head_rank(&self, status: &ItemStatus) -> f64 {
        let mut min: Option<f64> = None;
        for item in self.items.iter().filter(|i| &i.status == status) {
            min = Some(min.map_or(item.rank, |m| m.min(item.rank)));
        }
        match min {
            Some(m) => m - RANK_GAP,
            None => 0.0,
        }
    }

    /// Items of one status in display order
    ///
    /// Sorted by rank ascending; transient rank ties fall back to creation
    /// date, then ID, so the order stays deterministic until the tie is
    /// resolved by the next reorder.
    pub fn ordered_items(&self, status: &ItemStatus) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().filter(|i| &i.status == status).collect();
        items.sort_by(|a, b| {
            a.rank
                .total_cmp(&b.rank)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        items
    }

    /// Move an item to a different status list
    ///
    /// The item enters the destination at its head with a fresh rank; no
    /// other item's rank changes, in either list. A move to the item's
    /// current status keeps its rank untouched.
    ///
    /// Returns `None` if the item does not exist.
    pub fn move_status(&mut self, id: &str, new_status: ItemStatus) -> Option<()> {
        let head = self.head_rank(&new_status);
        let item = self.find_item_by_id_mut(id)?;
        if item.status == new_status {
            return Some(());
        }
        item.status = new_status.clone();
        item.rank = head;
        item.updated_at = local_date_today();
        self.item_map.insert(id.to_string(), new_status);
        Some(())
    }

    /// Move an item within its status list and persist the computed rank(s)
    ///
    /// Computes the new rank against the item's current list and applies the
    /// outcome: the common case touches only the moving item, a compaction
    /// renumbers the whole list. Returns the moving item's new rank.
    pub fn reorder_item(&mut self, id: &str, target: MoveTarget<'_>) -> Result<f64> {
        let Some(status) = self.status_of(id) else {
            bail!("item '{}' not found", id);
        };

        let outcome = {
            let list = self.ordered_items(&status);
            compute_rank_for_move(&list, id, target)?
        };

        let moved_rank = outcome
            .rank_of(id)
            .context("computed outcome does not cover the moving item")?;

        match outcome {
            RankOutcome::Moved(rank) => {
                if let Some(item) = self.find_item_by_id_mut(id) {
                    item.rank = rank;
                    item.updated_at = local_date_today();
                }
            }
            RankOutcome::Rebalanced(ranks) => {
                for (rid, rank) in ranks {
                    if let Some(item) = self.find_item_by_id_mut(&rid) {
                        item.rank = rank;
                    }
                }
                if let Some(item) = self.find_item_by_id_mut(id) {
                    item.updated_at = local_date_today();
                }
            }
        }

        Ok(moved_rank)
    }

    /// Record a mood for a date, replacing any existing entry for that date
    pub fn log_mood(&mut self, entry: MoodEntry) {
        self.moods.retain(|m| m.date != entry.date);
        self.moods.push(entry);
    }

    /// Append an expense entry
    pub fn add_expense(&mut self, entry: ExpenseEntry) {
        self.expenses.push(entry);
    }

    /// Delete all archived items, returning how many were removed
    pub fn purge_archived(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|i| i.status != ItemStatus::archived);
        self.item_map.retain(|_, s| *s != ItemStatus::archived);
        before - self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::MIN_RANK_GAP;

    fn item(id: &str, status: ItemStatus, rank: f64) -> Item {
        Item {
            id: id.to_string(),
            title: format!("Item {}", id),
            status,
            rank,
            ..Default::default()
        }
    }

    #[test]
    fn test_item_map_synchronization() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 0.0));
        data.add_item(item("b", ItemStatus::parked, 0.0));

        assert_eq!(data.item_map.len(), data.items.len());
        assert_eq!(data.status_of("a"), Some(ItemStatus::active));
        assert_eq!(data.status_of("b"), Some(ItemStatus::parked));

        data.move_status("a", ItemStatus::done);
        assert_eq!(data.status_of("a"), Some(ItemStatus::done));

        data.remove_item("b");
        assert!(!data.contains_item("b"));
        assert_eq!(data.item_map.len(), 1);
    }

    #[test]
    fn test_head_rank_goes_below_minimum() {
        let mut data = DaylogData::new();
        assert_eq!(data.head_rank(&ItemStatus::active), 0.0);

        data.add_item(item("a", ItemStatus::active, 1000.0));
        assert_eq!(data.head_rank(&ItemStatus::active), 0.0);

        data.add_item(item("b", ItemStatus::active, -500.0));
        assert_eq!(data.head_rank(&ItemStatus::active), -1500.0);

        // Other lists do not affect the head
        assert_eq!(data.head_rank(&ItemStatus::parked), 0.0);
    }

    #[test]
    fn test_ordered_items_sorts_by_rank() {
        let mut data = DaylogData::new();
        data.add_item(item("c", ItemStatus::active, 3000.0));
        data.add_item(item("a", ItemStatus::active, 1000.0));
        data.add_item(item("b", ItemStatus::active, 2000.0));
        data.add_item(item("p", ItemStatus::parked, 0.0));

        let ids: Vec<&str> = data
            .ordered_items(&ItemStatus::active)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_ordered_items_breaks_rank_ties_deterministically() {
        let mut data = DaylogData::new();
        data.add_item(item("z", ItemStatus::active, 1000.0));
        data.add_item(item("a", ItemStatus::active, 1000.0));

        let ids: Vec<&str> = data
            .ordered_items(&ItemStatus::active)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "z"]);
    }

    #[test]
    fn test_move_status_assigns_fresh_head_rank() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 5000.0));
        data.add_item(item("p", ItemStatus::parked, 2000.0));

        data.move_status("a", ItemStatus::parked).unwrap();

        let moved = data.find_item_by_id("a").unwrap();
        assert_eq!(moved.status, ItemStatus::parked);
        assert_eq!(moved.rank, 1000.0);

        // Source and destination survivors keep their ranks
        assert_eq!(data.find_item_by_id("p").unwrap().rank, 2000.0);
    }

    #[test]
    fn test_move_status_same_status_keeps_rank() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 5000.0));
        data.move_status("a", ItemStatus::active).unwrap();
        assert_eq!(data.find_item_by_id("a").unwrap().rank, 5000.0);
    }

    #[test]
    fn test_reorder_item_midpoint() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 1000.0));
        data.add_item(item("b", ItemStatus::active, 2000.0));
        data.add_item(item("c", ItemStatus::active, 3000.0));

        let rank = data.reorder_item("c", MoveTarget::Slot("b")).unwrap();
        assert_eq!(rank, 1500.0);

        let ids: Vec<&str> = data
            .ordered_items(&ItemStatus::active)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c", "b"]);

        // Non-interference: the other two are untouched
        assert_eq!(data.find_item_by_id("a").unwrap().rank, 1000.0);
        assert_eq!(data.find_item_by_id("b").unwrap().rank, 2000.0);
    }

    #[test]
    fn test_reorder_item_to_end() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 1000.0));
        data.add_item(item("b", ItemStatus::active, 2000.0));

        let rank = data.reorder_item("a", MoveTarget::End).unwrap();
        assert_eq!(rank, 3000.0);
    }

    #[test]
    fn test_reorder_item_applies_rebalance() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 1000.0));
        data.add_item(item("b", ItemStatus::active, 1000.0 + MIN_RANK_GAP / 2.0));
        data.add_item(item("c", ItemStatus::active, 2000.0));

        data.reorder_item("c", MoveTarget::Slot("b")).unwrap();

        let ordered = data.ordered_items(&ItemStatus::active);
        let ids: Vec<&str> = ordered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
        assert!(ordered.windows(2).all(|w| w[0].rank < w[1].rank));
        assert_eq!(ordered[0].rank, 0.0);
        assert_eq!(ordered[1].rank, RANK_GAP);
    }

    #[test]
    fn test_reorder_unknown_item_fails() {
        let mut data = DaylogData::new();
        assert!(data.reorder_item("ghost", MoveTarget::End).is_err());
    }

    #[test]
    fn test_reorder_does_not_cross_lists() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 1000.0));
        data.add_item(item("p", ItemStatus::parked, 1000.0));

        // "p" is not on the active list, so it cannot be a target for "a"
        assert!(data.reorder_item("a", MoveTarget::Slot("p")).is_err());
    }

    #[test]
    fn test_log_mood_replaces_same_date() {
        let mut data = DaylogData::new();
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        data.log_mood(MoodEntry {
            date,
            score: 2,
            note: None,
        });
        data.log_mood(MoodEntry {
            date,
            score: 4,
            note: Some("better after lunch".to_string()),
        });

        assert_eq!(data.moods.len(), 1);
        assert_eq!(data.moods[0].score, 4);
    }

    #[test]
    fn test_purge_archived() {
        let mut data = DaylogData::new();
        data.add_item(item("a", ItemStatus::active, 0.0));
        data.add_item(item("x", ItemStatus::archived, 0.0));
        data.add_item(item("y", ItemStatus::archived, 1000.0));

        assert_eq!(data.purge_archived(), 2);
        assert_eq!(data.item_count(), 1);
        assert!(!data.contains_item("x"));
        assert!(data.contains_item("a"));
    }
}
