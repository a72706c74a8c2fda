//! Daylog MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a
//! personal tracker: tasks with persistently ordered lists, a daily mood
//! log, and an expense log.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `DaylogServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `daylog` module plus the `rank` module - data models
//!   and the ordered-list position manager
//! - **Persistence Layer**: `storage` module - File-based TOML storage with
//!   optional Git sync
//!
//! Task lists stay ordered across sessions through a fractional rank: each
//! item carries a float sort key, and moving an item rewrites that item's
//! key only. See the `rank` module for the scheme.
//!
//! # Example
//!
//! ```no_run
//! use daylog_mcp::DaylogServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = DaylogServerHandler::new("daylog.toml", false)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

mod daylog;
mod formatting;
mod git_ops;
mod handlers;
mod rank;
mod storage;
pub mod validation;

use anyhow::Result;
use std::sync::Mutex;

use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};

// Re-export commonly used types
pub use daylog::{DaylogData, ExpenseEntry, Item, ItemStatus, MoodEntry, local_date_today};
pub use rank::{
    MIN_RANK_GAP, MoveTarget, RANK_GAP, RankError, RankOutcome, Ranked, compute_rank_for_move,
};
pub use storage::Storage;

/// MCP Server handler for the daylog tracker
///
/// Provides an MCP interface to tracked items, mood logging, and expense
/// logging. All changes are persisted to a TOML file, committed to git when
/// the file lives in a repository, and optionally synchronized with a
/// remote.
pub struct DaylogServerHandler {
    pub(crate) data: Mutex<DaylogData>,
    pub(crate) storage: Storage,
}

impl DaylogServerHandler {
    /// Create a new daylog server handler
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file (TOML format)
    /// * `sync_git` - Enable automatic Git pull on load and push on shutdown
    pub fn new(storage_path: &str, sync_git: bool) -> Result<Self> {
        let storage = Storage::new(storage_path, sync_git);
        let data = Mutex::new(storage.load()?);
        Ok(Self { data, storage })
    }

    /// Save tracker data with a commit message describing the operation
    fn save_data_with_message(&self, message: &str) -> Result<()> {
        let data = self.data.lock().unwrap();
        self.storage.save_with_message(&data, message)?;
        Ok(())
    }
}

impl Drop for DaylogServerHandler {
    fn drop(&mut self) {
        // Push to git on shutdown if sync is enabled
        if let Err(e) = self.storage.shutdown() {
            eprintln!("Warning: Shutdown git sync failed: {}", e);
        }
    }
}

/// Personal daylog server: ordered task lists, daily mood, and expenses.
///
/// Items live on one of four lists (active, parked, done, archived) and
/// keep a persistent user-chosen order within each list. Reordering an
/// item rewrites only that item's sort key, so lists stay stable however
/// often they are rearranged.
///
/// Key concepts:
/// - **active**: the working list (new captures land on top)
/// - **parked**: deferred items, out of the way but not forgotten
/// - **done**: completed items
/// - **archived**: removed from view, deleted for good by purge_archived
///
/// Item IDs are arbitrary strings chosen by the client, e.g. "buy-groceries".
#[mcp_server]
impl McpServer for DaylogServerHandler {
    /// **Capture**: Create a tracked item. It lands at the top of its list.
    #[tool]
    async fn capture(
        &self,
        /// ID: any unique string (e.g., "buy-groceries")
        id: String,
        /// Title: brief description
        title: String,
        /// Status: active/parked/done/archived, defaults to active (optional)
        status: Option<String>,
        /// Notes: Markdown details (optional)
        notes: Option<String>,
        /// Due date: YYYY-MM-DD (optional)
        due_date: Option<String>,
    ) -> McpResult<String> {
        self.handle_capture(id, title, status, notes, due_date).await
    }

    /// **Review**: List items in their persistent order, with filters.
    #[tool]
    async fn list(
        &self,
        /// Status filter: active/parked/done/archived. Empty=all lists.
        status: Option<String>,
        /// Due filter: YYYY-MM-DD, keeps items due on or before the date (optional)
        due: Option<String>,
        /// Keyword: case-insensitive search in id, title, notes (optional)
        keyword: Option<String>,
        /// Exclude notes from the output (optional)
        exclude_notes: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list(status, due, keyword, exclude_notes).await
    }

    /// **Clarify**: Edit an item's title, notes, or due date. ""=clear.
    #[tool]
    async fn update(
        &self,
        /// ID of the item to update
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// Notes in Markdown, ""=clear (optional)
        notes: Option<String>,
        /// Due date YYYY-MM-DD, ""=clear (optional)
        due_date: Option<String>,
    ) -> McpResult<String> {
        self.handle_update(id, title, notes, due_date).await
    }

    /// **Organize**: Move items to another list. Each arrives at the head
    /// of its destination; nothing else is renumbered.
    #[tool]
    async fn change_status(
        &self,
        /// Item IDs (supports batch operations)
        ids: Vec<String>,
        /// New status: active/parked/done/archived
        new_status: String,
    ) -> McpResult<String> {
        self.handle_change_status(ids, new_status).await
    }

    /// **Reorder**: Move an item within its list - to the slot another
    /// item occupies, or to the end. Only the moved item's position key
    /// changes.
    #[tool]
    async fn reorder(
        &self,
        /// ID of the item being moved
        id: String,
        /// ID of the item whose slot to take; omit to move to the end (optional)
        slot_of: Option<String>,
    ) -> McpResult<String> {
        self.handle_reorder(id, slot_of).await
    }

    /// **Mood**: Log the day's mood, 1 (worst) to 5 (best). One per date.
    #[tool]
    async fn log_mood(
        &self,
        /// Score: 1 to 5
        score: String,
        /// Date YYYY-MM-DD, defaults to today (optional)
        date: Option<String>,
        /// Free-form note (optional)
        note: Option<String>,
    ) -> McpResult<String> {
        self.handle_log_mood(score, date, note).await
    }

    /// **Expense**: Log a spend as a decimal amount with a category.
    #[tool]
    async fn log_expense(
        &self,
        /// Amount: decimal currency string (e.g., "12.34")
        amount: String,
        /// Category (e.g., "food", "transport")
        category: String,
        /// Date YYYY-MM-DD, defaults to today (optional)
        date: Option<String>,
        /// Free-form note (optional)
        note: Option<String>,
    ) -> McpResult<String> {
        self.handle_log_expense(amount, category, date, note).await
    }

    /// **Review**: Items due, mood, and spend for one day.
    #[tool]
    async fn day_summary(
        &self,
        /// Date YYYY-MM-DD, defaults to today (optional)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_day_summary(date).await
    }

    /// **Purge**: Permanently delete archived items. Archive via
    /// change_status first.
    #[tool]
    async fn purge_archived(&self) -> McpResult<String> {
        self.handle_purge_archived().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn get_test_handler() -> (DaylogServerHandler, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let handler =
            DaylogServerHandler::new(temp_file.path().to_str().unwrap(), false).unwrap();
        (handler, temp_file)
    }

    #[test]
    fn test_custom_file_path() {
        let temp_file = NamedTempFile::new().unwrap();
        let custom_path = temp_file.path().to_str().unwrap();

        let handler = DaylogServerHandler::new(custom_path, false).unwrap();
        assert_eq!(handler.storage.file_path().to_str().unwrap(), custom_path);

        let mut data = handler.data.lock().unwrap();
        data.add_item(Item {
            id: "test-item".to_string(),
            title: "Test Item".to_string(),
            ..Default::default()
        });
        drop(data);

        handler.save_data_with_message("Add item test-item").unwrap();
        assert!(std::path::Path::new(custom_path).exists());

        // A fresh handler sees the saved state
        let handler2 = DaylogServerHandler::new(custom_path, false).unwrap();
        let loaded = handler2.data.lock().unwrap();
        assert_eq!(loaded.item_count(), 1);
        assert_eq!(
            loaded.find_item_by_id("test-item").unwrap().title,
            "Test Item"
        );
    }

    #[tokio::test]
    async fn test_capture_and_duplicate_rejected() {
        let (handler, _temp_file) = get_test_handler();

        let result = handler
            .handle_capture(
                "buy-groceries".to_string(),
                "Buy groceries".to_string(),
                None,
                None,
                None,
            )
            .await;
        assert!(result.is_ok());

        let result = handler
            .handle_capture(
                "buy-groceries".to_string(),
                "Again".to_string(),
                None,
                None,
                None,
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_new_captures_stack_on_top() {
        let (handler, _temp_file) = get_test_handler();

        for id in ["first", "second", "third"] {
            handler
                .handle_capture(id.to_string(), format!("Item {id}"), None, None, None)
                .await
                .unwrap();
        }

        let data = handler.data.lock().unwrap();
        let ids: Vec<&str> = data
            .ordered_items(&ItemStatus::active)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, ["third", "second", "first"]);
    }
}
