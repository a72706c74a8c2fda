//! Capture handler for the daylog MCP server

use crate::DaylogServerHandler;
use crate::daylog::{self, Item, ItemStatus};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl DaylogServerHandler {
    /// **Capture**: Create a new tracked item at the head of its list.
    /// New items land on top so the most recent capture is seen first;
    /// no other item moves.
    pub async fn handle_capture(
        &self,
        id: String,
        title: String,
        status: Option<String>,
        notes: Option<String>,
        due_date: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_item_id(&id);
        if id.is_empty() {
            bail_public!(_, "Item ID cannot be empty");
        }
        if title.trim().is_empty() {
            bail_public!(_, "Item title cannot be empty");
        }

        let item_status = match status {
            Some(ref s) => validation::parse_status(s)?,
            None => ItemStatus::active,
        };

        let parsed_due = match due_date {
            Some(ref date_str) => Some(validation::parse_date(date_str)?),
            None => None,
        };

        let mut data = self.data.lock().unwrap();

        if let Some(existing) = data.status_of(&id) {
            drop(data);
            bail_public!(
                _,
                "Duplicate ID error: ID '{}' already exists (status: {:?}). Each item must have a unique ID.",
                id,
                existing
            );
        }

        let rank = data.head_rank(&item_status);
        let today = daylog::local_date_today();
        data.add_item(Item {
            id: id.clone(),
            title,
            status: item_status.clone(),
            rank,
            notes,
            due_date: parsed_due,
            created_at: today,
            updated_at: today,
        });
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Add item {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!(
            "Item created with ID: {} (status: {:?})",
            id, item_status
        ))
    }
}
