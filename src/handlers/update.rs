//! Update handler for the daylog MCP server

use crate::DaylogServerHandler;
use crate::daylog;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl DaylogServerHandler {
    /// **Clarify**: Update an item's fields. Status moves go through
    /// change_status; reordering goes through reorder.
    /// **Tip**: Use empty string "" to clear notes or the due date.
    pub async fn handle_update(
        &self,
        id: String,
        title: Option<String>,
        notes: Option<String>,
        due_date: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_item_id(&id);

        // None = leave alone, Some(None) = clear, Some(Some(d)) = set
        let parsed_due = match due_date.as_deref() {
            None => None,
            Some("") => Some(None),
            Some(date_str) => Some(Some(validation::parse_date(date_str)?)),
        };

        let mut data = self.data.lock().unwrap();

        let Some(mut item) = data.find_item_by_id(&id).cloned() else {
            drop(data);
            bail_public!(_, "Item '{}' not found", id);
        };

        if let Some(new_title) = title {
            if new_title.trim().is_empty() {
                drop(data);
                bail_public!(_, "Item title cannot be empty");
            }
            item.title = new_title;
        }

        if let Some(n) = notes {
            item.notes = if n.is_empty() { None } else { Some(n) };
        }

        if let Some(due) = parsed_due {
            item.due_date = due;
        }

        item.updated_at = daylog::local_date_today();

        if data.update_item(&id, item).is_none() {
            drop(data);
            bail_public!(_, "Failed to update item '{}'", id);
        }
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Update item {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Item {} updated successfully", id))
    }
}
