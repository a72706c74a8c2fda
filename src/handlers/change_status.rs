//! Change status handler for the daylog MCP server

use crate::DaylogServerHandler;
use crate::daylog::ItemStatus;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl DaylogServerHandler {
    /// **Organize**: Move items between lists as you process them.
    /// **When**: active→parked (defer) | →done (complete) | →archived (remove from view).
    /// **Batch**: Supports multiple IDs for efficient batch operations.
    ///
    /// A moved item enters the head of its destination list with a fresh
    /// rank; nothing else is renumbered in either list.
    pub async fn handle_change_status(
        &self,
        ids: Vec<String>,
        new_status: String,
    ) -> McpResult<String> {
        if ids.is_empty() {
            bail_public!(_, "No IDs provided. Please specify at least one item ID.");
        }

        let item_status: ItemStatus = validation::parse_status(&new_status)?;
        let is_archive = item_status == ItemStatus::archived;

        let normalized_ids: Vec<String> = ids
            .iter()
            .map(|id| validation::normalize_item_id(id))
            .collect();

        let mut data = self.data.lock().unwrap();

        let mut successes = Vec::new();
        let mut failures = Vec::new();

        for id in normalized_ids {
            let Some(old_status) = data.status_of(&id) else {
                failures.push(format!("{}: not found", id));
                continue;
            };

            if data.move_status(&id, item_status.clone()).is_none() {
                failures.push(format!("{}: failed to update", id));
                continue;
            }

            successes.push((id, old_status));
        }

        drop(data);

        if !successes.is_empty() {
            let ids_str = if successes.len() == 1 {
                successes[0].0.clone()
            } else {
                format!("{} items", successes.len())
            };

            if let Err(e) =
                self.save_data_with_message(&format!("Change {} status to {}", ids_str, new_status))
            {
                bail_public!(_, "Failed to save: {}", e);
            }
        }

        let mut response = String::new();

        if !successes.is_empty() {
            let action = if is_archive {
                "archived"
            } else {
                "changed status"
            };
            response.push_str(&format!(
                "Successfully {} for {} item{}:\n",
                action,
                successes.len(),
                if successes.len() == 1 { "" } else { "s" }
            ));
            for (id, old_status) in &successes {
                response.push_str(&format!(
                    "- {}: {:?} → {}\n",
                    id, old_status, new_status
                ));
            }
        }

        if !failures.is_empty() {
            if !response.is_empty() {
                response.push('\n');
            }
            response.push_str(&format!(
                "Failed to change status for {} item{}:\n",
                failures.len(),
                if failures.len() == 1 { "" } else { "s" }
            ));
            for failure in &failures {
                response.push_str(&format!("- {}\n", failure));
            }
        }

        if successes.is_empty() {
            bail_public!(_, "{}", response.trim());
        }

        Ok(response.trim().to_string())
    }
}
