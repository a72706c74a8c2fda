//! Purge handler for the daylog MCP server

use crate::DaylogServerHandler;
use mcp_attr::{Result as McpResult, bail_public};

impl DaylogServerHandler {
    /// **Purge**: Permanently delete archived items.
    /// **Workflow**: Archive items via change_status first, then
    /// purge_archived to delete them for good.
    pub async fn handle_purge_archived(&self) -> McpResult<String> {
        let mut data = self.data.lock().unwrap();
        let count = data.purge_archived();
        drop(data);

        if count > 0
            && let Err(e) = self.save_data_with_message("Purge archived items")
        {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Deleted {} archived item(s)", count))
    }
}
