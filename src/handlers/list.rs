//! List handler for the daylog MCP server

use crate::DaylogServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl DaylogServerHandler {
    /// Handles list/filter operations - applies filters and formats results
    /// for display. Items come back in rank order within each status list.
    pub async fn handle_list(
        &self,
        status: Option<String>,
        due: Option<String>,
        keyword: Option<String>,
        exclude_notes: Option<bool>,
    ) -> McpResult<String> {
        let status_filter = match status {
            Some(ref status_str) => Some(validation::parse_status(status_str)?),
            None => None,
        };

        let due_filter = match due {
            Some(ref date_str) => Some(validation::parse_date(date_str)?),
            None => None,
        };

        let data = self.data.lock().unwrap();
        let mut items = data.list_items(status_filter);
        drop(data);

        if let Some(filter_date) = due_filter {
            formatting::apply_due_filter(&mut items, filter_date);
        }

        if let Some(ref keyword_filter) = keyword {
            formatting::apply_keyword_filter(&mut items, keyword_filter);
        }

        let exclude_notes_flag = exclude_notes.unwrap_or(false);
        Ok(formatting::format_items(items, exclude_notes_flag))
    }
}
