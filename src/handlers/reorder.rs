//! Reorder handler for the daylog MCP server
//!
//! The drag-and-drop seam: a client reports "item X was dropped on the slot
//! of item Y" (or past the end of the list) and the handler persists the
//! rank computed for X. Only X's row is written in the common case; a
//! precision-exhausted list is renumbered in the same call.

use crate::DaylogServerHandler;
use crate::rank::MoveTarget;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl DaylogServerHandler {
    /// **Reorder**: Move an item to the slot another item occupies, or to
    /// the end of its list. Both items must be on the same list; use
    /// change_status first to move across lists.
    pub async fn handle_reorder(
        &self,
        id: String,
        slot_of: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_item_id(&id);
        let slot_of = slot_of.map(|s| validation::normalize_item_id(&s));

        let mut data = self.data.lock().unwrap();

        let target = match slot_of.as_deref() {
            Some(target_id) => MoveTarget::Slot(target_id),
            None => MoveTarget::End,
        };

        if let Err(e) = data.reorder_item(&id, target) {
            drop(data);
            // Stale input: the caller should re-fetch the list and retry
            bail_public!(_, "Reorder failed: {}", e);
        }
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Reorder item {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        match slot_of {
            Some(target_id) => Ok(format!("Item {} moved to the slot of {}", id, target_id)),
            None => Ok(format!("Item {} moved to the end of its list", id)),
        }
    }
}
