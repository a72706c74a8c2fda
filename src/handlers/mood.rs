//! Mood log handler for the daylog MCP server

use crate::DaylogServerHandler;
use crate::daylog::{self, MoodEntry};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl DaylogServerHandler {
    /// **Mood**: Record how the day felt, 1 (worst) to 5 (best).
    /// One entry per date; logging again replaces the earlier entry.
    pub async fn handle_log_mood(
        &self,
        score: String,
        date: Option<String>,
        note: Option<String>,
    ) -> McpResult<String> {
        let score = validation::parse_score(&score)?;
        let date = match date {
            Some(ref date_str) => validation::parse_date(date_str)?,
            None => daylog::local_date_today(),
        };

        let mut data = self.data.lock().unwrap();
        data.log_mood(MoodEntry {
            date,
            score,
            note: note.filter(|n| !n.is_empty()),
        });
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Log mood for {}", date)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Mood {}/5 logged for {}", score, date))
    }
}
