//! Day summary handler for the daylog MCP server

use crate::DaylogServerHandler;
use crate::daylog;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl DaylogServerHandler {
    /// **Review**: One-screen view of a day - items due, mood, and spend.
    pub async fn handle_day_summary(&self, date: Option<String>) -> McpResult<String> {
        let date = match date {
            Some(ref date_str) => validation::parse_date(date_str)?,
            None => daylog::local_date_today(),
        };

        let data = self.data.lock().unwrap();

        let due: Vec<String> = data
            .due_by(date)
            .iter()
            .map(|item| {
                let due_on = item.due_date.map(|d| d.to_string()).unwrap_or_default();
                format!("- [{}] {} (due {})", item.id, item.title, due_on)
            })
            .collect();
        let mood = data.mood_on(date).map(formatting::format_mood);
        let expenses: Vec<String> = data
            .expenses_on(date)
            .iter()
            .map(|e| format!("- {}", formatting::format_expense(e)))
            .collect();
        let total = data.expense_total_on(date);

        drop(data);

        let mut result = format!("Summary for {}:\n\n", date);

        if due.is_empty() {
            result.push_str("No items due\n");
        } else {
            result.push_str(&format!("Due item(s): {}\n", due.len()));
            for line in due {
                result.push_str(&line);
                result.push('\n');
            }
        }

        result.push('\n');
        match mood {
            Some(m) => result.push_str(&format!("{}\n", m)),
            None => result.push_str("No mood logged\n"),
        }

        result.push('\n');
        if expenses.is_empty() {
            result.push_str("No expenses logged\n");
        } else {
            result.push_str(&format!(
                "Expenses (total {}):\n",
                formatting::format_money(total)
            ));
            for line in expenses {
                result.push_str(&line);
                result.push('\n');
            }
        }

        Ok(result.trim_end().to_string())
    }
}
