//! Expense log handler for the daylog MCP server

use crate::DaylogServerHandler;
use crate::daylog::{self, ExpenseEntry};
use crate::formatting;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl DaylogServerHandler {
    /// **Expense**: Record a spend. Amounts are decimal currency strings
    /// ("12.34") stored as integer cents.
    pub async fn handle_log_expense(
        &self,
        amount: String,
        category: String,
        date: Option<String>,
        note: Option<String>,
    ) -> McpResult<String> {
        let amount_cents = validation::parse_amount(&amount)?;
        let category = category.trim().to_string();
        if category.is_empty() {
            bail_public!(_, "Expense category cannot be empty");
        }

        let date = match date {
            Some(ref date_str) => validation::parse_date(date_str)?,
            None => daylog::local_date_today(),
        };

        let mut data = self.data.lock().unwrap();
        data.add_expense(ExpenseEntry {
            date,
            amount_cents,
            category: category.clone(),
            note: note.filter(|n| !n.is_empty()),
        });
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Log expense for {}", date)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!(
            "Expense {} ({}) logged for {}",
            formatting::format_money(amount_cents),
            category,
            date
        ))
    }
}
