//! Validation helper functions for the daylog MCP server
//!
//! Parameter parsing for statuses, dates, mood scores, and currency
//! amounts. Everything user-facing goes through here so the error messages
//! stay consistent across tools.

use chrono::NaiveDate;
use mcp_attr::Result as McpResult;

use crate::daylog::ItemStatus;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse and validate a status parameter
pub fn parse_status(status_str: &str) -> McpResult<ItemStatus> {
    status_str.parse::<ItemStatus>().map_err(|_| {
        invalid_params(format!(
            "Invalid status '{}'. Valid statuses: active, parked, done, archived",
            status_str
        ))
    })
}

/// Parse and validate a date parameter in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Parse and validate a mood score (1 = worst, 5 = best)
pub fn parse_score(score_str: &str) -> McpResult<u8> {
    match score_str.trim().parse::<u8>() {
        Ok(score) if (1..=5).contains(&score) => Ok(score),
        _ => Err(invalid_params(format!(
            "Invalid mood score '{}'. Use a whole number from 1 to 5",
            score_str
        ))),
    }
}

/// Parse a decimal currency amount into cents
///
/// Accepts "12", "12.3", and "12.34"; anything negative, empty, or with
/// more than two decimal places is rejected. Integer cents avoid float
/// rounding drift in totals.
pub fn parse_amount(amount_str: &str) -> McpResult<i64> {
    let trimmed = amount_str.trim();
    let err = || {
        invalid_params(format!(
            "Invalid amount '{}'. Use a non-negative decimal like '12.34'",
            amount_str
        ))
    };

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(err());
    }
    if frac.len() > 2 {
        return Err(err());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }

    let whole_cents = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<i64>()
            .ok()
            .and_then(|w| w.checked_mul(100))
            .ok_or_else(err)?
    };
    let frac_cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| err())? * 10,
        _ => frac.parse::<i64>().map_err(|_| err())?,
    };

    whole_cents.checked_add(frac_cents).ok_or_else(err)
}

/// Normalize an item ID by trimming surrounding whitespace
///
/// IDs are arbitrary strings chosen by the MCP client; only whitespace is
/// stripped.
pub fn normalize_item_id(item_id: &str) -> String {
    item_id.trim().to_string()
}
