//! MCP tool handlers for the daylog server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod capture;
pub mod change_status;
pub mod expense;
pub mod list;
pub mod mood;
pub mod purge;
pub mod reorder;
pub mod summary;
pub mod update;
