//! Microsoft Graph integration.
//!
//! This module provides:
//! - Tenant directory listing
//! - Calendar, To Do and mail calls on behalf of any tenant user
//! - OneDrive folder and file operations behind [`DriveStorage`]

pub mod client;
pub mod models;
pub mod storage;

pub use client::GraphClient;
pub use models::{CalendarEvent, NewEvent, NewTask, SendMailRequest, TodoList, User};
pub use storage::DriveStorage;
