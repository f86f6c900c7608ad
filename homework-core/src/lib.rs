//! Homework Core
//!
//! Core types and pure logic for the homework status notifier.
//!
//! This crate contains:
//! - Domain types: homework records, review statuses, poll watermark and
//!   notification memory
//! - Error taxonomy shared by the clients and the poll loop
//! - Response validation and status extraction

pub mod domain;
pub mod error;
pub mod extract;
pub mod validate;

pub use error::{PollError, Result, Severity};
