//! Core domain types
//!
//! These types describe what the review API reports and what the poll loop
//! remembers between iterations.

pub mod homework;
pub mod memory;
pub mod poll_state;
