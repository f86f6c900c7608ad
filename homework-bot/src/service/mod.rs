//! Service layer
//!
//! Business logic that sits between the repositories and the poll loop.

mod notification;

pub use notification::{GateDecision, NotificationGate};
