//! Scheduler layer for the bot
//!
//! Drives the poll → decide → notify → sleep cycle. Iterations are strictly
//! sequential; the timer is the only thing that paces them.

pub mod poller;
pub mod timer;

pub use poller::StatusPoller;
pub use timer::TokioTimer;
