//! Repository layer
//!
//! Repositories are thin adapters over the HTTP clients. They expose the two
//! capabilities the poll loop consumes, fetching review statuses and
//! delivering chat messages, without any business logic.
//!
//! Both are trait-based so the loop can be driven by in-memory fakes.

mod chat;
mod review;

// Re-export traits
pub use chat::ChatRepository;
pub use review::ReviewRepository;

// Re-export implementations
pub use chat::TelegramChatRepository;
pub use review::HttpReviewRepository;
