//! In-memory repository implementations.
//!
//! These back the repository ports with `RwLock<HashMap>` state. Data is
//! lost on process restart; a durable backend would implement the same
//! ports without touching callers.

mod posts;
mod users;

pub use posts::InMemoryPostStore;
pub use users::InMemoryUserStore;
