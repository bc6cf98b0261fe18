//! Storage of archived samples for the SPC engine.

pub mod file_store;
pub mod history_store;
pub mod in_memory;

pub use file_store::FileHistoryStore;
pub use history_store::HistoricalSampleStore;
pub use in_memory::InMemoryHistoryStore;
