pub mod history;
pub mod jsonl;
pub mod utilization;

pub use history::HistoryStore;
pub use jsonl::JsonlLog;
pub use utilization::UtilizationStore;
